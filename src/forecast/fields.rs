//! Field mapping tables from the Visual Crossing timeline payload to the
//! normalized weather record.
//!
//! Each mapping names the target key, the JSON pointer it is read from and
//! the value substituted when the source is missing or null. Pointers are
//! relative to whatever object the table is applied to: the whole response
//! for [`RECORD_FIELDS`], a single `days[]` entry for [`DAY_FIELDS`] and a
//! single `hours[]` entry for [`HOUR_FIELDS`].

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Zero,
    Empty,
    Null,
    /// Read another pointer from the same object, zero if that is absent too.
    Field(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub target: &'static str,
    pub source: &'static str,
    pub fallback: Fallback,
}

const fn map(target: &'static str, source: &'static str, fallback: Fallback) -> FieldMapping {
    FieldMapping {
        target,
        source,
        fallback,
    }
}

pub const RECORD_FIELDS: &[FieldMapping] = &[
    map("resolvedAddress", "/resolvedAddress", Fallback::Empty),
    // Current conditions
    map("temperature", "/currentConditions/temp", Fallback::Zero),
    map("feelslike", "/currentConditions/feelslike", Fallback::Zero),
    map("condition", "/currentConditions/conditions", Fallback::Empty),
    map("description", "/currentConditions/description", Fallback::Empty),
    map("icon", "/currentConditions/icon", Fallback::Empty),
    // Today
    map("high", "/days/0/tempmax", Fallback::Zero),
    map("low", "/days/0/tempmin", Fallback::Zero),
    // Wind
    map("windSpeed", "/currentConditions/windspeed", Fallback::Zero),
    map("windGust", "/currentConditions/windgust", Fallback::Zero),
    map("windDir", "/currentConditions/winddir", Fallback::Zero),
    // Precipitation
    map("precip", "/currentConditions/precip", Fallback::Zero),
    map("precipProb", "/currentConditions/precipprob", Fallback::Zero),
    map("precipProbDay", "/days/0/precipprob", Fallback::Zero),
    map("precipType", "/days/0/preciptype", Fallback::Null),
    map("snow", "/days/0/snow", Fallback::Zero),
    map("snowDepth", "/days/0/snowdepth", Fallback::Zero),
    // Atmosphere
    map("humidity", "/currentConditions/humidity", Fallback::Zero),
    map("pressure", "/currentConditions/pressure", Fallback::Zero),
    map("visibility", "/currentConditions/visibility", Fallback::Zero),
    map("cloudCover", "/currentConditions/cloudcover", Fallback::Zero),
    map("dew", "/currentConditions/dew", Fallback::Zero),
    map("uvIndex", "/currentConditions/uvindex", Fallback::Zero),
    // Solar
    map("solarRadiation", "/currentConditions/solarradiation", Fallback::Zero),
    map("solarEnergy", "/currentConditions/solarenergy", Fallback::Zero),
    // Sun and moon
    map("sunrise", "/currentConditions/sunrise", Fallback::Empty),
    map("sunset", "/currentConditions/sunset", Fallback::Empty),
    map("moonPhase", "/currentConditions/moonphase", Fallback::Zero),
];

pub const DAY_FIELDS: &[FieldMapping] = &[
    map("day", "/datetime", Fallback::Empty),
    map("epoch", "/datetimeEpoch", Fallback::Zero),
    map("high", "/tempmax", Fallback::Zero),
    map("low", "/tempmin", Fallback::Zero),
    map("temp", "/temp", Fallback::Zero),
    map("feelslikeMax", "/feelslikemax", Fallback::Field("/tempmax")),
    map("feelslikeMin", "/feelslikemin", Fallback::Field("/tempmin")),
    map("condition", "/conditions", Fallback::Empty),
    map("description", "/description", Fallback::Empty),
    map("icon", "/icon", Fallback::Empty),
    map("precipProb", "/precipprob", Fallback::Zero),
    map("precipCover", "/precipcover", Fallback::Zero),
    map("precipType", "/preciptype", Fallback::Null),
    map("snow", "/snow", Fallback::Zero),
    map("windSpeed", "/windspeed", Fallback::Zero),
    map("windGust", "/windgust", Fallback::Zero),
    map("humidity", "/humidity", Fallback::Zero),
    map("uvIndex", "/uvindex", Fallback::Zero),
    map("sunrise", "/sunrise", Fallback::Empty),
    map("sunset", "/sunset", Fallback::Empty),
    map("moonPhase", "/moonphase", Fallback::Zero),
    map("severeRisk", "/severerisk", Fallback::Zero),
    map("pressure", "/pressure", Fallback::Zero),
    map("cloudCover", "/cloudcover", Fallback::Zero),
    map("visibility", "/visibility", Fallback::Zero),
];

pub const HOUR_FIELDS: &[FieldMapping] = &[
    map("time", "/datetime", Fallback::Empty),
    map("epoch", "/datetimeEpoch", Fallback::Zero),
    map("temp", "/temp", Fallback::Zero),
    map("feelslike", "/feelslike", Fallback::Field("/temp")),
    map("condition", "/conditions", Fallback::Empty),
    map("icon", "/icon", Fallback::Empty),
    map("precipProb", "/precipprob", Fallback::Zero),
    map("precipType", "/preciptype", Fallback::Null),
    map("windSpeed", "/windspeed", Fallback::Zero),
    map("windGust", "/windgust", Fallback::Zero),
    map("humidity", "/humidity", Fallback::Zero),
    map("cloudCover", "/cloudcover", Fallback::Zero),
    map("uvIndex", "/uvindex", Fallback::Zero),
    map("visibility", "/visibility", Fallback::Zero),
];

fn present<'a>(raw: &'a Value, pointer: &str) -> Option<&'a Value> {
    raw.pointer(pointer).filter(|value| !value.is_null())
}

impl FieldMapping {
    /// Resolve this field against `raw`, substituting the fallback when the
    /// source is missing or null. Present values are copied untouched.
    pub fn resolve(&self, raw: &Value) -> Value {
        if let Some(value) = present(raw, self.source) {
            return value.clone();
        }

        match self.fallback {
            Fallback::Zero => Value::from(0),
            Fallback::Empty => Value::String(String::new()),
            Fallback::Null => Value::Null,
            Fallback::Field(pointer) => present(raw, pointer)
                .cloned()
                .unwrap_or_else(|| Value::from(0)),
        }
    }
}
