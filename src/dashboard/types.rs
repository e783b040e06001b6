use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The gateway copies upstream values through untouched, so a field may hold
/// the wrong JSON type. Such values decode to the field's default instead of
/// failing the whole record.
mod lenient {
    use super::*;

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or_default())
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_i64()
            .or_else(|| value.as_f64().map(|v| v as i64))
            .unwrap_or_default())
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Value::deserialize(deserializer)?
            .as_str()
            .map(str::to_string)
            .unwrap_or_default())
    }

    pub fn string_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HourlyWeather {
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub epoch: i64,
    #[serde(deserialize_with = "lenient::number")]
    pub temp: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub feelslike: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: String,
    #[serde(deserialize_with = "lenient::number")]
    pub precip_prob: f64,
    #[serde(deserialize_with = "lenient::string_list")]
    pub precip_type: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::number")]
    pub wind_speed: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub wind_gust: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub humidity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub cloud_cover: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub uv_index: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub visibility: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyWeather {
    #[serde(deserialize_with = "lenient::text")]
    pub day: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub epoch: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: String,
    #[serde(deserialize_with = "lenient::text")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::number")]
    pub temp: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub high: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub low: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub feelslike_max: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub feelslike_min: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub precip_prob: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub precip_cover: f64,
    #[serde(deserialize_with = "lenient::string_list")]
    pub precip_type: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::number")]
    pub snow: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub wind_speed: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub wind_gust: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub humidity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub uv_index: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub visibility: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub pressure: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub cloud_cover: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub sunrise: String,
    #[serde(deserialize_with = "lenient::text")]
    pub sunset: String,
    #[serde(deserialize_with = "lenient::number")]
    pub moon_phase: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub severe_risk: f64,
    pub hours: Vec<HourlyWeather>,
}

/// Client-side view of the gateway's normalized weather record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherData {
    #[serde(deserialize_with = "lenient::text")]
    pub resolved_address: String,
    #[serde(deserialize_with = "lenient::number")]
    pub temperature: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub feelslike: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: String,
    #[serde(deserialize_with = "lenient::number")]
    pub high: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub low: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub wind_speed: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub humidity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub uv_index: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub visibility: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub pressure: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub cloud_cover: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub sunrise: String,
    #[serde(deserialize_with = "lenient::text")]
    pub sunset: String,
    #[serde(deserialize_with = "lenient::number")]
    pub moon_phase: f64,
    pub hourly: Vec<HourlyWeather>,
    pub daily: Vec<DailyWeather>,
}
