use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{FieldMapping, DAY_FIELDS, HOUR_FIELDS, RECORD_FIELDS};

/// Flattened weather record returned to clients.
///
/// Keys follow the mapping tables in [`super::fields`] and always exist; the
/// `hourly` and `daily` lists are always arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherRecord(Map<String, Value>);

impl WeatherRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn daily(&self) -> &[Value] {
        entries(&self.0, "daily")
    }

    pub fn hourly(&self) -> &[Value] {
        entries(&self.0, "hourly")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn entries<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn apply(table: &[FieldMapping], raw: &Value) -> Map<String, Value> {
    table
        .iter()
        .map(|field| (field.target.to_string(), field.resolve(raw)))
        .collect()
}

fn map_list(raw: &Value, pointer: &str, each: impl Fn(&Value) -> Value) -> Value {
    let items: Vec<Value> = raw
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(each).collect())
        .unwrap_or_default();
    Value::Array(items)
}

fn normalize_hour(raw: &Value) -> Value {
    Value::Object(apply(HOUR_FIELDS, raw))
}

fn normalize_day(raw: &Value) -> Value {
    let mut day = apply(DAY_FIELDS, raw);
    day.insert("hours".to_string(), map_list(raw, "/hours", normalize_hour));
    Value::Object(day)
}

/// Reshape a Visual Crossing timeline response into a [`WeatherRecord`].
///
/// Never fails: missing or null fields take their table default and present
/// values are copied as-is, whatever their type.
pub fn normalize(raw: &Value) -> WeatherRecord {
    let mut record = apply(RECORD_FIELDS, raw);
    record.insert(
        "hourly".to_string(),
        map_list(raw, "/days/0/hours", normalize_hour),
    );
    record.insert("daily".to_string(), map_list(raw, "/days", normalize_day));
    WeatherRecord(record)
}
