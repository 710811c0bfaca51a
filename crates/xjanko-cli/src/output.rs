//! JSON rendering of parsed records.
//!
//! Records serialize as objects in parse order, which `serde_json::Map`
//! would not keep, so the map is written by hand.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use xjanko_core::{Record, Value};

/// A record as a JSON object.
pub struct JsonRecord<'a>(pub &'a Record);

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, &JsonValue(value))?;
        }
        map.end()
    }
}

struct JsonValue<'a>(&'a Value);

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Grid(rows) => rows.serialize(serializer),
        }
    }
}

/// One line of a JSON Lines batch file.
#[derive(Serialize)]
pub struct JsonLine<'a> {
    pub file: &'a str,
    pub data: JsonRecord<'a>,
}

// =============================================================================
// Text Output
// =============================================================================

/// One line per property: name and a short description of the value.
pub fn summarize(record: &Record) -> String {
    let mut out = format!("Properties: {}\n", record.len());
    for (key, value) in record.iter() {
        let described = match value {
            Value::Null => "(flag)".to_string(),
            Value::Str(s) if s.chars().count() > 60 => {
                let preview: String = s.chars().take(60).collect();
                format!("\"{}...\"", preview)
            }
            Value::Str(s) => format!("\"{}\"", s),
            Value::Int(n) => n.to_string(),
            Value::Grid(rows) => {
                let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
                format!("grid {}x{}", rows.len(), widest)
            }
        };
        out.push_str(&format!("  {}: {}\n", key, described));
    }
    out
}
