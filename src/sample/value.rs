use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

/// Every date/time sample renders as this instant.
pub const SAMPLE_DATE: &str = "2025-01-01T01:00:00.000000Z";

/// A synthesized example instance.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Float(f64),
    /// Always exactly one representative element.
    List(Box<SampleValue>),
    /// Members in resolution order.
    Object(IndexMap<String, SampleValue>),
    /// Stands in for a type already being expanded higher up the path.
    Circular(String),
}

impl SampleValue {
    pub fn circular_marker(type_name: &str) -> String {
        format!("!!CircularReference {type_name}!!>")
    }

    pub fn to_json(&self) -> Value {
        Value::from(self)
    }
}

impl From<&SampleValue> for Value {
    fn from(sample: &SampleValue) -> Self {
        match sample {
            SampleValue::String(s) => Value::String(s.clone()),
            SampleValue::Integer(n) => Value::from(*n),
            SampleValue::Boolean(b) => Value::Bool(*b),
            SampleValue::Float(x) => Value::from(*x),
            SampleValue::List(item) => Value::Array(vec![Value::from(&**item)]),
            SampleValue::Object(fields) => {
                Value::Object(fields.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect::<Map<_, _>>())
            }
            SampleValue::Circular(name) => Value::String(SampleValue::circular_marker(name)),
        }
    }
}

impl Serialize for SampleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleValue::String(s) => serializer.serialize_str(s),
            SampleValue::Integer(n) => serializer.serialize_i64(*n),
            SampleValue::Boolean(b) => serializer.serialize_bool(*b),
            SampleValue::Float(x) => serializer.serialize_f64(*x),
            SampleValue::List(item) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(item)?;
                seq.end()
            }
            SampleValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            SampleValue::Circular(name) => serializer.serialize_str(&SampleValue::circular_marker(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_member_order() {
        let mut fields = IndexMap::new();
        fields.insert("Zeta".to_string(), SampleValue::Float(1.0));
        fields.insert("Alpha".to_string(), SampleValue::List(Box::new(SampleValue::Circular("Node".into()))));
        let sample = SampleValue::Object(fields);
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(text, r#"{"Zeta":1.0,"Alpha":["!!CircularReference Node!!>"]}"#);
        assert_eq!(sample.to_json(), json!({"Zeta": 1.0, "Alpha": ["!!CircularReference Node!!>"]}));
    }
}
