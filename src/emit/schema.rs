//! JSON-schema view of a sample, for OpenAPI request bodies.
use serde_json::{Map, Value, json};

use crate::sample::{SAMPLE_DATE, SampleValue};

pub fn infer_schema(sample: &SampleValue) -> Value {
    match sample {
        SampleValue::String(s) if s == SAMPLE_DATE => json!({ "type": "string", "format": "date-time" }),
        SampleValue::String(_) => json!({ "type": "string" }),
        SampleValue::Integer(_) => json!({ "type": "integer" }),
        SampleValue::Float(_) => json!({ "type": "number" }),
        SampleValue::Boolean(_) => json!({ "type": "boolean" }),
        SampleValue::List(item) => json!({ "type": "array", "items": infer_schema(item) }),
        SampleValue::Object(fields) => {
            let mut o = json!({ "type": "object" });
            if !fields.is_empty() {
                o["properties"] =
                    Value::Object(fields.iter().map(|(k, v)| (k.clone(), infer_schema(v))).collect::<Map<_, _>>());
            }
            o
        }
        // recursion is cut here; the example still carries the marker text
        SampleValue::Circular(name) => json!({ "type": "object", "description": format!("circular reference to {name}") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn mirrors_the_sample_shape() {
        let mut fields = IndexMap::new();
        fields.insert("At".to_string(), SampleValue::String(SAMPLE_DATE.into()));
        fields.insert("Tags".to_string(), SampleValue::List(Box::new(SampleValue::String(String::new()))));
        fields.insert("Next".to_string(), SampleValue::Circular("Node".into()));
        fields.insert("Empty".to_string(), SampleValue::Object(IndexMap::new()));
        assert_eq!(
            infer_schema(&SampleValue::Object(fields)),
            json!({
                "type": "object",
                "properties": {
                    "At": {"type": "string", "format": "date-time"},
                    "Tags": {"type": "array", "items": {"type": "string"}},
                    "Next": {"type": "object", "description": "circular reference to Node"},
                    "Empty": {"type": "object"}
                }
            })
        );
    }
}
