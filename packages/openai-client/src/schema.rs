//! Schema generation for structured outputs.
//!
//! Types deriving `JsonSchema + Deserialize` get a provider-ready schema via
//! [`StructuredOutput::strict_schema`]. Strict mode requires:
//! 1. `additionalProperties: false` on every object
//! 2. every property listed in `required`, even optional ones
//! 3. no `$ref` indirection
//! 4. no `format` / numeric bound keywords (bounds are checked after parsing)

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Keywords strict mode rejects.
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "format",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "pattern",
];

/// Types usable as structured output.
///
/// Blanket-implemented for anything that is `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Schema for this type rewritten for strict structured-output mode.
    fn strict_schema() -> Value {
        let mut value = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        let definitions = match &mut value {
            Value::Object(map) => {
                map.remove("$schema");
                map.remove("title");
                map.remove("definitions")
            }
            _ => None,
        };

        if let Some(defs) = definitions {
            inline_refs(&mut value, &defs);
        }
        tighten(&mut value);
        value
    }

    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Replace every `{"$ref": "#/definitions/X"}` with the definition of X.
fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix(DEFINITIONS_PREFIX))
                .and_then(|name| definitions.get(name))
                .cloned();

            if let Some(mut def) = target {
                inline_refs(&mut def, definitions);
                *value = def;
                return;
            }

            for v in map.values_mut() {
                inline_refs(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

/// Close objects, require all properties, drop unsupported keywords.
fn tighten(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for keyword in UNSUPPORTED_KEYWORDS {
                map.remove(*keyword);
            }

            if is_object_schema(map) {
                map.insert("additionalProperties".into(), Value::Bool(false));
                if let Some(Value::Object(props)) = map.get("properties") {
                    let required = props.keys().cloned().map(Value::String).collect();
                    map.insert("required".into(), Value::Array(required));
                }
            }

            for (key, v) in map.iter_mut() {
                match (key.as_str(), v) {
                    // Property names are user data, not keywords.
                    ("properties", Value::Object(props)) => props.values_mut().for_each(tighten),
                    (_, v) => tighten(v),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                tighten(item);
            }
        }
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.iter().any(|t| t == "object"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Scores {
        joy: f64,
        anger: f64,
    }

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Classification {
        label: String,
        confidence: f64,
        scores: Scores,
        keywords: Vec<String>,
        note: Option<String>,
    }

    #[test]
    fn test_refs_are_inlined() {
        let schema = Classification::strict_schema();
        let obj = schema.as_object().unwrap();

        assert!(!obj.contains_key("definitions"));
        assert!(!obj.contains_key("$schema"));

        let scores = &schema["properties"]["scores"];
        assert!(scores.get("$ref").is_none());
        assert_eq!(scores["type"], "object");
        assert_eq!(scores["additionalProperties"], false);
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Classification::strict_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        for field in ["label", "confidence", "scores", "keywords", "note"] {
            assert!(required.contains(&field), "{field} should be required");
        }
    }

    #[test]
    fn test_format_keywords_removed() {
        let schema_str = serde_json::to_string(&Classification::strict_schema()).unwrap();
        assert!(!schema_str.contains("\"format\""));
        assert!(!schema_str.contains("\"minimum\""));
    }
}
