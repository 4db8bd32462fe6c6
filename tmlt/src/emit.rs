//! JSON emission in the typed form used by TOML conformance suites.
//!
//! Tables become plain JSON objects; everything else is wrapped in a
//! `{"type": ..., "value": ...}` pair so the consumer can distinguish TOML
//! kinds that JSON flattens (e.g. dates from strings).

use serde_json::{json, Map, Value};
use tmlc_par::{Doc, NodeKind};

/// Converts a parsed document node into its conformance JSON form.
pub fn to_json(doc: &Doc) -> Value {
    match doc.kind() {
        NodeKind::Table => {
            let mut object = Map::new();
            for child in doc.iter() {
                object.insert(child.name().to_string(), to_json(child));
            }
            Value::Object(object)
        }
        NodeKind::List => {
            let items: Vec<Value> = doc.iter().map(to_json).collect();
            json!({ "type": "array", "value": items })
        }
        NodeKind::Int => json!({ "type": "integer", "value": doc.as_int() }),
        NodeKind::Float => json!({ "type": "float", "value": doc.as_float() }),
        NodeKind::Str => json!({ "type": "string", "value": doc.as_str() }),
        NodeKind::Bool => json!({ "type": "bool", "value": doc.as_bool() }),
        NodeKind::Date => json!({ "type": "datetime", "value": doc.as_date().to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmlc_par::parse;

    fn emit(source: &str) -> Value {
        to_json(&parse(source.as_bytes()).unwrap())
    }

    #[test]
    fn test_empty_document_is_empty_object() {
        assert_eq!(emit(""), json!({}));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            emit("a = 1\nb = 1.5\nc = 'x'\nd = true"),
            json!({
                "a": { "type": "integer", "value": 1 },
                "b": { "type": "float", "value": 1.5 },
                "c": { "type": "string", "value": "x" },
                "d": { "type": "bool", "value": true },
            })
        );
    }

    #[test]
    fn test_array_wrapper() {
        assert_eq!(
            emit("x = [1, 2]"),
            json!({
                "x": { "type": "array", "value": [
                    { "type": "integer", "value": 1 },
                    { "type": "integer", "value": 2 },
                ]},
            })
        );
    }

    #[test]
    fn test_tables_nest_as_objects() {
        assert_eq!(
            emit("[a.b]\nc = 'd'"),
            json!({ "a": { "b": { "c": { "type": "string", "value": "d" } } } })
        );
    }

    #[test]
    fn test_datetime_rendering() {
        assert_eq!(
            emit("when = 1987-07-05T17:45:00Z"),
            json!({ "when": { "type": "datetime", "value": "1987-07-05T17:45:00Z" } })
        );
    }

    #[test]
    fn test_array_of_tables() {
        assert_eq!(
            emit("[[p]]\nn = 1\n[[p]]\nn = 2"),
            json!({
                "p": { "type": "array", "value": [
                    { "n": { "type": "integer", "value": 1 } },
                    { "n": { "type": "integer", "value": 2 } },
                ]},
            })
        );
    }
}
