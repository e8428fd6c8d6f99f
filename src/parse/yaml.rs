//! YAML backend (serde_yaml, safe-load semantics: tags carry no execution).
//!
//! YAML values are converted into the JSON value model: non-string keys are
//! rendered as strings, tagged values are unwrapped to their inner value,
//! non-finite floats become null.

use serde_json::{Map, Value};

use crate::error::{LoadError, ParseDiagnostic};
use crate::format::ConfigFormat;
use crate::source::ConfigSource;

use super::{soft_fail, ParseOutcome};

pub(crate) fn parse(
    source: &mut ConfigSource,
    declared: ConfigFormat,
    encoding: Option<&str>,
) -> ParseOutcome {
    let text = source.read_text(encoding)?;
    match serde_yaml::from_str::<serde_yaml::Value>(&text) {
        Ok(serde_yaml::Value::Mapping(mapping)) => Ok(Some(mapping_to_json(mapping))),
        Ok(_) if declared == ConfigFormat::Yaml => Err(LoadError::Syntax(ParseDiagnostic {
            message: "top-level YAML value is not a mapping".to_string(),
            document: Some(text),
            ..Default::default()
        })),
        Ok(_) => soft_fail(source),
        Err(err) if declared == ConfigFormat::Yaml => {
            let location = err.location();
            Err(LoadError::Syntax(ParseDiagnostic {
                message: err.to_string(),
                document: Some(text),
                position: location.as_ref().map(|l| l.index()),
                line: location.as_ref().map(|l| l.line()),
                column: location.as_ref().map(|l| l.column()),
            }))
        }
        Err(_) => soft_fail(source),
    }
}

fn mapping_to_json(mapping: serde_yaml::Mapping) -> Map<String, Value> {
    mapping.into_iter().map(|(key, value)| (key_to_string(key), value_to_json(value))).collect()
}

// JSON object keys are strings; YAML allows any scalar as a key.
fn key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn value_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number_to_json(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(value_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Object(mapping_to_json(mapping)),
        serde_yaml::Value::Tagged(tagged) => value_to_json(tagged.value),
    }
}

fn number_to_json(number: &serde_yaml::Number) -> Value {
    if let Some(i) = number.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = number.as_u64() {
        Value::Number(u.into())
    } else {
        number
            .as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
