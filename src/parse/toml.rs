//! TOML/INI backend (toml crate).
//!
//! TOML values are converted into the JSON value model; datetimes become
//! strings and non-finite floats become null.

use serde_json::{Map, Value};

use crate::error::{LoadError, ParseDiagnostic};
use crate::format::ConfigFormat;
use crate::source::ConfigSource;

use super::position::line_col;
use super::{soft_fail, ParseOutcome};

pub(crate) fn parse(
    source: &mut ConfigSource,
    declared: ConfigFormat,
    encoding: Option<&str>,
) -> ParseOutcome {
    let text = source.read_text(encoding)?;
    match ::toml::from_str::<::toml::Table>(&text) {
        Ok(table) => Ok(Some(table_to_json(table))),
        Err(err) if declared == ConfigFormat::Toml => {
            let position = err.span().map(|span| span.start);
            let (line, column) = match position {
                Some(offset) => {
                    let (line, column) = line_col(&text, offset);
                    (Some(line), Some(column))
                }
                None => (None, None),
            };
            Err(LoadError::Syntax(ParseDiagnostic {
                message: err.message().to_string(),
                document: Some(text),
                position,
                line,
                column,
            }))
        }
        Err(_) => soft_fail(source),
    }
}

fn table_to_json(table: ::toml::Table) -> Map<String, Value> {
    table.into_iter().map(|(key, value)| (key, value_to_json(value))).collect()
}

fn value_to_json(value: ::toml::Value) -> Value {
    match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::Number(i.into()),
        ::toml::Value::Float(f) => {
            serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
        }
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        ::toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(value_to_json).collect())
        }
        ::toml::Value::Table(table) => Value::Object(table_to_json(table)),
    }
}
