//! JSON backend (serde_json).

use serde_json::Value;

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
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) if declared == ConfigFormat::Json => Err(LoadError::Syntax(ParseDiagnostic {
            message: "top-level JSON value is not an object".to_string(),
            document: Some(text),
            ..Default::default()
        })),
        Ok(_) => soft_fail(source),
        Err(err) if declared == ConfigFormat::Json => {
            // serde_json reports 0 for line/column when it has no location.
            Err(LoadError::Syntax(ParseDiagnostic {
                message: err.to_string(),
                document: Some(text),
                position: None,
                line: Some(err.line()).filter(|&line| line > 0),
                column: Some(err.column()).filter(|&column| column > 0),
            }))
        }
        Err(_) => soft_fail(source),
    }
}
