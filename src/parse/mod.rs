//! Per-format parsers.
//!
//! Each backend reads the source's full text and tries to produce a JSON
//! object mapping. A syntax failure is hard (an error) only when the
//! declared format matches the parser; otherwise the parse was speculative
//! and the failure is soft: the source is rewound and `Ok(None)` is
//! returned so the resolver can try the next format. I/O and decode
//! failures are always hard.

pub(crate) mod json;
pub(crate) mod position;
pub(crate) mod toml;
pub(crate) mod yaml;

use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::source::ConfigSource;

/// `Ok(Some(map))` on success, `Ok(None)` on a soft failure.
pub(crate) type ParseOutcome = Result<Option<Map<String, Value>>, LoadError>;

/// Rewind the source and signal "no result" to the resolver.
pub(crate) fn soft_fail(source: &mut ConfigSource) -> ParseOutcome {
    source.rewind()?;
    Ok(None)
}
