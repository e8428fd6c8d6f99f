//! Format resolver: speculative parsing with ordered fallback.
//!
//! The effective format (declared, or detected from a path suffix) orders
//! the parser attempts. Each attempt passes the effective format down as
//! the declared format, so only the matching parser fails hard; the other
//! parsers fail soft and the next one is tried with the source rewound.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::LoadError;
use crate::format::{detect_format, ConfigFormat};
use crate::parse;
use crate::source::ConfigSource;

/// Default ceiling on config file size: 1 GiB.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Load one config source into a JSON object mapping.
///
/// Path sources are resolved to an absolute path and checked for
/// existence, regular-file-ness and the size limit (`None` means
/// [`MAX_CONFIG_FILE_SIZE`]) before any parsing. A failure of the parser
/// matching the effective format is terminal; if every parser fails
/// speculatively the source is reported as unrecognized.
pub fn load_map_from_source(
    source: &mut ConfigSource,
    format: ConfigFormat,
    encoding: Option<&str>,
    max_size: Option<u64>,
) -> Result<Map<String, Value>, LoadError> {
    let limit = max_size.unwrap_or(MAX_CONFIG_FILE_SIZE);

    let effective = match source {
        ConfigSource::Path(path) => {
            let resolved = resolve_path(path, limit)?;
            *path = resolved;
            if format == ConfigFormat::Infer {
                detect_format(path)
            } else {
                format
            }
        }
        // Streams and buffers have no suffix; Infer stays unresolved and
        // every parser runs speculatively.
        _ => format,
    };

    for candidate in effective.fallback_order() {
        let outcome = match candidate {
            ConfigFormat::Json => parse::json::parse(source, effective, encoding)?,
            ConfigFormat::Toml => parse::toml::parse(source, effective, encoding)?,
            ConfigFormat::Yaml => parse::yaml::parse(source, effective, encoding)?,
            ConfigFormat::Infer | ConfigFormat::Unknown => None,
        };
        match outcome {
            Some(map) => {
                debug!(
                    format = candidate.as_str(),
                    source = %source.display_name(),
                    "parsed config source"
                );
                return Ok(map);
            }
            None => debug!(
                format = candidate.as_str(),
                source = %source.display_name(),
                "speculative parse failed, trying next format"
            ),
        }
    }

    // Best-effort excerpt; the last soft failure left the source rewound.
    let document = source.read_text(encoding).unwrap_or_default();
    Err(LoadError::Unrecognized { name: source.display_name(), document })
}

fn resolve_path(path: &Path, limit: u64) -> Result<PathBuf, LoadError> {
    let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let metadata = match fs::metadata(&resolved) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound { path: resolved })
        }
        Err(err) => return Err(LoadError::Io(err)),
    };
    if metadata.is_dir() {
        return Err(LoadError::IsADirectory { path: resolved });
    }
    let size = metadata.len();
    if size > limit {
        return Err(LoadError::TooLarge { path: resolved, size, limit });
    }
    Ok(resolved)
}
