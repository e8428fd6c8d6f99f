//! Multi-source loader: ordered layers merged under an error policy.

use std::fmt;
use std::fs;
use std::io;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::format::ConfigFormat;
use crate::load::load_map_from_source;
use crate::merge::deep_update;
use crate::source::ConfigSource;

/// What to do when loading a source fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Print the diagnostic context and terminate the process.
    Abort,
    /// Skip the failing source and continue with the rest.
    Ignore,
    /// Return the error to the caller.
    #[default]
    Propagate,
}

impl ErrorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Ignore => "ignore",
            ErrorPolicy::Propagate => "propagate",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "ignore" => Ok(ErrorPolicy::Ignore),
            "propagate" => Ok(ErrorPolicy::Propagate),
            other => Err(LoadError::InvalidPolicy(other.to_string())),
        }
    }
}

/// Load an ordered list of config sources and deep-merge them into one
/// mapping, later sources overriding or extending earlier ones.
///
/// Path sources that do not name an existing regular file are silently
/// skipped under every policy: a missing layer has no overrides and that
/// is a valid state. Buffer and reader sources are always attempted.
///
/// Syntax, unrecognized-format and resource errors are handled per the
/// policy. Merge-depth, decode and encoding-label errors bypass the
/// policy and always come back to the caller. `None` sources follow the
/// policy as well: `Abort` terminates, `Propagate` returns
/// [`LoadError::NoSource`], `Ignore` yields an empty mapping.
pub fn load_merged(
    sources: Option<&mut [ConfigSource]>,
    format: ConfigFormat,
    encoding: Option<&str>,
    policy: ErrorPolicy,
) -> Result<Map<String, Value>, LoadError> {
    let Some(sources) = sources else {
        return match policy {
            ErrorPolicy::Abort => abort_with(&LoadError::NoSource),
            ErrorPolicy::Propagate => Err(LoadError::NoSource),
            ErrorPolicy::Ignore => Ok(Map::new()),
        };
    };

    let mut merged = Map::new();
    for source in sources.iter_mut() {
        if let ConfigSource::Path(path) = &*source {
            match fs::metadata(path) {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => {
                    debug!(path = %path.display(), "skipping config path that is not a regular file");
                    continue;
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "skipping missing config layer");
                    continue;
                }
                // Permission errors surface instead of counting as absent.
                Err(err) => {
                    apply_policy(LoadError::Io(err), policy)?;
                    continue;
                }
            }
        }
        match load_map_from_source(source, format, encoding, None) {
            Ok(map) => deep_update(&mut merged, &map)?,
            Err(err) => {
                apply_policy(err, policy)?;
                continue;
            }
        }
    }
    Ok(merged)
}

/// Load and merge the sources, then construct a typed settings value from
/// the merged mapping with serde.
///
/// Construction failures follow the same policy; under `Ignore` the
/// settings fall back to deserializing an empty mapping, so serde
/// defaults apply.
pub fn load_settings<T: DeserializeOwned>(
    sources: Option<&mut [ConfigSource]>,
    format: ConfigFormat,
    encoding: Option<&str>,
    policy: ErrorPolicy,
) -> Result<T, LoadError> {
    let merged = load_merged(sources, format, encoding, policy)?;
    match serde_json::from_value(Value::Object(merged)) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            let err = LoadError::Settings(err);
            match policy {
                ErrorPolicy::Abort => abort_with(&err),
                ErrorPolicy::Propagate => Err(err),
                ErrorPolicy::Ignore => {
                    warn!(error = %err, "ignoring settings construction failure, using defaults");
                    serde_json::from_value(Value::Object(Map::new()))
                        .map_err(LoadError::Settings)
                }
            }
        }
    }
}

/// Policy-gated errors may be swallowed (`Ok(())`, caller continues) or
/// printed-and-aborted; everything else propagates regardless of policy.
fn apply_policy(err: LoadError, policy: ErrorPolicy) -> Result<(), LoadError> {
    if !policy_gated(&err) {
        return Err(err);
    }
    match policy {
        ErrorPolicy::Abort => abort_with(&err),
        ErrorPolicy::Propagate => Err(err),
        ErrorPolicy::Ignore => {
            warn!(error = %err, "ignoring config source that failed to load");
            Ok(())
        }
    }
}

fn policy_gated(err: &LoadError) -> bool {
    matches!(
        err,
        LoadError::Syntax(_)
            | LoadError::Unrecognized { .. }
            | LoadError::Io(_)
            | LoadError::NotFound { .. }
            | LoadError::IsADirectory { .. }
            | LoadError::TooLarge { .. }
    )
}

fn abort_with(err: &LoadError) -> ! {
    match err {
        LoadError::Syntax(diagnostic) => {
            eprintln!("{}", diagnostic.message);
            if let Some(document) = &diagnostic.document {
                eprintln!("Context:\n{document}");
            }
            eprintln!(
                "Position = {}, line = {}, column = {}",
                display_opt(diagnostic.position),
                display_opt(diagnostic.line),
                display_opt(diagnostic.column)
            );
        }
        LoadError::Unrecognized { document, .. } => {
            eprintln!("{err}");
            eprintln!("Context:\n{document}");
        }
        other => eprintln!("{other}"),
    }
    eprintln!("Abort!");
    std::process::exit(1);
}

fn display_opt(value: Option<usize>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
