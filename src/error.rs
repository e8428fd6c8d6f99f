//! Error types for the loading and merging pipeline.
//!
//! All three parsing backends report failures through the same
//! [`ParseDiagnostic`] record; which position fields are populated depends
//! on what the backend exposes.

use std::fmt;
use std::path::PathBuf;

/// Uniform syntax-error record produced by the per-format parsers.
///
/// `message` is always present. The remaining fields are best-effort:
/// serde_json supplies 1-based line/column, toml a byte offset (line and
/// column are derived from the document), serde_yaml all three.
#[derive(Debug, Clone, Default)]
pub struct ParseDiagnostic {
    /// Backend error message describing the syntax problem.
    pub message: String,
    /// Full document text that was being parsed, when it could be read back.
    pub document: Option<String>,
    /// Byte offset of the error, counted from the document start.
    pub position: Option<usize>,
    /// 1-based line number of the error.
    pub line: Option<usize>,
    /// 1-based column number of the error.
    pub column: Option<usize>,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " (line {line}, column {column})")?;
        }
        Ok(())
    }
}

/// Deep-merge failures. Never policy-gated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("merge exceeded the maximum nesting depth of {limit}; flatten the source config")]
    TooDeep { limit: usize },
}

/// Everything that can go wrong while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No source was supplied to the multi-source loader.
    #[error("no configuration source was provided")]
    NoSource,

    /// Textual error-handling policy that is not abort, ignore or propagate.
    #[error("invalid error-handling policy '{0}'; expected one of: abort, ignore, propagate")]
    InvalidPolicy(String),

    /// Textual format name outside the known set.
    #[error("invalid config format '{0}'; expected one of: json, toml, yaml, infer, unknown")]
    InvalidFormat(String),

    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("config path is a directory, not a file: {}", .path.display())]
    IsADirectory { path: PathBuf },

    #[error("config file {} is {size} bytes, exceeding the maximum allowed size of {limit} bytes", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("failed reading config source")]
    Io(#[from] std::io::Error),

    /// Encoding label not known to encoding_rs.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// Source bytes are malformed for the declared encoding.
    #[error("source bytes are not valid {encoding}")]
    Decode { encoding: String },

    /// A parser matching the declared format rejected the document.
    #[error("{0}")]
    Syntax(ParseDiagnostic),

    /// Every parser failed speculatively; the content matches no known format.
    #[error("format of config source {name} could not be determined to be one of [json, toml, yaml]")]
    Unrecognized { name: String, document: String },

    /// The merged mapping could not be deserialized into the settings type.
    #[error("failed constructing settings from merged config: {0}")]
    Settings(#[source] serde_json::Error),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl LoadError {
    /// The syntax diagnostic carried by this error, if any.
    pub fn diagnostic(&self) -> Option<&ParseDiagnostic> {
        match self {
            LoadError::Syntax(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}
