//! Config format tags, suffix detection and the parser fallback order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::LoadError;

/// Declared or detected data format of a config source.
///
/// `Infer` and `Unknown` are pseudo-formats steering resolution: neither
/// names a parser, so under both every parser is tried speculatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
    #[default]
    Infer,
    Unknown,
}

impl ConfigFormat {
    /// The real formats a source can resolve to.
    pub const RECOGNIZED: [ConfigFormat; 3] =
        [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Infer => "infer",
            ConfigFormat::Unknown => "unknown",
        }
    }

    /// Parser try-order for an effective format: the format's own parser
    /// first, then the remaining real formats as json, toml, yaml.
    pub fn fallback_order(self) -> [ConfigFormat; 3] {
        match self {
            ConfigFormat::Toml => {
                [ConfigFormat::Toml, ConfigFormat::Json, ConfigFormat::Yaml]
            }
            ConfigFormat::Yaml => {
                [ConfigFormat::Yaml, ConfigFormat::Json, ConfigFormat::Toml]
            }
            ConfigFormat::Json | ConfigFormat::Infer | ConfigFormat::Unknown => {
                [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml]
            }
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" => Ok(ConfigFormat::Yaml),
            "infer" => Ok(ConfigFormat::Infer),
            "unknown" => Ok(ConfigFormat::Unknown),
            other => Err(LoadError::InvalidFormat(other.to_string())),
        }
    }
}

/// Map a file-name suffix to its config format, case-insensitively.
/// No I/O: the path is never touched.
pub fn detect_format(path: &Path) -> ConfigFormat {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return ConfigFormat::Unknown;
    };
    match extension.to_ascii_lowercase().as_str() {
        "json" | "jsn" => ConfigFormat::Json,
        "toml" | "tml" | "ini" | "config" | "cfg" => ConfigFormat::Toml,
        "yaml" | "yml" => ConfigFormat::Yaml,
        _ => ConfigFormat::Unknown,
    }
}
