//! confstack: layered configuration loading for JSON, TOML/INI and YAML.
//!
//! Config sources (files, readers or in-memory buffers) are parsed into a
//! single `serde_json` mapping, with format auto-detection from file
//! suffixes, speculative multi-format parsing fallback and a type-aware
//! deep merge across layers. The merged mapping can be handed to serde to
//! construct typed settings. The crate does no validation of its own.
//!
//! ```
//! use confstack::{load_merged, ConfigFormat, ConfigSource, ErrorPolicy};
//!
//! let mut sources = [
//!     ConfigSource::text(r#"{"runserver": {"port": 1111}}"#),
//!     ConfigSource::text("runserver:\n  nested_list: [1, 2]\n"),
//! ];
//! let merged = load_merged(
//!     Some(&mut sources),
//!     ConfigFormat::Infer,
//!     None,
//!     ErrorPolicy::Propagate,
//! )?;
//! assert_eq!(merged["runserver"]["port"], 1111);
//! assert_eq!(merged["runserver"]["nested_list"][0], 1);
//! # Ok::<(), confstack::LoadError>(())
//! ```

pub mod error;
pub mod format;
pub mod load;
pub mod merge;
mod parse;
pub mod source;
pub mod stack;

pub use error::{LoadError, MergeError, ParseDiagnostic};
pub use format::{detect_format, ConfigFormat};
pub use load::{load_map_from_source, MAX_CONFIG_FILE_SIZE};
pub use merge::{deep_update, MAX_MERGE_DEPTH};
pub use source::{ConfigSource, SourceReader};
pub use stack::{load_merged, load_settings, ErrorPolicy};
