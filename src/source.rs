//! Config source model: paths, in-memory buffers and caller-owned readers.

use std::fmt;
use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

use encoding_rs::Encoding;

use crate::error::LoadError;

/// A caller-owned readable stream. The loader never closes it; after a
/// soft-failed speculative parse it is rewound to the start so the next
/// parser (or the caller) can re-read from the beginning.
pub trait SourceReader: Read + Seek {}

impl<T: Read + Seek> SourceReader for T {}

/// One supplier of configuration content.
pub enum ConfigSource {
    /// A file on disk. Must exist, be a regular file and fit the size limit.
    Path(PathBuf),
    /// In-memory text. Encoding parameters are ignored.
    Text(String),
    /// In-memory bytes, decoded with the caller's encoding label.
    Bytes(Vec<u8>),
    /// An open stream, read to the end and decoded like `Bytes`.
    Reader(Box<dyn SourceReader>),
}

impl ConfigSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ConfigSource::Path(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        ConfigSource::Text(text.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        ConfigSource::Bytes(bytes.into())
    }

    pub fn reader(reader: impl SourceReader + 'static) -> Self {
        ConfigSource::Reader(Box::new(reader))
    }

    /// Human-readable name for error messages and logs.
    pub fn display_name(&self) -> String {
        match self {
            ConfigSource::Path(path) => path.display().to_string(),
            ConfigSource::Text(_) => "<in-memory text>".to_string(),
            ConfigSource::Bytes(_) => "<in-memory bytes>".to_string(),
            ConfigSource::Reader(_) => "<reader>".to_string(),
        }
    }

    /// Read the full text content of the source.
    ///
    /// Paths, byte buffers and readers are decoded with the given encoding
    /// label (`None` means UTF-8); text buffers are returned as-is.
    pub(crate) fn read_text(&mut self, encoding: Option<&str>) -> Result<String, LoadError> {
        match self {
            ConfigSource::Path(path) => {
                let bytes = fs::read(&path)?;
                decode_bytes(&bytes, encoding)
            }
            ConfigSource::Text(text) => Ok(text.clone()),
            ConfigSource::Bytes(bytes) => decode_bytes(bytes, encoding),
            ConfigSource::Reader(reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer)?;
                decode_bytes(&buffer, encoding)
            }
        }
    }

    /// Seek a reader source back to its start. No-op for the other kinds.
    pub(crate) fn rewind(&mut self) -> Result<(), LoadError> {
        if let ConfigSource::Reader(reader) = self {
            reader.seek(SeekFrom::Start(0))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ConfigSource::Text(text) => {
                f.debug_tuple("Text").field(&format_args!("{} chars", text.len())).finish()
            }
            ConfigSource::Bytes(bytes) => {
                f.debug_tuple("Bytes").field(&format_args!("{} bytes", bytes.len())).finish()
            }
            ConfigSource::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl From<&std::path::Path> for ConfigSource {
    fn from(path: &std::path::Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

/// Decode raw bytes using an encoding_rs label. BOMs take precedence over
/// the label; malformed input is an error rather than replaced.
pub(crate) fn decode_bytes(bytes: &[u8], encoding: Option<&str>) -> Result<String, LoadError> {
    let label = encoding.unwrap_or("utf-8");
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| LoadError::UnknownEncoding { label: label.to_string() })?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(LoadError::Decode { encoding: used.name().to_string() });
    }
    Ok(text.into_owned())
}
