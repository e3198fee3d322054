//! Document input
//!
//! Reads a document from a file or stdin and hands the compiler decoded text.
//! Size limits, binary detection and UTF-8 decoding all happen here; the
//! compiler itself accepts any string.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use thiserror::Error;

use crate::storage::InputConfig;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {source_name}")]
    Io {
        source_name: String,
        #[source]
        error: io::Error,
    },

    #[error("{source_name} exceeds the {limit}-byte input limit")]
    TooLarge { source_name: String, limit: u64 },

    #[error("{0} looks like a binary file; only plain text documents are supported")]
    Binary(String),

    #[error("{0} is not valid UTF-8")]
    Encoding(String),
}

/// Where a document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Maps an optional CLI argument to a source; absent or `-` means stdin
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads at most `limit + 1` bytes so oversized input is detected without
/// buffering all of it
fn read_bounded(reader: impl Read, limit: u64) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Validates raw bytes against the limits and decodes them
pub fn decode(bytes: Vec<u8>, source_name: &str, limits: &InputConfig) -> Result<String, InputError> {
    if bytes.len() as u64 > limits.max_bytes {
        return Err(InputError::TooLarge {
            source_name: source_name.to_string(),
            limit: limits.max_bytes,
        });
    }

    if limits.reject_binary && bytes.contains(&0) {
        return Err(InputError::Binary(source_name.to_string()));
    }

    let mut text = String::from_utf8(bytes).map_err(|_| InputError::Encoding(source_name.to_string()))?;

    // A leading byte-order mark is an encoding artifact, not document text
    if text.starts_with('\u{feff}') {
        text.replace_range(..'\u{feff}'.len_utf8(), "");
    }

    Ok(text)
}

/// Reads and decodes a document from `source`
pub fn read_document(source: &InputSource, limits: &InputConfig) -> Result<String, InputError> {
    let source_name = source.to_string();
    let io_error = |error| InputError::Io {
        source_name: source_name.clone(),
        error,
    };

    let bytes = match source {
        InputSource::Stdin => read_bounded(io::stdin().lock(), limits.max_bytes),
        InputSource::File(path) => File::open(path).and_then(|file| read_bounded(file, limits.max_bytes)),
    }
    .map_err(io_error)?;

    tracing::debug!(source = %source_name, bytes = bytes.len(), "read document");
    decode(bytes, &source_name, limits)
}
