//! Identifiers for compiled documents and their sections
//!
//! ID Format:
//! - Document IDs: `d-{7-char-hash}` (e.g., `d-7f2b4c1`)
//! - Section IDs: `{document-id}.{sequence}` (e.g., `d-7f2b4c1.3`)
//!
//! The hash is derived from the raw text and the compile timestamp, so the same
//! document compiled twice gets two distinct IDs. Sequences are 1-based and
//! follow document order, which keeps section IDs unique within a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid document ID format: expected 'd-{{7-char-hash}}', got '{0}'")]
    InvalidDocumentId(String),

    #[error("Invalid section ID format: expected '{{document-id}}.{{sequence}}', got '{0}'")]
    InvalidSectionId(String),

    #[error("Invalid sequence number: {0}")]
    InvalidSequence(String),
}

/// Generates a 7-character hash from document text and timestamp
fn generate_hash(text: &str, timestamp: DateTime<Utc>) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(text.as_bytes());
    hasher.update(&timestamp.timestamp_nanos_opt().unwrap_or(0).to_le_bytes());
    let hex = hasher.finalize().to_hex();
    hex[..7].to_string()
}

fn is_valid_hash(hash: &str) -> bool {
    hash.len() == 7 && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// Document ID in the format `d-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId {
    hash: String,
}

impl DocumentId {
    /// Creates a document ID from the raw text and the compile timestamp
    pub fn new(text: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(text, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Creates the ID of the section at `sequence` (1-based) in this document
    pub fn section_id(&self, sequence: u64) -> SectionId {
        SectionId {
            document: self.clone(),
            sequence,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d-{}", self.hash)
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("d-") {
            Some(hash) if is_valid_hash(hash) => Ok(Self {
                hash: hash.to_ascii_lowercase(),
            }),
            _ => Err(IdError::InvalidDocumentId(s.to_string())),
        }
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}

/// Section ID - `{document-id}.{sequence}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId {
    document: DocumentId,
    sequence: u64,
}

impl SectionId {
    /// Returns the document this section belongs to
    pub fn document_id(&self) -> &DocumentId {
        &self.document
    }

    /// Returns the 1-based position of the section in document order
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.document, self.sequence)
    }
}

impl FromStr for SectionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (doc, seq) = s
            .split_once('.')
            .ok_or_else(|| IdError::InvalidSectionId(s.to_string()))?;

        let document: DocumentId = doc
            .parse()
            .map_err(|_| IdError::InvalidSectionId(s.to_string()))?;

        let sequence = seq
            .parse::<u64>()
            .map_err(|_| IdError::InvalidSequence(seq.to_string()))?;

        Ok(Self { document, sequence })
    }
}

impl TryFrom<String> for SectionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.to_string()
    }
}
