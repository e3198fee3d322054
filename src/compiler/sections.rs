//! Section detection
//!
//! Splits raw text into heading-delimited sections. A heading is a line that
//! starts with one or more `#` markers, then whitespace, then a title. Text
//! before the first heading is dropped.

use crate::domain::{DocumentId, Section};

/// Character that introduces a heading; repeated to express depth
pub const HEADING_MARKER: u8 = b'#';

/// Literal two-character escape that is treated as a line break
const ESCAPED_NEWLINE: &str = "\\n";

/// Replaces literal `\n` escapes with real line breaks
///
/// Pasted documents often arrive with their newlines still escaped. Both forms
/// must produce the same sections.
pub fn normalize_newlines(raw: &str) -> String {
    raw.replace(ESCAPED_NEWLINE, "\n")
}

/// Parses a heading line into `(level, title)`
///
/// Returns `None` for ordinary text, including marker runs with no separating
/// whitespace (`##NoSpace`) and markers followed only by whitespace.
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == HEADING_MARKER).count();
    if level == 0 {
        return None;
    }

    // Markers are ASCII, so `level` is a char boundary
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let title = rest.trim();
    if title.is_empty() {
        None
    } else {
        Some((level, title))
    }
}

/// Section being accumulated while scanning
struct OpenSection<'a> {
    title: &'a str,
    level: usize,
    body: Vec<&'a str>,
}

impl OpenSection<'_> {
    fn close(self, document: &DocumentId, sequence: u64) -> Section {
        let content = self
            .body
            .iter()
            .filter(|line| !line.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        Section::new(
            document.section_id(sequence),
            self.title,
            self.level,
            content.trim(),
        )
    }
}

/// Scans `raw` into sections in document order
///
/// Section IDs are allocated from `document` with 1-based sequences. Entities
/// are left empty.
pub fn detect_sections(raw: &str, document: &DocumentId) -> Vec<Section> {
    let normalized = normalize_newlines(raw);
    let mut sections = Vec::new();
    let mut open: Option<OpenSection<'_>> = None;

    for line in normalized.lines() {
        if let Some((level, title)) = parse_heading(line) {
            if let Some(section) = open.take() {
                let sequence = sections.len() as u64 + 1;
                sections.push(section.close(document, sequence));
            }
            open = Some(OpenSection {
                title,
                level,
                body: Vec::new(),
            });
        } else if let Some(section) = open.as_mut() {
            section.body.push(line);
        }
    }

    if let Some(section) = open {
        let sequence = sections.len() as u64 + 1;
        sections.push(section.close(document, sequence));
    }

    sections
}
