//! Keyword-based entity extraction
//!
//! Three fixed vocabularies (English and Indonesian) classify words as actors,
//! systems or features. Matching is whole-word and case-insensitive.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{EntityBundle, EntitySet};

/// Keywords naming people or roles
pub const ACTOR_KEYWORDS: &[&str] = &[
    "user",
    "admin",
    "administrator",
    "developer",
    "customer",
    "manager",
    "operator",
    "guest",
    "pengguna",
    "pelanggan",
    "pengembang",
    "pengelola",
    "tamu",
];

/// Keywords naming technical systems
pub const SYSTEM_KEYWORDS: &[&str] = &[
    "system",
    "database",
    "api",
    "service",
    "server",
    "platform",
    "application",
    "backend",
    "frontend",
    "sistem",
    "aplikasi",
    "layanan",
    "basis data",
];

/// Keywords naming product capabilities
pub const FEATURE_KEYWORDS: &[&str] = &[
    "feature",
    "module",
    "function",
    "functionality",
    "component",
    "capability",
    "fitur",
    "fungsi",
    "modul",
    "komponen",
];

/// Entity categories recognised by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Actor,
    System,
    Feature,
}

impl EntityCategory {
    pub fn all() -> &'static [EntityCategory] {
        &[
            EntityCategory::Actor,
            EntityCategory::System,
            EntityCategory::Feature,
        ]
    }

    /// The fixed vocabulary for this category
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            EntityCategory::Actor => ACTOR_KEYWORDS,
            EntityCategory::System => SYSTEM_KEYWORDS,
            EntityCategory::Feature => FEATURE_KEYWORDS,
        }
    }

    fn matcher(&self) -> &'static KeywordMatcher {
        match self {
            EntityCategory::Actor => &ACTOR_MATCHER,
            EntityCategory::System => &SYSTEM_MATCHER,
            EntityCategory::Feature => &FEATURE_MATCHER,
        }
    }
}

/// Compiled vocabulary for one category
///
/// Each keyword gets its own capture group, so a match reports the
/// vocabulary spelling rather than the matched text. Case folding is
/// Unicode-aware: `ſystem` matches and is recorded as `system`.
struct KeywordMatcher {
    regex: Regex,
    /// Keywords in group order (group `i + 1` is `keywords[i]`)
    keywords: Vec<&'static str>,
}

impl KeywordMatcher {
    /// Builds `(?i)\b(?:(kw1)|(kw2)|...)\b`, longest keywords first
    fn new(vocabulary: &[&'static str]) -> Self {
        let mut keywords = vocabulary.to_vec();
        keywords.sort_by_key(|kw| std::cmp::Reverse(kw.len()));

        let alternation = keywords
            .iter()
            .map(|kw| format!("({})", regex::escape(kw)))
            .collect::<Vec<_>>()
            .join("|");

        let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
            .expect("keyword vocabulary compiles to a valid pattern");

        Self { regex, keywords }
    }

    /// Canonical keywords matched in `text`, in text order
    fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'static str> + 't {
        self.regex.captures_iter(text).filter_map(|caps| {
            caps.iter()
                .skip(1)
                .position(|group| group.is_some())
                .map(|index| self.keywords[index])
        })
    }
}

static ACTOR_MATCHER: LazyLock<KeywordMatcher> = LazyLock::new(|| KeywordMatcher::new(ACTOR_KEYWORDS));
static SYSTEM_MATCHER: LazyLock<KeywordMatcher> = LazyLock::new(|| KeywordMatcher::new(SYSTEM_KEYWORDS));
static FEATURE_MATCHER: LazyLock<KeywordMatcher> = LazyLock::new(|| KeywordMatcher::new(FEATURE_KEYWORDS));

/// Collects every whole-word match of one category, in text order
pub fn extract_category(text: &str, category: EntityCategory) -> EntitySet {
    category.matcher().find_iter(text).collect()
}

/// Classifies `text` into actors, systems and features
pub fn extract_entities(text: &str) -> EntityBundle {
    EntityBundle {
        actors: extract_category(text, EntityCategory::Actor),
        systems: extract_category(text, EntityCategory::System),
        features: extract_category(text, EntityCategory::Feature),
    }
}
