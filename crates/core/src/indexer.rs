//! Keyword-anchored passage extraction.
//!
//! For every document line containing a keyword, the surrounding window of
//! two lines on each side is collected. Windows overlap freely and the
//! result is deduplicated as a set, so excerpt ordering carries no meaning
//! with respect to the original document.

use std::collections::BTreeSet;

use crate::document::Document;
use crate::keywords::KeywordSet;

/// Character budget applied to the joined excerpt before it is embedded in a
/// responder prompt. Reflects the context-window constraint of the backend;
/// truncation is by character count and may end mid-line.
pub const EXCERPT_CHAR_BUDGET: usize = 4000;

/// Deduplicated, unordered collection of document lines (plus fixed-window
/// context) that matched a keyword set. Callers must not depend on ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Excerpt {
    lines: BTreeSet<String>,
}

impl Excerpt {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn joined(&self) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }

    /// First `budget` characters of the joined text.
    pub fn truncated(&self, budget: usize) -> String {
        let joined = self.joined();
        if joined.chars().count() <= budget {
            return joined;
        }
        joined.chars().take(budget).collect()
    }
}

/// Extracts every line matching the keyword set together with up to two
/// preceding and two following lines, clamped at both document edges.
pub fn extract_excerpt(document: &Document, keywords: &KeywordSet) -> Excerpt {
    let mut lines = BTreeSet::new();
    if keywords.is_empty() || document.is_empty() {
        return Excerpt { lines };
    }

    let last_index = document.len() - 1;
    for (index, line) in document.lines().iter().enumerate() {
        if !keywords.matches_line(line) {
            continue;
        }
        let start = index.saturating_sub(2);
        let end = (index + 2).min(last_index);
        for context_index in start..=end {
            if let Some(context_line) = document.line(context_index) {
                lines.insert(context_line.to_owned());
            }
        }
    }

    Excerpt { lines }
}
