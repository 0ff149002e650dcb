//! Style keyword stripping for folder names.
//!
//! The keyword list is loaded once and compiled into a single case-insensitive
//! alternation (longest keywords first) so "Extra Bold" is removed whole
//! before "Bold" gets a chance to match inside it.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::errors::{Result, SortError};

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]").expect("valid regex"));
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Immutable keyword matcher shared by every file of a run.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    pattern: Option<Regex>,
}

impl KeywordFilter {
    /// Build a filter from keywords in any order.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect();
        // Stable sort keeps file order among equal lengths.
        keywords.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        keywords.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        let pattern = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                .map_err(|e| SortError::InvalidConfig(format!("keyword pattern: {e}")))?;
            Some(re)
        };

        Ok(Self { keywords, pattern })
    }

    /// Load keywords from a file: one per line, blank lines and `#` comments ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SortError::InvalidConfig(format!("read keyword file '{}': {e}", path.display())))?;
        let filter = Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )?;
        debug!(path = %path.display(), count = filter.keywords.len(), "loaded style keywords");
        Ok(filter)
    }

    /// Keywords in matching order (longest first).
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Strip style keywords from `family` and title-case the result.
    ///
    /// Never returns an empty string for non-empty input: when every word is a
    /// keyword, the space-normalized family comes back unfiltered.
    pub fn strip(&self, family: &str) -> String {
        let normalized = PUNCTUATION.replace_all(family, " ");
        let normalized = collapse_spaces(&normalized);

        let stripped = match &self.pattern {
            Some(re) => collapse_spaces(&re.replace_all(&normalized, "")),
            None => normalized.clone(),
        };

        let base = if stripped.is_empty() { normalized } else { stripped };
        title_case(&base)
    }
}

fn collapse_spaces(s: &str) -> String {
    SPACE_RUNS.replace_all(s, " ").trim().to_owned()
}

/// Title-case like most scripting languages do: a letter is upper-cased when
/// it follows a non-letter, lower-cased otherwise ("DIN pro" -> "Din Pro").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}
