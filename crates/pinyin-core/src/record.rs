//! Raw dictionary line parsing.
//!
//! Source format (rime `*.dict.yaml` body): `phrase\tpinyin[\tweight]`.
//! YAML headers, comments and document delimiters are skipped.

use crate::config::FilterSettings;
use crate::unicode::{is_ideographic_phrase, is_pinyin_spelling};

/// Weight assigned when the third column is absent or not a number.
pub const DEFAULT_WEIGHT: u64 = 1;

/// One accepted dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub phrase: String,
    pub pinyin: String,
    pub weight: u64,
}

/// Line parser holding the phrase length filter.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    min_phrase_chars: usize,
    max_phrase_chars: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self {
            min_phrase_chars: 2,
            max_phrase_chars: 6,
        }
    }
}

impl From<&FilterSettings> for RecordParser {
    fn from(filter: &FilterSettings) -> Self {
        Self {
            min_phrase_chars: filter.min_phrase_chars,
            max_phrase_chars: filter.max_phrase_chars,
        }
    }
}

impl RecordParser {
    /// Parse one raw line. Returns `None` for anything that is not a usable
    /// phrase record — callers should skip the line.
    pub fn parse_line(&self, raw: &str) -> Option<Record> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line == "---" || line == "..." {
            return None;
        }
        if !line.contains('\t') {
            return None;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return None;
        }

        let phrase = fields[0].trim();
        if !is_ideographic_phrase(phrase, self.min_phrase_chars, self.max_phrase_chars) {
            return None;
        }
        let pinyin = fields[1].trim();
        if !is_pinyin_spelling(pinyin) {
            return None;
        }

        Some(Record {
            phrase: phrase.to_string(),
            pinyin: pinyin.to_string(),
            weight: parse_weight(&fields),
        })
    }
}

/// Parse one raw line with the default 2..=6 phrase length filter.
pub fn parse_line(raw: &str) -> Option<Record> {
    RecordParser::default().parse_line(raw)
}

/// Weight from field `[2]`: all ASCII digits → value (at least 1, saturating
/// at `u64::MAX`); anything else → [`DEFAULT_WEIGHT`].
///
/// A literal `0` is raised to 1, so it ties with a missing or non-numeric
/// weight.
fn parse_weight(fields: &[&str]) -> u64 {
    let Some(raw) = fields.get(2).map(|f| f.trim()) else {
        return DEFAULT_WEIGHT;
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_WEIGHT;
    }
    raw.parse::<u64>().unwrap_or(u64::MAX).max(DEFAULT_WEIGHT)
}
