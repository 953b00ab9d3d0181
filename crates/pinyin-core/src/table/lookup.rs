//! Resolve a typed pinyin buffer against a phrase table.
//!
//! Keys are matched in four tiers, best first:
//!
//! 1. **Exact** — the key equals the buffer.
//! 2. **Prefix** — the key extends the buffer (`nih` → `nihao`).
//! 3. **Initials** — the buffer is a prefix of the key's initialism
//!    (`nh` → `nihao`). Only for consonant-only buffers of 2..=4 chars.
//! 4. **Subsequence** — the buffer's letters appear in order in the key,
//!    starting at its first letter (`nh` → `nanhai`). Same buffer
//!    restriction as initials.
//!
//! Within a tier keys are ordered by caller-supplied priority (higher first),
//! then by a closeness score (lower first), then by key. Phrases are emitted
//! in that key order, each phrase at most once.

use std::collections::{HashMap, HashSet};

use tracing::{debug, debug_span};

use super::PhraseTable;
use crate::unicode::{is_pinyin_initial, is_pinyin_vowel};

/// Characters after a syllable start within which a vowel must appear.
const VOWEL_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Exact,
    Prefix,
    Initials,
    Subsequence,
}

#[derive(Debug)]
struct RankedKey<'a> {
    key: &'a str,
    kind: MatchKind,
    score: usize,
    priority: i64,
}

/// Phrases for `buffer`, best first. `priority` boosts individual keys
/// within their match tier.
pub fn candidates<'t>(
    table: &'t PhraseTable,
    buffer: &str,
    priority: Option<&HashMap<String, i64>>,
) -> Vec<&'t str> {
    let _span = debug_span!("candidates", buffer).entered();

    let ranked = rank_keys(table, buffer, priority);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in &ranked {
        let Some(phrases) = table.get(item.key) else {
            continue;
        };
        for phrase in phrases {
            if seen.insert(phrase.as_str()) {
                out.push(phrase.as_str());
            }
        }
    }

    debug!(keys = ranked.len(), phrases = out.len());
    out
}

/// Matching keys with their tier, best first.
pub fn matching_keys<'t>(
    table: &'t PhraseTable,
    buffer: &str,
    priority: Option<&HashMap<String, i64>>,
) -> Vec<(&'t str, MatchKind)> {
    rank_keys(table, buffer, priority)
        .into_iter()
        .map(|r| (r.key, r.kind))
        .collect()
}

fn rank_keys<'t>(
    table: &'t PhraseTable,
    buffer: &str,
    priority: Option<&HashMap<String, i64>>,
) -> Vec<RankedKey<'t>> {
    let query: Vec<char> = buffer.chars().collect();
    let Some(&first) = query.first() else {
        return Vec::new();
    };

    let consonant_only = !query.iter().any(|&c| is_pinyin_vowel(c));
    let fuzzy = consonant_only && (2..=4).contains(&query.len());
    let priority_of = |key: &str| priority.and_then(|p| p.get(key)).copied().unwrap_or(0);

    let mut ranked = Vec::new();
    for key in table.keys() {
        let kind_score = if key == buffer {
            Some((MatchKind::Exact, 0))
        } else if !key.starts_with(first) {
            None
        } else if key.starts_with(buffer) {
            Some((MatchKind::Prefix, key.chars().count()))
        } else if fuzzy {
            fuzzy_match(key, &query)
        } else {
            None
        };

        if let Some((kind, score)) = kind_score {
            ranked.push(RankedKey {
                key,
                kind,
                score,
                priority: priority_of(key),
            });
        }
    }

    ranked.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.score.cmp(&b.score))
            .then_with(|| a.key.cmp(b.key))
    });
    ranked
}

/// Initials match, falling back to a subsequence match.
fn fuzzy_match(key: &str, query: &[char]) -> Option<(MatchKind, usize)> {
    let key_chars: Vec<char> = key.chars().collect();
    let key_len = key_chars.len();

    let initials = initialism(&key_chars);
    if initials.starts_with(query) {
        let exact_bonus = if initials.len() == query.len() { 0 } else { 200 };
        let extra = initials.len().saturating_sub(query.len());
        return Some((MatchKind::Initials, exact_bonus + extra * 50 + key_len));
    }

    let (first, last) = subsequence_bounds(&key_chars, query)?;
    if first > 0 {
        return None;
    }
    let span = last - first;
    let gaps = span + 1 - query.len();
    Some((MatchKind::Subsequence, span * 120 + gaps * 20 + key_len))
}

/// First letter plus every later letter that looks like the start of a
/// syllable: an initial consonant, not the `h` of `zh`/`ch`/`sh`, with a
/// vowel close behind.
pub fn initialism(key: &[char]) -> Vec<char> {
    let Some(&first) = key.first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    for i in 1..key.len() {
        if is_syllable_start(key, i) {
            out.push(key[i]);
        }
    }
    out
}

fn is_syllable_start(key: &[char], i: usize) -> bool {
    let c = key[i];
    if !is_pinyin_initial(c) {
        return false;
    }
    if c == 'h' && matches!(key[i - 1], 's' | 'z' | 'c') {
        return false;
    }
    let end = key.len().min(i + VOWEL_WINDOW);
    key[i..end].iter().any(|&c| is_pinyin_vowel(c))
}

/// Positions of the first and last matched character when `query` is a
/// subsequence of `key` (greedy, leftmost).
fn subsequence_bounds(key: &[char], query: &[char]) -> Option<(usize, usize)> {
    let mut qi = 0;
    let mut first = None;
    let mut last = 0;
    for (ti, &c) in key.iter().enumerate() {
        if qi == query.len() {
            break;
        }
        if c == query[qi] {
            first.get_or_insert(ti);
            last = ti;
            qi += 1;
        }
    }
    if qi == query.len() {
        first.map(|f| (f, last))
    } else {
        None
    }
}
