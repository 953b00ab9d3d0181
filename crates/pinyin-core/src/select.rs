//! Bounded, deterministic selection of the final table.
//!
//! Keys are ranked by best weight (desc), key length (asc), key (asc);
//! phrases within a key by weight (desc), phrase (asc). Both orders are
//! total, so the same aggregate always yields the same table.

use std::cmp::Ordering;

use tracing::{debug, debug_span};

use crate::aggregate::{Aggregate, KeyAggregate};
use crate::config::LimitSettings;
use crate::table::PhraseTable;

/// Output bounds for [`select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_keys: usize,
    pub max_phrases_per_key: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_keys: 120_000,
            max_phrases_per_key: 10,
        }
    }
}

impl From<&LimitSettings> for Limits {
    fn from(s: &LimitSettings) -> Self {
        Self {
            max_keys: s.max_keys,
            max_phrases_per_key: s.max_phrases_per_key,
        }
    }
}

fn key_order(a: (&str, &KeyAggregate), b: (&str, &KeyAggregate)) -> Ordering {
    b.1.best_weight()
        .cmp(&a.1.best_weight())
        .then_with(|| a.0.len().cmp(&b.0.len()))
        .then_with(|| a.0.cmp(b.0))
}

fn phrase_order(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Ranked phrases for one key, truncated to `max` and stripped of weights.
pub fn rank_phrases(key: &KeyAggregate, max: usize) -> Vec<String> {
    let mut phrases: Vec<(&str, u64)> = key.phrases().collect();
    phrases.sort_unstable_by(phrase_order);
    phrases.truncate(max);
    phrases.into_iter().map(|(p, _)| p.to_string()).collect()
}

/// Select the output table from a complete aggregate.
pub fn select(aggregate: &Aggregate, limits: Limits) -> PhraseTable {
    let _span = debug_span!("select").entered();

    let mut keys: Vec<(&str, &KeyAggregate)> = aggregate.iter().collect();
    keys.sort_unstable_by(|a, b| key_order(*a, *b));
    keys.truncate(limits.max_keys);

    let entries: Vec<(String, Vec<String>)> = keys
        .into_iter()
        .map(|(key, agg)| (key.to_string(), rank_phrases(agg, limits.max_phrases_per_key)))
        .collect();

    debug!(
        keys_in = aggregate.len(),
        keys_out = entries.len(),
        dropped = aggregate.len() - entries.len()
    );

    PhraseTable::from_unique_entries(entries)
}
