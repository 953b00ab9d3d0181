//! Cross-source weight aggregation.
//!
//! `Aggregate` keeps, per pinyin key, the best weight seen for each phrase and
//! the best weight seen for the key overall. Merging is a per-entry maximum,
//! so it is associative, commutative and idempotent: the result does not
//! depend on source order or on duplicated records.

#[cfg(test)]
mod tests;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A normalized record ready for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedPhrase {
    pub key: String,
    pub phrase: String,
    pub weight: u64,
}

impl KeyedPhrase {
    pub fn new(key: impl Into<String>, phrase: impl Into<String>, weight: u64) -> Self {
        Self {
            key: key.into(),
            phrase: phrase.into(),
            weight,
        }
    }
}

/// Per-key state: phrase → best weight, plus the key's running best weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyAggregate {
    phrases: HashMap<String, u64>,
    best_weight: u64,
}

impl KeyAggregate {
    /// Highest weight observed under this key, independent of phrase.
    pub fn best_weight(&self) -> u64 {
        self.best_weight
    }

    pub fn phrase_weight(&self, phrase: &str) -> Option<u64> {
        self.phrases.get(phrase).copied()
    }

    pub fn phrases(&self) -> impl Iterator<Item = (&str, u64)> {
        self.phrases.iter().map(|(p, &w)| (p.as_str(), w))
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    fn observe(&mut self, phrase: String, weight: u64) {
        match self.phrases.entry(phrase) {
            Entry::Occupied(mut e) => {
                if weight > *e.get() {
                    e.insert(weight);
                }
            }
            Entry::Vacant(e) => {
                e.insert(weight);
            }
        }
        if weight > self.best_weight {
            self.best_weight = weight;
        }
    }

    fn merge_from(&mut self, other: KeyAggregate) {
        for (phrase, weight) in other.phrases {
            self.observe(phrase, weight);
        }
        self.best_weight = self.best_weight.max(other.best_weight);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    keys: HashMap<String, KeyAggregate>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one record. A phrase's stored weight and the key's best weight
    /// are only ever raised.
    pub fn absorb(&mut self, record: KeyedPhrase) {
        self.keys
            .entry(record.key)
            .or_default()
            .observe(record.phrase, record.weight);
    }

    /// Fold `other` into `self`.
    pub fn merge_from(&mut self, other: Aggregate) {
        for (key, agg) in other.keys {
            match self.keys.entry(key) {
                Entry::Occupied(mut e) => e.get_mut().merge_from(agg),
                Entry::Vacant(e) => {
                    e.insert(agg);
                }
            }
        }
    }

    /// Combine two aggregates. Order of the operands does not matter.
    pub fn merge(mut self, other: Aggregate) -> Aggregate {
        self.merge_from(other);
        self
    }

    pub fn get(&self, key: &str) -> Option<&KeyAggregate> {
        self.keys.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyAggregate)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Total (key, phrase) pairs.
    pub fn pair_count(&self) -> usize {
        self.keys.values().map(KeyAggregate::phrase_count).sum()
    }
}

impl Extend<KeyedPhrase> for Aggregate {
    fn extend<I: IntoIterator<Item = KeyedPhrase>>(&mut self, iter: I) {
        for record in iter {
            self.absorb(record);
        }
    }
}

impl FromIterator<KeyedPhrase> for Aggregate {
    fn from_iter<I: IntoIterator<Item = KeyedPhrase>>(iter: I) -> Self {
        let mut agg = Aggregate::new();
        agg.extend(iter);
        agg
    }
}
