//! Pinyin phrase table construction.
//!
//! Raw rime-style dictionary lines (`phrase\tpinyin\tweight`) are parsed,
//! their pinyin normalized into unsegmented keys, weights aggregated across
//! sources, and a bounded table of ranked phrases selected per key.

pub mod aggregate;
pub mod config;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod select;
pub mod source;
pub mod table;
pub mod unicode;

pub use aggregate::{Aggregate, KeyAggregate, KeyedPhrase};
pub use config::BuildConfig;
pub use pipeline::{build_table, run, BuildError, BuildReport};
pub use table::{JsonFileSink, PhraseTable, TableSink};
