//! Build driver: sources → records → keys → aggregate → table → sink.
//!
//! Sources are ingested one at a time in the configured order, each into its
//! own [`Aggregate`], and folded into the running total with
//! [`Aggregate::merge`]. A source that cannot be fetched aborts the build
//! before anything is written; lines that fail parsing or normalization are
//! skipped.

use std::io;

use tracing::{debug, debug_span, info};

use crate::aggregate::{Aggregate, KeyedPhrase};
use crate::config::BuildConfig;
use crate::normalize::try_normalize_key;
use crate::record::RecordParser;
use crate::select::{select, Limits};
use crate::source::{LineSource, SourceError};
use crate::table::{PhraseTable, TableSink};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("source '{name}' failed: {source}")]
    Source {
        name: String,
        #[source]
        source: SourceError,
    },

    #[error("writing table failed: {0}")]
    Sink(#[source] io::Error),
}

/// Per-source ingestion counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub lines: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub sources: Vec<SourceReport>,
    /// Distinct keys before selection.
    pub keys_aggregated: usize,
    /// Keys in the emitted table.
    pub keys_written: usize,
}

impl BuildReport {
    pub fn lines(&self) -> usize {
        self.sources.iter().map(|s| s.lines).sum()
    }

    pub fn accepted(&self) -> usize {
        self.sources.iter().map(|s| s.accepted).sum()
    }
}

/// Parse and normalize one line into an aggregatable record.
pub fn keyed_record(parser: &RecordParser, line: &str) -> Option<KeyedPhrase> {
    let record = parser.parse_line(line)?;
    let key = try_normalize_key(&record.pinyin)?;
    Some(KeyedPhrase {
        key,
        phrase: record.phrase,
        weight: record.weight,
    })
}

/// Aggregate the usable lines of one source.
pub fn ingest_lines<'a, I>(parser: &RecordParser, lines: I) -> (Aggregate, usize, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0usize;
    let mut accepted = 0usize;
    let agg: Aggregate = lines
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(|line| keyed_record(parser, line))
        .inspect(|_| accepted += 1)
        .collect();
    (agg, total, accepted)
}

/// Fetch and aggregate every source, then select the table.
pub fn build_table(
    sources: &[Box<dyn LineSource>],
    config: &BuildConfig,
) -> Result<(PhraseTable, BuildReport), BuildError> {
    let parser = RecordParser::from(&config.filter);
    let mut report = BuildReport::default();
    let mut total = Aggregate::new();

    for source in sources {
        let name = source.name();
        info!(source = name, "loading {name}");
        let _span = debug_span!("ingest", source = name).entered();

        let lines = source.fetch_lines().map_err(|e| BuildError::Source {
            name: name.to_string(),
            source: e,
        })?;
        let (agg, line_count, accepted) = ingest_lines(&parser, lines.iter().map(String::as_str));
        debug!(
            lines = line_count,
            accepted,
            rejected = line_count - accepted,
            keys = agg.len()
        );

        total = total.merge(agg);
        report.sources.push(SourceReport {
            name: name.to_string(),
            lines: line_count,
            accepted,
        });
    }

    report.keys_aggregated = total.len();
    let table = select(&total, Limits::from(&config.limits));
    report.keys_written = table.len();
    Ok((table, report))
}

/// Full run: build the table and hand it to `sink`. Nothing reaches the sink
/// unless every source was ingested.
pub fn run(
    sources: &[Box<dyn LineSource>],
    config: &BuildConfig,
    sink: &mut dyn TableSink,
) -> Result<BuildReport, BuildError> {
    let (table, report) = build_table(sources, config)?;
    sink.write_table(&table).map_err(BuildError::Sink)?;
    info!(keys = report.keys_written, "done: keys={}", report.keys_written);
    Ok(report)
}
