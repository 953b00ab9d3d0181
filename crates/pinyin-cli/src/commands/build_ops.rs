use std::fs;
use std::process;

use pinyin_core::pipeline;
use pinyin_core::JsonFileSink;

use super::config_ops::load_config;
use crate::dict_source;

pub fn build(config_file: Option<&str>, source_files: &[String], output_file: &str) {
    let config = load_config(config_file);

    let sources = if source_files.is_empty() {
        dict_source::from_config(&config)
    } else {
        dict_source::from_file_args(source_files).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        })
    };

    eprintln!(
        "Building phrase table from {} sources (max {} keys, {} phrases/key)...",
        sources.len(),
        config.limits.max_keys,
        config.limits.max_phrases_per_key
    );

    let mut sink = JsonFileSink::new(output_file);
    let report = die!(
        pipeline::run(&sources, &config, &mut sink),
        "Error building phrase table: {}"
    );

    for s in &report.sources {
        eprintln!("  {}: {} of {} lines accepted", s.name, s.accepted, s.lines);
    }
    if report.keys_aggregated > report.keys_written {
        eprintln!(
            "  (dropped {} of {} keys)",
            report.keys_aggregated - report.keys_written,
            report.keys_aggregated
        );
    }

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({:.1} MB)",
        file_size as f64 / 1_048_576.0
    );
}
