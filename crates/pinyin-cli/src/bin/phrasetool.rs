use clap::{Parser, Subcommand};

use pinyin_cli::commands::{build_ops, config_ops, table_ops};
use pinyin_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "phrasetool", about = "Pinyin phrase table build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the phrase table from the configured dictionary sources
    Build {
        /// Build configuration TOML (default: embedded)
        #[arg(long)]
        config: Option<String>,
        /// Use a local dictionary file instead of the configured URLs
        /// (NAME=PATH, repeatable, ingested in the given order)
        #[arg(long = "source-file")]
        source_files: Vec<String>,
        /// Output JSON file
        #[arg(default_value = "pinyin-phrase-dict.json")]
        output_file: String,
    },
    /// Show phrase table info
    Info {
        /// Phrase table JSON file
        table_file: String,
    },
    /// Look up a pinyin key in the phrase table (exact match)
    Lookup {
        /// Phrase table JSON file
        table_file: String,
        /// Pinyin, normalized before lookup (e.g. "ni hao")
        pinyin: String,
    },
    /// Rank candidates for a typed pinyin buffer (exact, prefix, initials)
    Candidates {
        /// Phrase table JSON file
        table_file: String,
        /// Typed buffer (e.g. "nih" or "nh")
        buffer: String,
        /// Number of candidates to show
        #[arg(short, long, default_value = "10")]
        n: usize,
    },
    /// Export default build configuration as TOML
    ConfigExport,
    /// Validate a custom build configuration TOML file
    ConfigValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            config,
            source_files,
            output_file,
        } => build_ops::build(config.as_deref(), &source_files, &output_file),
        Command::Info { table_file } => table_ops::info(&table_file),
        Command::Lookup { table_file, pinyin } => table_ops::lookup(&table_file, &pinyin),
        Command::Candidates {
            table_file,
            buffer,
            n,
        } => table_ops::candidates(&table_file, &buffer, n),
        Command::ConfigExport => config_ops::config_export(),
        Command::ConfigValidate { file } => config_ops::config_validate(&file),
    }
}
