use std::fs;

use pinyin_core::config::{self, BuildConfig};

pub fn config_export() {
    print!("{}", config::default_toml());
}

pub fn config_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let c = die!(config::parse_config_toml(&content), "Error: {}");
    println!(
        "OK: {} sources, limits.max_keys={}, limits.max_phrases_per_key={}",
        c.sources.len(),
        c.limits.max_keys,
        c.limits.max_phrases_per_key
    );
}

/// Load `--config FILE`, or the embedded defaults.
pub fn load_config(file: Option<&str>) -> BuildConfig {
    let Some(file) = file else {
        return BuildConfig::default();
    };
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(config::parse_config_toml(&content), "Error in {file}: {}")
}
