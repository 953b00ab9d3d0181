mod http;

use std::path::PathBuf;

use pinyin_core::config::BuildConfig;
use pinyin_core::source::{FileSource, LineSource};

pub use http::HttpSource;

/// Remote sources from the config, in configured order.
pub fn from_config(config: &BuildConfig) -> Vec<Box<dyn LineSource>> {
    let timeout = config.fetch.timeout();
    config
        .sources
        .iter()
        .map(|spec| {
            Box::new(HttpSource::new(&spec.name, &spec.url, timeout)) as Box<dyn LineSource>
        })
        .collect()
}

/// Local file sources from `NAME=PATH` arguments, in argument order.
pub fn from_file_args(args: &[String]) -> Result<Vec<Box<dyn LineSource>>, String> {
    args.iter()
        .map(|arg| {
            let (name, path) = parse_file_arg(arg)?;
            Ok(Box::new(FileSource::new(name, path)) as Box<dyn LineSource>)
        })
        .collect()
}

/// Split `NAME=PATH`. A bare path uses its file stem as the name.
pub fn parse_file_arg(arg: &str) -> Result<(String, PathBuf), String> {
    if let Some((name, path)) = arg.split_once('=') {
        if name.is_empty() || path.is_empty() {
            return Err(format!("invalid source file '{arg}' (expected NAME=PATH)"));
        }
        return Ok((name.to_string(), PathBuf::from(path)));
    }
    let path = PathBuf::from(arg);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .filter(|n| !n.is_empty())
        .ok_or_else(|| format!("invalid source file '{arg}' (expected NAME=PATH)"))?;
    Ok((name, path))
}
