//! Line-oriented dictionary sources.
//!
//! The pipeline only sees [`LineSource`]; where the lines come from (HTTP,
//! local file, memory) is up to the implementation.

use std::fs;
use std::io;
use std::path::PathBuf;

/// A named collection of raw dictionary lines.
pub trait LineSource {
    fn name(&self) -> &str;

    /// Retrieve all lines. Any error is fatal for the whole build.
    fn fetch_lines(&self) -> Result<Vec<String>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Characters that end a line. `\r\n` counts as a single break.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Decode raw bytes as UTF-8, dropping invalid sequences instead of
/// replacing them, and split into lines.
///
/// Lone `\r` and the Unicode line and paragraph separators also end a line.
/// A trailing terminator does not produce a final empty line.
pub fn decode_lines(bytes: &[u8]) -> Vec<String> {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    let text = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = text.split(is_line_break).map(str::to_string).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// A dictionary file on local disk.
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl LineSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_lines(&self) -> Result<Vec<String>, SourceError> {
        let bytes = fs::read(&self.path)?;
        Ok(decode_lines(&bytes))
    }
}

/// Lines held in memory.
pub struct MemorySource {
    name: String,
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_lines(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.lines.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lines_drops_invalid_bytes() {
        let mut bytes = "你好\tni hao\t1\n".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        bytes.extend_from_slice("您好\tnin hao\r\n".as_bytes());
        let lines = decode_lines(&bytes);
        assert_eq!(lines, ["你好\tni hao\t1", "您好\tnin hao"]);
    }

    #[test]
    fn test_decode_lines_empty() {
        assert!(decode_lines(b"").is_empty());
        assert_eq!(decode_lines(b"\n"), [""]);
    }

    #[test]
    fn test_decode_lines_bare_carriage_return() {
        let lines = decode_lines("你好\tni hao\t100\r您好\tnin hao\t10\r".as_bytes());
        assert_eq!(lines, ["你好\tni hao\t100", "您好\tnin hao\t10"]);
    }

    #[test]
    fn test_decode_lines_other_breaks() {
        let text = "a\r\nb\x0bc\x0cd\x1ce\u{85}f\u{2028}g\u{2029}h\n\ni";
        assert_eq!(
            decode_lines(text.as_bytes()),
            ["a", "b", "c", "d", "e", "f", "g", "h", "", "i"]
        );
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.dict.yaml");
        fs::write(&path, "---\nname: base\n...\n你好\tni hao\t100\n").unwrap();

        let source = FileSource::new("base", &path);
        assert_eq!(source.name(), "base");
        let lines = source.fetch_lines().unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "你好\tni hao\t100");
    }

    #[test]
    fn test_file_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new("missing", dir.path().join("nope.yaml"));
        assert!(matches!(
            source.fetch_lines(),
            Err(SourceError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new("mem", ["a", "b"]);
        assert_eq!(source.fetch_lines().unwrap(), ["a", "b"]);
    }
}
