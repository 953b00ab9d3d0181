use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::PhraseTable;

/// Destination for a finished phrase table.
pub trait TableSink {
    fn write_table(&mut self, table: &PhraseTable) -> Result<(), io::Error>;
}

/// Writes the table as compact JSON to a file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for JsonFileSink {
    /// Atomic write: write to .tmp then rename. The .tmp file is removed if
    /// the rename fails.
    fn write_table(&mut self, table: &PhraseTable) -> Result<(), io::Error> {
        let json = serde_json::to_vec(table).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })?;
        Ok(())
    }
}

/// In-memory sink; keeps the last table written.
impl TableSink for Option<PhraseTable> {
    fn write_table(&mut self, table: &PhraseTable) -> Result<(), io::Error> {
        *self = Some(table.clone());
        Ok(())
    }
}
