use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::LogEntry;

pub const DEFAULT_STATS_FILE: &str = "statistics.txt";

/// Append-only per-image statistics log.
///
/// The file is opened once and flushed after every entry.
pub struct ResultLogger {
    path: PathBuf,
    file: BufWriter<File>,
}

impl ResultLogger {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open statistics file {}", path.display()))?;

        Ok(Self {
            path,
            file: BufWriter::new(file),
        })
    }

    pub fn append(&mut self, entry: &LogEntry) -> Result<()> {
        writeln!(self.file, "{}", entry)
            .and_then(|_| self.file.flush())
            .with_context(|| format!("Failed to write to {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
