//! Tables stored as JSON files in a directory.
//!
//! Each table is `<dir>/<name>.json` holding an array of string rows, the
//! first row being the header. Tables are write-once: writing a name that
//! already exists fails.

use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use syllabus_domain::traits::TabularSink;
use tracing::info;

/// Directory of JSON tables.
#[derive(Debug, Clone)]
pub struct JsonTableSink {
    dir: PathBuf,
}

impl JsonTableSink {
    /// Use `dir` as the table directory; it is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Table directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a table.
    pub fn path_for(&self, table: &str) -> Result<PathBuf> {
        if table.trim().is_empty() || table.contains(['/', '\\']) || table.starts_with('.') {
            return Err(CliError::InvalidInput(format!(
                "'{}' is not a usable table name",
                table
            )));
        }
        Ok(self.dir.join(format!("{}.json", table)))
    }

    /// Fail with [`CliError::OutputExists`] if `table` is already present.
    pub fn ensure_absent(&self, table: &str) -> Result<()> {
        if self.exists(table)? {
            return Err(CliError::OutputExists(table.to_string()));
        }
        Ok(())
    }

    /// Read a table including its header row.
    pub fn read_with_header(&self, table: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let path = self.path_for(table)?;
        if !path.is_file() {
            return Err(CliError::TableNotFound(table.to_string()));
        }
        let mut rows: Vec<Vec<String>> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        if rows.is_empty() {
            return Err(CliError::InvalidInput(format!("table '{}' has no header", table)));
        }
        let header = rows.remove(0);
        Ok((header, rows))
    }
}

impl TabularSink for JsonTableSink {
    type Error = CliError;

    fn exists(&self, table: &str) -> Result<bool> {
        Ok(self.path_for(table)?.exists())
    }

    fn write_table(&mut self, table: &str, header: &[String], rows: &[Vec<String>]) -> Result<()> {
        self.ensure_absent(table)?;
        if let Some(bad) = rows.iter().position(|r| r.len() != header.len()) {
            return Err(CliError::InvalidInput(format!(
                "row {} of '{}' has {} cells, header has {}",
                bad,
                table,
                rows[bad].len(),
                header.len()
            )));
        }

        let mut all = Vec::with_capacity(rows.len() + 1);
        all.push(header.to_vec());
        all.extend(rows.iter().cloned());

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(table)?;
        fs::write(&path, serde_json::to_string_pretty(&all)?)?;
        info!(table, rows = rows.len(), path = %path.display(), "table written");
        Ok(())
    }

    fn read_table(&self, table: &str) -> Result<Vec<Vec<String>>> {
        self.read_with_header(table).map(|(_, rows)| rows)
    }
}
