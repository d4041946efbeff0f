use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::columns::{resolve_column, ColumnRole};
use crate::pipeline::{Row, WindowRecord};

/// Header names of the window output
pub const WINDOW_HEADERS: [&str; 4] = ["word", "left", "target", "right"];

/// Tab for `.tsv`/`.tab`, comma otherwise
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase) {
        Some(ext) if ext == "tsv" || ext == "tab" => b'\t',
        _ => b',',
    }
}

/// In-memory table: a header row and string records of the same width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
        }
    }

    /// Parse delimited text with a header row
    /// Short records are padded with empty fields, long ones keep their extra fields.
    pub fn parse(content: &str, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read header row")?
            .iter()
            .map(|h| h.trim_start_matches('\u{FEFF}').to_string())
            .collect();

        let mut records = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Malformed record {}", i + 1))?;
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            if fields.len() < headers.len() {
                fields.resize(headers.len(), String::new());
            }
            records.push(fields);
        }

        Ok(Self { headers, records })
    }

    /// Read a table from file, delimiter chosen by extension
    pub async fn read(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read table {}", path.display()))?;
        let table = Self::parse(&content, delimiter_for(path))
            .with_context(|| format!("Invalid table {}", path.display()))?;
        info!(
            "Read {}: {} rows, columns {:?}",
            path.display(),
            table.records.len(),
            table.headers
        );
        Ok(table)
    }

    /// Serialize to delimited text
    pub fn to_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        let bytes = writer.into_inner().context("Failed to flush table writer")?;
        String::from_utf8(bytes).context("Table output is not UTF-8")
    }

    /// Write to file, creating parent directories
    pub async fn write(&self, path: &Path) -> Result<()> {
        let content = self.to_delimited(delimiter_for(path))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {} rows to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Field of a record, empty when the record is short
    pub fn field(&self, record: usize, column: usize) -> &str {
        self.records
            .get(record)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Append a column, returning the name actually used
    /// A name already present gets the suffix `_new`.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<String> {
        anyhow::ensure!(
            values.len() == self.records.len(),
            "Column '{}' has {} values for {} records",
            name,
            values.len(),
            self.records.len()
        );
        let name = if self.headers.iter().any(|h| h == name) {
            format!("{name}_new")
        } else {
            name.to_string()
        };
        let width = self.headers.len();
        self.headers.push(name.clone());
        for (record, value) in self.records.iter_mut().zip(values) {
            record.resize(width, String::new());
            record.push(value);
        }
        Ok(name)
    }

    /// Rows for the window pipeline, columns resolved by role or explicit name
    pub fn window_rows(&self, word_column: Option<&str>, context_column: Option<&str>) -> Result<Vec<Row>> {
        let word = resolve_column(&self.headers, ColumnRole::Word, word_column)?;
        let context = resolve_column(&self.headers, ColumnRole::Context, context_column)?;
        debug!(
            "Resolved word column '{}' and context column '{}'",
            self.headers[word], self.headers[context]
        );
        Ok((0..self.records.len())
            .map(|i| Row::new(self.field(i, word), self.field(i, context)))
            .collect())
    }

    /// Window output table with the four fixed columns
    pub fn from_windows(windows: &[WindowRecord]) -> Self {
        let mut table = Self::new(WINDOW_HEADERS.iter().map(|h| h.to_string()).collect());
        table.records = windows
            .iter()
            .map(|w| {
                vec![
                    w.word.clone(),
                    w.window.left.clone(),
                    w.window.target.clone(),
                    w.window.right.clone(),
                ]
            })
            .collect();
        table
    }
}
