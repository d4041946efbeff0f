use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::pipeline::BatchStats;

/// Outcome of one input file
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Success,
    Skipped,
    Failed,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    /// Input file path
    pub path: String,
    pub rows_seen: u64,
    pub rows_matched: u64,
    pub segmentation_failures: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    pub status: FileStatus,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileStats {
    pub fn success(path: &Path, batch: &BatchStats, processing_time_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            rows_seen: batch.rows_seen,
            rows_matched: batch.rows_matched,
            segmentation_failures: batch.segmentation_failures,
            processing_time_ms,
            status: FileStatus::Success,
            error: None,
        }
    }

    pub fn skipped(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            rows_seen: 0,
            rows_matched: 0,
            segmentation_failures: 0,
            processing_time_ms: 0,
            status: FileStatus::Skipped,
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &anyhow::Error, processing_time_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            rows_seen: 0,
            rows_matched: 0,
            segmentation_failures: 0,
            processing_time_ms,
            status: FileStatus::Failed,
            error: Some(format!("{error:#}")),
        }
    }
}

/// Aggregate statistics for one run
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Unix seconds at run start
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub rows_seen: u64,
    pub rows_matched: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn start() -> Self {
        let run_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            run_start,
            total_processing_time_ms: 0,
            files_processed: 0,
            files_skipped: 0,
            files_failed: 0,
            rows_seen: 0,
            rows_matched: 0,
            file_stats: Vec::new(),
        }
    }

    pub fn record(&mut self, stats: FileStats) {
        match stats.status {
            FileStatus::Success => self.files_processed += 1,
            FileStatus::Skipped => self.files_skipped += 1,
            FileStatus::Failed => self.files_failed += 1,
        }
        self.rows_seen += stats.rows_seen;
        self.rows_matched += stats.rows_matched;
        self.file_stats.push(stats);
    }

    /// Write pretty JSON to `path`
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write stats file {}", path.display()))
    }
}
