// WHY: batch orchestration - runs segment -> locate -> extract for every row, keeps
// running counts and recovers per-row failures without aborting the batch

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::WindowError;
use crate::locator::locate;
use crate::segmenter::{segment, Segmenter};
use crate::window::{extract, Window};

/// Rows between progress log lines
const PROGRESS_EVERY: u64 = 50;

/// One input unit: the evaluative word and its unsegmented context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub word: String,
    pub context: String,
}

impl Row {
    pub fn new(word: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            context: context.into(),
        }
    }
}

/// A window paired with the word of the row it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub word: String,
    #[serde(flatten)]
    pub window: Window,
}

/// Running counts for a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Every row handed to the processor, skipped ones included
    pub rows_seen: u64,
    /// Rows that produced a window
    pub rows_matched: u64,
    /// Rows skipped for a blank word or context
    pub rows_empty: u64,
    /// Rows where no sentence held the word
    pub rows_unmatched: u64,
    /// Rows the segmenter failed on
    pub segmentation_failures: u64,
}

impl BatchStats {
    pub fn merge(&mut self, other: &BatchStats) {
        self.rows_seen += other.rows_seen;
        self.rows_matched += other.rows_matched;
        self.rows_empty += other.rows_empty;
        self.rows_unmatched += other.rows_unmatched;
        self.segmentation_failures += other.segmentation_failures;
    }
}

#[derive(Debug)]
enum RowOutcome {
    Matched(WindowRecord),
    Empty,
    Unmatched,
    SegmentationFailed,
}

fn process_row<S: Segmenter + ?Sized>(segmenter: &S, row: &Row) -> Result<RowOutcome, WindowError> {
    if row.word.trim().is_empty() || row.context.trim().is_empty() {
        return Ok(RowOutcome::Empty);
    }

    let sentences = match segment(segmenter, &row.context) {
        Ok(sentences) => sentences,
        Err(e) if e.is_row_recoverable() => {
            warn!("Skipping row for '{}': {}", row.word, e);
            return Ok(RowOutcome::SegmentationFailed);
        }
        Err(e) => return Err(e),
    };

    let result = locate(&row.word, &sentences);
    let Some(index) = result.sentence_index.filter(|_| result.found) else {
        return Ok(RowOutcome::Unmatched);
    };

    let window = extract(&sentences, index)?;
    if window.target.is_empty() {
        return Ok(RowOutcome::Unmatched);
    }

    Ok(RowOutcome::Matched(WindowRecord {
        word: row.word.clone(),
        window,
    }))
}

/// Process a contiguous run of rows; `offset` is only used for progress reporting
fn run_chunk<S: Segmenter + ?Sized>(
    segmenter: &S,
    rows: &[Row],
    offset: usize,
    progress: Option<&ProgressBar>,
) -> Result<(Vec<WindowRecord>, BatchStats), WindowError> {
    let mut windows = Vec::new();
    let mut stats = BatchStats::default();

    for row in rows {
        stats.rows_seen += 1;
        match process_row(segmenter, row)? {
            RowOutcome::Matched(record) => {
                stats.rows_matched += 1;
                windows.push(record);
            }
            RowOutcome::Empty => stats.rows_empty += 1,
            RowOutcome::Unmatched => stats.rows_unmatched += 1,
            RowOutcome::SegmentationFailed => stats.segmentation_failures += 1,
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
        if stats.rows_seen % PROGRESS_EVERY == 1 {
            debug!(
                "Progress: row {} | chunk matches so far: {}",
                offset as u64 + stats.rows_seen,
                stats.rows_matched
            );
        }
    }

    Ok((windows, stats))
}

/// Runs the window pipeline over batches of rows
/// The segmenter is shared read-only by every row; rows never share mutable state.
pub struct BatchProcessor<S: Segmenter> {
    segmenter: Arc<S>,
    stats: BatchStats,
    progress: Option<ProgressBar>,
}

impl<S: Segmenter + 'static> BatchProcessor<S> {
    pub fn new(segmenter: Arc<S>) -> Self {
        Self {
            segmenter,
            stats: BatchStats::default(),
            progress: None,
        }
    }

    /// Report each processed row to a progress bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn progress(&self) -> Option<&ProgressBar> {
        self.progress.as_ref()
    }

    /// Counts accumulated over every batch run on this processor
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = BatchStats::default();
    }

    /// Process rows sequentially
    /// Output keeps input order among matched rows. An invariant violation aborts.
    pub fn process(&mut self, rows: &[Row]) -> Result<Vec<WindowRecord>, WindowError> {
        let (windows, stats) = run_chunk(self.segmenter.as_ref(), rows, 0, self.progress.as_ref())?;
        self.stats.merge(&stats);
        log_summary(&stats);
        Ok(windows)
    }

    /// Process rows on up to `workers` blocking tasks
    /// Rows are split into contiguous chunks and re-joined in input order, so the
    /// output is identical to `process`.
    pub async fn process_parallel(&mut self, rows: Vec<Row>, workers: usize) -> Result<Vec<WindowRecord>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = rows.len().div_ceil(workers.max(1)).max(1);
        debug!("Dispatching {} rows in chunks of {}", rows.len(), chunk_size);

        let mut handles = Vec::new();
        let mut remaining = rows.into_iter().peekable();
        let mut offset = 0;
        while remaining.peek().is_some() {
            let chunk: Vec<Row> = remaining.by_ref().take(chunk_size).collect();
            let chunk_offset = offset;
            offset += chunk.len();

            let segmenter = Arc::clone(&self.segmenter);
            let progress = self.progress.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                run_chunk(segmenter.as_ref(), &chunk, chunk_offset, progress.as_ref())
            }));
        }

        let results = futures::future::try_join_all(handles)
            .await
            .context("Row worker task failed")?;

        let mut windows = Vec::new();
        let mut batch_stats = BatchStats::default();
        for result in results {
            let (chunk_windows, chunk_stats) = result?;
            batch_stats.merge(&chunk_stats);
            windows.extend(chunk_windows);
        }

        self.stats.merge(&batch_stats);
        log_summary(&batch_stats);
        Ok(windows)
    }
}

fn log_summary(stats: &BatchStats) {
    info!(
        rows_seen = stats.rows_seen,
        rows_matched = stats.rows_matched,
        rows_unmatched = stats.rows_unmatched,
        rows_empty = stats.rows_empty,
        segmentation_failures = stats.segmentation_failures,
        "Batch complete"
    );
}
