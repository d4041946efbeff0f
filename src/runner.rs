// WHY: file-level drivers shared by the CLI and integration tests - one table in, one
// table out, with skip-if-done and per-file stats

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::discovery::{find_tables, DiscoveryConfig};
use crate::entropy::annotate_table;
use crate::error::WindowError;
use crate::incremental::{generate_output_path, should_process, WINDOWS_SUFFIX};
use crate::pipeline::BatchProcessor;
use crate::run_stats::{FileStats, RunStats};
use crate::segmenter::Segmenter;
use crate::sentiment::{score_table, ScoreMode, SentimentClassifier};
use crate::table::Table;

/// Options for the `extract` command
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Explicit word column name, bypassing synonyms
    pub word_column: Option<String>,
    /// Explicit context column name, bypassing synonyms
    pub context_column: Option<String>,
    pub workers: usize,
    /// Rewrite outputs that already exist
    pub overwrite_all: bool,
    /// Abort a folder run on the first failing file
    pub fail_fast: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            word_column: None,
            context_column: None,
            workers: num_cpus::get(),
            overwrite_all: false,
            fail_fast: false,
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Extract windows from one table and write them to `output`
pub async fn extract_file<S: Segmenter + 'static>(
    processor: &mut BatchProcessor<S>,
    input: &Path,
    output: &Path,
    config: &ExtractConfig,
) -> Result<FileStats> {
    if !should_process(output, config.overwrite_all) {
        info!("Skipping {} (output exists: {})", input.display(), output.display());
        return Ok(FileStats::skipped(input));
    }

    let start = Instant::now();
    let table = Table::read(input).await?;
    let rows = table
        .window_rows(config.word_column.as_deref(), config.context_column.as_deref())
        .with_context(|| format!("Cannot resolve columns of {}", input.display()))?;

    if let Some(pb) = processor.progress() {
        pb.set_length(rows.len() as u64);
        pb.set_position(0);
        pb.set_message(input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
    }

    processor.reset_stats();
    let windows = processor.process_parallel(rows, config.workers).await?;
    Table::from_windows(&windows).write(output).await?;

    let stats = FileStats::success(input, processor.stats(), elapsed_ms(start));
    info!(
        "Processed {}: {} of {} rows matched -> {}",
        input.display(),
        stats.rows_matched,
        stats.rows_seen,
        output.display()
    );
    Ok(stats)
}

/// Extract every table directly inside `dir` into `output_dir`
/// Failing files are recorded and skipped unless `fail_fast`; an invariant violation
/// always aborts.
pub async fn extract_folder<S: Segmenter + 'static>(
    processor: &mut BatchProcessor<S>,
    dir: &Path,
    output_dir: &Path,
    config: &ExtractConfig,
    run: &mut RunStats,
) -> Result<()> {
    let files = find_tables(dir, &DiscoveryConfig { fail_fast: config.fail_fast })?;
    anyhow::ensure!(!files.is_empty(), "No .csv or .tsv tables found in {}", dir.display());
    info!("Found {} tables in {}", files.len(), dir.display());

    for file in &files {
        let output = generate_output_path(file, output_dir, WINDOWS_SUFFIX);
        let start = Instant::now();
        match extract_file(processor, file, &output, config).await {
            Ok(stats) => run.record(stats),
            Err(e) => {
                let invariant = matches!(
                    e.downcast_ref::<WindowError>(),
                    Some(WindowError::InvariantViolation { .. })
                );
                if config.fail_fast || invariant {
                    return Err(e.context(format!("Aborting run at {}", file.display())));
                }
                warn!("Failed to process {} (continuing): {:#}", file.display(), e);
                run.record(FileStats::failed(file, &e, elapsed_ms(start)));
            }
        }
    }
    Ok(())
}

/// Score the windows of one table and write the scored table
pub async fn score_file<C: SentimentClassifier + ?Sized>(
    classifier: &C,
    input: &Path,
    output: &Path,
    mode: ScoreMode,
    window_chars: usize,
) -> Result<usize> {
    let mut table = Table::read(input).await?;
    let columns = score_table(&mut table, classifier, mode, window_chars)
        .with_context(|| format!("Cannot score {}", input.display()))?;
    table.write(output).await?;
    info!(?columns, "Scored {} rows -> {}", table.records.len(), output.display());
    Ok(table.records.len())
}

/// Add per-word polarity entropy to one table and write it
pub async fn entropy_file(input: &Path, output: &Path, polarity_column: Option<&str>) -> Result<usize> {
    let mut table = Table::read(input).await?;
    annotate_table(&mut table, polarity_column)
        .with_context(|| format!("Cannot compute entropy for {}", input.display()))?;
    table.write(output).await?;
    info!("Annotated {} rows -> {}", table.records.len(), output.display());
    Ok(table.records.len())
}
