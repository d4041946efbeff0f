use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ctxwin::incremental::{sibling_output_path, ENTROPY_SUFFIX, SCORED_SUFFIX, WINDOWS_SUFFIX};
use ctxwin::run_stats::RunStats;
use ctxwin::runner::{entropy_file, extract_file, extract_folder, score_file, ExtractConfig};
use ctxwin::segmenter::LemmaLexicon;
use ctxwin::sentiment::DEFAULT_WINDOW_CHARS;
use ctxwin::{BatchProcessor, LexiconClassifier, RuleSegmenter, ScoreMode};

#[derive(Parser, Debug)]
#[command(name = "ctxwin")]
#[command(about = "Sentence-window extraction around evaluative words, with polarity scoring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log filter, e.g. "info" or "ctxwin=debug"
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Suppress console progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract left/target/right sentence windows for every row
    Extract(ExtractArgs),
    /// Append POS/NEU/NEG percentages to a window table
    Score(ScoreArgs),
    /// Append per-word 3-bin polarity entropy to a scored table
    Entropy(EntropyArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "dir"])))]
struct ExtractArgs {
    /// Single input table (.csv or .tsv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Folder of input tables
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Output table (single-file mode); defaults to <stem>_windows next to the input
    #[arg(long, conflicts_with = "dir")]
    output: Option<PathBuf>,

    /// Output folder (folder mode); defaults to the input folder
    #[arg(long, conflicts_with = "input")]
    output_dir: Option<PathBuf>,

    /// Word column header, bypassing synonym resolution
    #[arg(long)]
    word_column: Option<String>,

    /// Context column header, bypassing synonym resolution
    #[arg(long)]
    context_column: Option<String>,

    /// Lemma lexicon, one surface<TAB>lemma pair per line
    #[arg(long)]
    lemmas: Option<PathBuf>,

    /// Row workers (defaults to CPU count)
    #[arg(long)]
    workers: Option<usize>,

    /// Overwrite outputs that already exist
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Window table to score
    #[arg(long)]
    input: PathBuf,

    /// Output table; defaults to <stem>_scored next to the input
    #[arg(long)]
    output: Option<PathBuf>,

    /// Sentiment lexicon, a JSON object of word -> integer score
    #[arg(long)]
    lexicon: PathBuf,

    /// Score the whole target sentence or an excerpt around the word
    #[arg(long, value_enum, default_value_t = ScoreMode::Sentence)]
    mode: ScoreMode,

    /// Characters kept on each side of the word in word mode
    #[arg(long, default_value_t = DEFAULT_WINDOW_CHARS)]
    window_chars: usize,
}

#[derive(Args, Debug)]
struct EntropyArgs {
    /// Table with word and polarity columns
    #[arg(long)]
    input: PathBuf,

    /// Output table; defaults to <stem>_entropy next to the input
    #[arg(long)]
    output: Option<PathBuf>,

    /// Polarity column header, bypassing synonym resolution
    #[arg(long)]
    polarity_column: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the run summary, logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_new(&cli.log_level)?)
        .json()
        .init();

    info!("Starting ctxwin");
    info!(?cli, "Parsed CLI arguments");

    match cli.command {
        Command::Extract(args) => run_extract(args, cli.no_progress).await,
        Command::Score(args) => run_score(args).await,
        Command::Entropy(args) => run_entropy(args).await,
    }
}

async fn run_extract(args: ExtractArgs, no_progress: bool) -> Result<()> {
    let run_start = Instant::now();

    let mut segmenter = RuleSegmenter::with_default_rules()?;
    if let Some(path) = &args.lemmas {
        segmenter = segmenter.with_lemmas(LemmaLexicon::load(path).await?);
    }

    let mut processor = BatchProcessor::new(Arc::new(segmenter));
    if !no_progress {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} rows ({per_sec})")?
                .progress_chars("=> "),
        );
        processor = processor.with_progress(pb);
    }

    let config = ExtractConfig {
        word_column: args.word_column,
        context_column: args.context_column,
        workers: args.workers.unwrap_or_else(num_cpus::get),
        overwrite_all: args.overwrite_all,
        fail_fast: args.fail_fast,
    };

    let mut run = RunStats::start();
    if let Some(dir) = &args.dir {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| dir.clone());
        let result = extract_folder(&mut processor, dir, &output_dir, &config, &mut run).await;
        if result.is_err() {
            // Keep a record of what finished before the abort
            run.total_processing_time_ms = run_start.elapsed().as_millis() as u64;
            run.save(&args.stats_out).await?;
        }
        result?;
    } else if let Some(input) = &args.input {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| sibling_output_path(input, WINDOWS_SUFFIX));
        run.record(extract_file(&mut processor, input, &output, &config).await?);
    }

    if let Some(pb) = processor.progress() {
        pb.finish_and_clear();
    }

    run.total_processing_time_ms = run_start.elapsed().as_millis() as u64;
    run.save(&args.stats_out).await?;
    info!("Stats written to {}", args.stats_out.display());

    println!("ctxwin v{} - extraction complete", env!("CARGO_PKG_VERSION"));
    println!(
        "  Files: {} processed, {} skipped, {} failed",
        run.files_processed, run.files_skipped, run.files_failed
    );
    println!("  Rows: {} seen, {} windows written", run.rows_seen, run.rows_matched);
    println!("  Time: {} ms", run.total_processing_time_ms);
    Ok(())
}

async fn run_score(args: ScoreArgs) -> Result<()> {
    let classifier = LexiconClassifier::load(&args.lexicon).await?;
    let output = args
        .output
        .unwrap_or_else(|| sibling_output_path(&args.input, SCORED_SUFFIX));
    let rows = score_file(&classifier, &args.input, &output, args.mode, args.window_chars).await?;
    println!("Scored {rows} rows -> {}", output.display());
    Ok(())
}

async fn run_entropy(args: EntropyArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| sibling_output_path(&args.input, ENTROPY_SUFFIX));
    let rows = entropy_file(&args.input, &output, args.polarity_column.as_deref()).await?;
    println!("Annotated {rows} rows -> {}", output.display());
    Ok(())
}
