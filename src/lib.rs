pub mod columns;
pub mod discovery;
pub mod entropy;
pub mod error;
pub mod incremental;
pub mod locator;
pub mod normalization;
pub mod pipeline;
pub mod run_stats;
pub mod runner;
pub mod segmenter;
pub mod sentiment;
pub mod table;
pub mod window;

// Re-export main types for convenient access
pub use error::WindowError;
pub use locator::{locate, MatchResult, MatchStrategy};
pub use normalization::{normalize, strip_accents};
pub use pipeline::{BatchProcessor, BatchStats, Row, WindowRecord};
pub use segmenter::{segment, RuleSegmenter, Segmenter, Sentence, Token};
pub use window::{extract, Window};

// Re-export scoring and I/O entry points used by the CLI
pub use sentiment::{LexiconClassifier, Polarity, ScoreMode, SentimentClassifier};
pub use runner::ExtractConfig;
pub use table::Table;
