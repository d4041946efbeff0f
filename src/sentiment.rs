// WHY: polarity scoring of extracted windows
// The classifier is an explicit value built once before a batch and borrowed by the
// scorer; there is no process-wide model state.

use anyhow::{Context, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::columns::{resolve_role, ColumnRole};
use crate::normalization::{normalize, strip_accents};
use crate::table::Table;

/// Characters kept on each side of the target word in word mode
pub const DEFAULT_WINDOW_CHARS: usize = 80;

/// Output column names, percent values
pub const POS_COLUMN: &str = "pos_pct";
pub const NEU_COLUMN: &str = "neu_pct";
pub const NEG_COLUMN: &str = "neg_pct";

/// Probability distribution over POS / NEU / NEG
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}

impl Polarity {
    pub fn new(pos: f64, neu: f64, neg: f64) -> Self {
        Self { pos, neu, neg }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rescale so the three values sum to 1; left as is when the sum is not positive
    pub fn normalized(self) -> Self {
        let sum = self.pos + self.neu + self.neg;
        if sum > 0.0 {
            Self::new(self.pos / sum, self.neu / sum, self.neg / sum)
        } else {
            self
        }
    }

    /// Percentages rounded to 6 decimals, in POS, NEU, NEG order
    pub fn percentages(&self) -> [f64; 3] {
        let pct = |p: f64| (p * 100.0 * 1e6).round() / 1e6;
        [pct(self.pos), pct(self.neu), pct(self.neg)]
    }
}

/// Sentiment classifier seam
pub trait SentimentClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Polarity>;
}

/// What text of a row gets scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScoreMode {
    /// The whole target sentence
    #[default]
    Sentence,
    /// A character excerpt centred on the evaluative word
    Word,
}

/// Excerpt of `text` around the first word-bounded, case-insensitive occurrence of `word`
/// Falls back to the whole text when `word` is blank or not found.
pub fn target_excerpt<'a>(word: &str, text: &'a str, window_chars: usize) -> &'a str {
    if word.trim().is_empty() {
        return text;
    }
    let pattern = format!(r"\b{}\b", regex::escape(word));
    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return text;
    };
    let Some(found) = re.find(text) else {
        return text;
    };

    let start = if window_chars == 0 {
        found.start()
    } else {
        text[..found.start()]
            .char_indices()
            .rev()
            .nth(window_chars - 1)
            .map(|(i, _)| i)
            .unwrap_or(0)
    };
    let end = text[found.end()..]
        .char_indices()
        .nth(window_chars)
        .map(|(i, _)| found.end() + i)
        .unwrap_or(text.len());

    &text[start..end]
}

/// Words that flip the sign of a scored word within the next three tokens
const NEGATORS: &[&str] = &["no", "nunca", "jamas", "ni", "sin", "tampoco", "not", "never"];

/// Lexicon-backed classifier
/// Scores are integers per word; positive mass, negative mass and unscored tokens
/// form the distribution.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier {
    lexicon: HashMap<String, i32>,
    /// Accent-stripped keys; on collisions the alphabetically first word wins
    folded: HashMap<String, i32>,
}

impl LexiconClassifier {
    pub fn new(entries: HashMap<String, i32>) -> Self {
        let mut sorted: Vec<(String, i32)> = entries
            .into_iter()
            .map(|(word, score)| (normalize(&word), score))
            .collect();
        sorted.sort();

        let mut folded = HashMap::new();
        for (word, score) in &sorted {
            folded.entry(strip_accents(word)).or_insert(*score);
        }
        Self {
            lexicon: sorted.into_iter().collect(),
            folded,
        }
    }

    /// Parse a JSON object of `word -> score`
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: HashMap<String, i32> =
            serde_json::from_str(content).context("Lexicon must be a JSON object of word -> integer")?;
        Ok(Self::new(entries))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        let classifier = Self::from_json(&content).with_context(|| format!("Invalid lexicon {}", path.display()))?;
        info!("Loaded sentiment lexicon with {} entries", classifier.lexicon.len());
        Ok(classifier)
    }

    fn word_score(&self, token: &str) -> Option<i32> {
        self.lexicon
            .get(token)
            .or_else(|| self.folded.get(&strip_accents(token)))
            .copied()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(normalize)
        .collect()
}

impl SentimentClassifier for LexiconClassifier {
    fn predict(&self, text: &str) -> Result<Polarity> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(Polarity::zero());
        }

        let (mut pos, mut neu, mut neg) = (0.0, 0.0, 0.0);
        for (i, token) in tokens.iter().enumerate() {
            let Some(base) = self.word_score(token) else {
                neu += 1.0;
                continue;
            };
            let negated = (1..=3).any(|k| i >= k && NEGATORS.contains(&strip_accents(&tokens[i - k]).as_str()));
            let score = if negated { -base } else { base };
            match score {
                s if s > 0 => pos += s as f64,
                s if s < 0 => neg += s.unsigned_abs() as f64,
                _ => neu += 1.0,
            }
        }

        Ok(Polarity::new(pos, neu, neg).normalized())
    }
}

/// Score one word/target pair
pub fn score_text<C: SentimentClassifier + ?Sized>(
    classifier: &C,
    word: &str,
    target: &str,
    mode: ScoreMode,
    window_chars: usize,
) -> Result<Polarity> {
    if target.trim().is_empty() {
        return Ok(Polarity::zero());
    }
    let snippet = match mode {
        ScoreMode::Sentence => target,
        ScoreMode::Word => target_excerpt(word, target, window_chars),
    };
    Ok(classifier.predict(snippet)?.normalized())
}

/// Append POS/NEU/NEG percentage columns to a window table
/// Returns the column names actually used.
pub fn score_table<C: SentimentClassifier + ?Sized>(
    table: &mut Table,
    classifier: &C,
    mode: ScoreMode,
    window_chars: usize,
) -> Result<[String; 3]> {
    let word_col = resolve_role(&table.headers, ColumnRole::Word)?;
    let target_col = resolve_role(&table.headers, ColumnRole::Target)?;

    let mut columns: [Vec<String>; 3] = Default::default();
    for i in 0..table.records.len() {
        let polarity = score_text(
            classifier,
            table.field(i, word_col),
            table.field(i, target_col),
            mode,
            window_chars,
        )
        .with_context(|| format!("Classifier failed on row {}", i + 1))?;
        for (column, value) in columns.iter_mut().zip(polarity.percentages()) {
            column.push(value.to_string());
        }
    }
    debug!("Scored {} rows in {:?} mode", table.records.len(), mode);

    let [pos, neu, neg] = columns;
    Ok([
        table.push_column(POS_COLUMN, pos)?,
        table.push_column(NEU_COLUMN, neu)?,
        table.push_column(NEG_COLUMN, neg)?,
    ])
}
