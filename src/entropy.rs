// WHY: how spread a word's polarity is across its contexts, measured as the Shannon
// entropy of a 3-bin histogram (negative / neutral / positive)

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::columns::{resolve_role, ColumnRole};
use crate::table::Table;

/// Bin edges; the last edge sits just above 1.0 so that 1.0 lands in the top bin
pub const BIN_EDGES: [f64; 4] = [0.0, 0.33, 0.66, 1.0000001];

pub const ENTROPY_COLUMN: &str = "entropy_3bins";
pub const ENTROPY_NORM_COLUMN: &str = "entropy_3bins_norm";

/// Base-2 Shannon entropy; zero entries are ignored
pub fn shannon_entropy(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .filter(|p| **p > 0.0)
        .fold(0.0, |acc, p| acc + p * (1.0 / p).log2())
}

/// Bin index for a polarity value, None when outside every bin
pub fn bin_of(value: f64) -> Option<usize> {
    BIN_EDGES
        .windows(2)
        .position(|edge| value >= edge[0] && value < edge[1])
}

/// Entropy of one word's polarity histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordEntropy {
    pub entropy: f64,
    /// Entropy divided by log2 of the bin count
    pub normalized: f64,
}

/// Group `(word, polarity)` pairs by word and compute each word's entropy
pub fn entropy_by_word<'a, I>(pairs: I) -> BTreeMap<String, WordEntropy>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut histograms: BTreeMap<String, [u64; 3]> = BTreeMap::new();
    for (word, value) in pairs {
        let counts = histograms.entry(word.to_string()).or_insert([0; 3]);
        if let Some(bin) = bin_of(value) {
            counts[bin] += 1;
        }
    }

    let max_entropy = (BIN_EDGES.len() as f64 - 1.0).log2();
    histograms
        .into_iter()
        .map(|(word, counts)| {
            let total: u64 = counts.iter().sum();
            let entropy = if total == 0 {
                0.0
            } else {
                let p: Vec<f64> = counts.iter().map(|c| *c as f64 / total as f64).collect();
                shannon_entropy(&p)
            };
            let normalized = if max_entropy > 0.0 { entropy / max_entropy } else { 0.0 };
            (word, WordEntropy { entropy, normalized })
        })
        .collect()
}

/// Append per-word entropy columns to every row of a polarity table
/// Rows with blank or unparseable polarity do not count, and words without any valid
/// polarity get empty cells.
pub fn annotate_table(table: &mut Table, polarity_column: Option<&str>) -> Result<()> {
    let word_col = resolve_role(&table.headers, ColumnRole::Word)?;
    let polarity_col =
        crate::columns::resolve_column(&table.headers, ColumnRole::Polarity, polarity_column)?;

    let mut pairs = Vec::new();
    let mut invalid = 0usize;
    for i in 0..table.records.len() {
        let word = table.field(i, word_col);
        let raw = table.field(i, polarity_col).trim();
        if word.trim().is_empty() || raw.is_empty() {
            continue;
        }
        match raw.replace(',', ".").parse::<f64>() {
            Ok(value) => pairs.push((word, value)),
            Err(_) => invalid += 1,
        }
    }
    if invalid > 0 {
        warn!("{} rows with unparseable polarity ignored", invalid);
    }

    let entropies = entropy_by_word(pairs);
    debug!("Computed entropy for {} words", entropies.len());

    let (entropy_values, normalized_values): (Vec<String>, Vec<String>) = (0..table.records.len())
        .map(|i| match entropies.get(table.field(i, word_col)) {
            Some(e) => (e.entropy.to_string(), e.normalized.to_string()),
            None => (String::new(), String::new()),
        })
        .unzip();

    table.push_column(ENTROPY_COLUMN, entropy_values)?;
    table.push_column(ENTROPY_NORM_COLUMN, normalized_values)?;
    Ok(())
}
