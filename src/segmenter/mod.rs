// WHY: segmenter seam - the locator only ever sees Sentence/Token values, so any
// segmenter (the built-in rule segmenter or an external one) plugs in behind one trait

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WindowError;

pub mod abbreviations;
pub mod lemmas;
pub mod rule_segmenter;

pub use abbreviations::AbbreviationChecker;
pub use lemmas::LemmaLexicon;
pub use rule_segmenter::{RuleSegmenter, SegmentationRules};

/// One token of a sentence with its surface form and lemma, casing untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    pub lemma: String,
}

impl Token {
    pub fn new(surface: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            lemma: lemma.into(),
        }
    }

    /// Token whose lemma is its own surface form
    pub fn unlemmatized(surface: impl Into<String>) -> Self {
        let surface = surface.into();
        Self {
            lemma: surface.clone(),
            surface,
        }
    }
}

/// A sentence as produced by a segmenter, in order of occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }
}

/// Sentence segmenter interface
/// Implementations must return sentences in text order; window assembly depends on it.
/// `Send + Sync` so one instance can serve every row worker of a batch.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>>;
}

impl<T: Segmenter + ?Sized> Segmenter for std::sync::Arc<T> {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>> {
        (**self).segment(text)
    }
}

/// Segment one row's context
/// Empty or whitespace-only input yields no sentences without touching the segmenter.
/// Segmenter failures come back as `WindowError::Segmentation` so the orchestrator can
/// skip the row instead of aborting the batch.
pub fn segment<S: Segmenter + ?Sized>(
    segmenter: &S,
    context: &str,
) -> std::result::Result<Vec<Sentence>, WindowError> {
    if context.trim().is_empty() {
        return Ok(Vec::new());
    }

    let sentences = segmenter
        .segment(context)
        .map_err(|e| WindowError::Segmentation(format!("{e:#}")))?;

    debug!("Segmented {} chars into {} sentences", context.len(), sentences.len());
    Ok(sentences)
}
