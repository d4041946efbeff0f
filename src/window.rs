use serde::{Deserialize, Serialize};

use crate::error::WindowError;
use crate::segmenter::Sentence;

/// Previous sentence, matched sentence and next sentence, each trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub left: String,
    pub target: String,
    pub right: String,
}

/// Build the window around `matched_index`
/// An out-of-range index is a programming error upstream and is reported, not clamped.
pub fn extract(sentences: &[Sentence], matched_index: usize) -> Result<Window, WindowError> {
    let target = sentences
        .get(matched_index)
        .ok_or(WindowError::InvariantViolation {
            index: matched_index,
            len: sentences.len(),
        })?;

    let left = matched_index
        .checked_sub(1)
        .and_then(|i| sentences.get(i))
        .map(|s| s.text.trim().to_string())
        .unwrap_or_default();

    let right = sentences
        .get(matched_index + 1)
        .map(|s| s.text.trim().to_string())
        .unwrap_or_default();

    Ok(Window {
        left,
        target: target.text.trim().to_string(),
        right,
    })
}
