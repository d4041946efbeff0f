use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// A required column role has no matching header in the input table
    #[error("no column found for role '{role}'; available headers: {available:?}")]
    Configuration { role: String, available: Vec<String> },

    /// The segmenter rejected one row's context; recoverable per row
    #[error("segmentation failed: {0}")]
    Segmentation(String),

    /// A match pointed outside the sentence sequence it came from
    #[error("matched sentence index {index} out of bounds for {len} sentences")]
    InvariantViolation { index: usize, len: usize },
}

impl WindowError {
    /// Per-row failures are counted and skipped, the rest abort the batch
    pub fn is_row_recoverable(&self) -> bool {
        matches!(self, WindowError::Segmentation(_))
    }
}
