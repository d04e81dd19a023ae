//! Error types for the triage pipeline
//!
//! Every variant is a local precondition violation; operations are pure and
//! deterministic given valid inputs, so there is no retry path anywhere.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The requested table cannot host the fixed fault windows
    #[error("invalid sample count {requested}: the injected fault windows require at least {minimum} rows")]
    InvalidSampleCount { requested: usize, minimum: usize },

    /// Evaluation requested for a row the table does not contain
    #[error("row index {index} out of range for a table of {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    /// Evaluation requested before models were trained
    #[error("models are not trained; train the session before evaluating samples")]
    NotTrained,
}
