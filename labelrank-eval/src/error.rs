//! Error types for the labelrank-eval crate.

use thiserror::Error;

/// Top-level error type for evaluation runs.
///
/// Every variant is fatal for the call that produced it: an evaluation either
/// fully succeeds or returns one of these, never a partial result.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Empty ground truth: at least one document is required")]
    EmptyGroundTruth,

    #[error("Empty vocabulary: the label provider returned no labels")]
    EmptyVocabulary,

    #[error("Empty ranking matrix: no documents to average over")]
    EmptyRanking,

    #[error("Unknown document: prediction references doc_id {doc_id} which has no ground truth row")]
    UnknownDocument { doc_id: i64 },

    #[error(
        "Non-contiguous document ids: doc_id {doc_id} falls outside the {rows} ground truth rows"
    )]
    NonContiguousDocuments { doc_id: i64, rows: usize },

    #[error("Length mismatch: {confidences} confidences but {predictions} prediction pairs")]
    LengthMismatch {
        confidences: usize,
        predictions: usize,
    },

    #[error("Invalid confidence at index {index}: NaN cannot be ranked")]
    InvalidConfidence { index: usize },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EvalError {
    pub fn unknown_document(doc_id: i64) -> Self {
        Self::UnknownDocument { doc_id }
    }

    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<figment::Error> for EvalError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvalError>;
