//! # labelrank-eval — ranking-quality evaluation for label predictions
//!
//! Takes confidence-scored `(document, label)` predictions and ground-truth
//! label sets, aligns them into dense matrices and reduces them to MAP, MRR,
//! NDCG, R-precision, precision@3 and precision@5.
//!
//! ```text
//! predictions ─┐
//!              ├─ build_result_matrices ─ rank_align ─ calculate_basic_metrics
//! ground truth ┘        (y_true, y_pred)    (ranking)        (BasicMetrics)
//! ```
//!
//! The label vocabulary is supplied by the caller through [`LabelVocabulary`];
//! nothing is global and every call builds its own matrices.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod matrix;
pub mod metrics;
pub mod ranking;
pub mod vocabulary;

// Re-exports
pub use config::{EvalConfig, OutputFormat, load_config};
pub use error::{EvalError, Result};
pub use evaluator::{DocumentScores, EvaluationReport, Evaluator, evaluate_results};
pub use input::{GroundTruth, Prediction, PredictionSet, load_ground_truth, load_predictions};
pub use matrix::{RelevanceMatrix, ScoreMatrix, build_relevance_matrix, build_result_matrices};
pub use metrics::{BasicMetrics, METRIC_NAMES, RowScores, calculate_basic_metrics};
pub use ranking::{RankingMatrix, argsort_descending, rank_align};
pub use vocabulary::{LabelIndex, LabelVocabulary, Vocabulary, build_label_index};
