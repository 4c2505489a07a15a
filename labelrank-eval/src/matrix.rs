//! Dense relevance and score matrices.
//!
//! Rows are documents ordered by id, starting at the smallest ground truth
//! id; columns follow vocabulary order. Both matrices are fully materialized
//! and zero/false initialized.

use crate::error::{EvalError, Result};
use crate::input::GroundTruth;
use crate::vocabulary::{LabelIndex, LabelVocabulary, build_label_index};

/// `y_true`: cell is true iff the label is relevant for the document.
pub type RelevanceMatrix = Vec<Vec<bool>>;

/// `y_pred` before ranking: confidence per `(document, label)`, 0.0 if unscored.
pub type ScoreMatrix = Vec<Vec<f64>>;

/// Row offset of `doc_id`, or `None` if it falls outside `0..rows`.
fn row_of(doc_id: i64, min_docid: i64, rows: usize) -> Option<usize> {
    let offset = doc_id.checked_sub(min_docid)?;
    usize::try_from(offset).ok().filter(|&row| row < rows)
}

/// Build the ground truth matrix.
///
/// Labels missing from `label_index` are skipped. Ground truth ids must be
/// contiguous from `min_docid`, otherwise some id would land outside the
/// matrix.
pub fn build_relevance_matrix(
    ground_truth: &GroundTruth,
    label_index: &LabelIndex,
    min_docid: i64,
) -> Result<RelevanceMatrix> {
    let rows = ground_truth.len();
    let mut y_true = vec![vec![false; label_index.len()]; rows];

    for (&doc_id, labels) in ground_truth {
        let row = row_of(doc_id, min_docid, rows)
            .ok_or(EvalError::NonContiguousDocuments { doc_id, rows })?;
        for label in labels {
            if let Some(&col) = label_index.get(label.as_str()) {
                y_true[row][col] = true;
            }
        }
    }

    Ok(y_true)
}

/// Build `(y_true, y_pred)` from aligned predictions and ground truth.
///
/// The vocabulary provider is queried once. Predictions for labels outside
/// the vocabulary are ignored; repeated `(document, label)` predictions
/// overwrite earlier ones.
pub fn build_result_matrices<V: LabelVocabulary + ?Sized>(
    vocabulary: &V,
    confidences: &[f64],
    pairs: &[(i64, String)],
    ground_truth: &GroundTruth,
) -> Result<(RelevanceMatrix, ScoreMatrix)> {
    if confidences.len() != pairs.len() {
        return Err(EvalError::LengthMismatch {
            confidences: confidences.len(),
            predictions: pairs.len(),
        });
    }
    let min_docid = *ground_truth
        .keys()
        .next()
        .ok_or(EvalError::EmptyGroundTruth)?;

    let labels = vocabulary.labels();
    if labels.is_empty() {
        return Err(EvalError::EmptyVocabulary);
    }
    let label_index = build_label_index(&labels);

    let y_true = build_relevance_matrix(ground_truth, &label_index, min_docid)?;

    let rows = ground_truth.len();
    let mut y_pred = vec![vec![0.0; label_index.len()]; rows];
    let mut skipped = 0usize;

    for (index, (&conf, (doc_id, label))) in confidences.iter().zip(pairs).enumerate() {
        if conf.is_nan() {
            return Err(EvalError::InvalidConfidence { index });
        }
        let row = row_of(*doc_id, min_docid, rows)
            .ok_or_else(|| EvalError::unknown_document(*doc_id))?;
        match label_index.get(label.as_str()) {
            Some(&col) => y_pred[row][col] = conf,
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Ignored predictions for labels outside the vocabulary");
    }

    Ok((y_true, y_pred))
}
