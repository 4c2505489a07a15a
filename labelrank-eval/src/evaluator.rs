//! End-to-end evaluation: predictions + ground truth → ranking metrics.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{GroundTruth, PredictionSet};
use crate::matrix::build_result_matrices;
use crate::metrics::{BasicMetrics, RowScores, calculate_basic_metrics};
use crate::ranking::{RankingMatrix, rank_align};
use crate::vocabulary::LabelVocabulary;

/// Compute the six basic ranking metrics for a batch of predictions.
///
/// `confidences[i]` scores `pairs[i]`. The vocabulary provider is queried
/// once; the call is pure and returns identical results for identical input.
pub fn evaluate_results<V: LabelVocabulary + ?Sized>(
    vocabulary: &V,
    confidences: &[f64],
    pairs: &[(i64, String)],
    ground_truth: &GroundTruth,
) -> Result<BasicMetrics> {
    let ranking = build_ranking(vocabulary, confidences, pairs, ground_truth)?;
    calculate_basic_metrics(&ranking)
}

fn build_ranking<V: LabelVocabulary + ?Sized>(
    vocabulary: &V,
    confidences: &[f64],
    pairs: &[(i64, String)],
    ground_truth: &GroundTruth,
) -> Result<RankingMatrix> {
    let (y_true, y_pred) = build_result_matrices(vocabulary, confidences, pairs, ground_truth)?;
    rank_align(&y_pred, &y_true)
}

/// Per-document breakdown of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentScores {
    pub doc_id: i64,
    #[serde(flatten)]
    pub scores: RowScores,
}

/// Aggregate metrics plus the per-document rows they were averaged from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub documents: usize,
    pub labels: usize,
    pub predictions: usize,
    pub metrics: BasicMetrics,
    pub per_document: Vec<DocumentScores>,
}

/// Evaluator bound to a label vocabulary provider.
pub struct Evaluator<'a, V: LabelVocabulary + ?Sized> {
    vocabulary: &'a V,
}

impl<'a, V: LabelVocabulary + ?Sized> Evaluator<'a, V> {
    pub fn new(vocabulary: &'a V) -> Self {
        Self { vocabulary }
    }

    pub fn evaluate(
        &self,
        predictions: &PredictionSet,
        ground_truth: &GroundTruth,
    ) -> Result<BasicMetrics> {
        tracing::debug!(
            documents = ground_truth.len(),
            predictions = predictions.len(),
            "Evaluating predictions"
        );
        let metrics = evaluate_results(
            self.vocabulary,
            &predictions.confidences,
            &predictions.pairs,
            ground_truth,
        )?;
        tracing::debug!(?metrics, "Evaluation complete");
        Ok(metrics)
    }

    /// Like [`Evaluator::evaluate`], keeping per-document scores.
    ///
    /// Rows are reported in ground truth order (ascending doc id).
    pub fn evaluate_detailed(
        &self,
        predictions: &PredictionSet,
        ground_truth: &GroundTruth,
    ) -> Result<EvaluationReport> {
        let ranking = build_ranking(
            self.vocabulary,
            &predictions.confidences,
            &predictions.pairs,
            ground_truth,
        )?;
        let metrics = calculate_basic_metrics(&ranking)?;

        let per_document = ground_truth
            .keys()
            .zip(&ranking)
            .map(|(&doc_id, row)| DocumentScores {
                doc_id,
                scores: RowScores::from_row(row),
            })
            .collect();

        let report = EvaluationReport {
            documents: ranking.len(),
            labels: ranking.first().map_or(0, Vec::len),
            predictions: predictions.len(),
            metrics,
            per_document,
        };
        tracing::info!(
            documents = report.documents,
            labels = report.labels,
            map = report.metrics.map,
            ndcg = report.metrics.ndcg,
            "Evaluation report ready"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalError;
    use crate::vocabulary::Vocabulary;
    use pretty_assertions::assert_eq;

    fn truth(entries: &[(i64, &[&str])]) -> GroundTruth {
        entries
            .iter()
            .map(|(id, labels)| (*id, labels.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn predictions(items: &[(i64, &str, f64)]) -> PredictionSet {
        PredictionSet::new(
            items.iter().map(|(_, _, c)| *c).collect(),
            items.iter().map(|(d, l, _)| (*d, l.to_string())).collect(),
        )
    }

    #[test]
    fn test_end_to_end_example() {
        let vocab = Vocabulary::new(["a", "b", "c"]);
        let gt = truth(&[(10, &["a"])]);
        let preds = predictions(&[(10, "a", 0.9), (10, "b", 0.1)]);
        let m = Evaluator::new(&vocab).evaluate(&preds, &gt).unwrap();
        assert_eq!(m.map, 1.0);
        assert_eq!(m.mrr, 1.0);
        assert_eq!(m.ndcg, 1.0);
        assert_eq!(m.r_prec, 1.0);
        assert!((m.p_at_3 - 1.0 / 3.0).abs() < 1e-12);
        assert!((m.p_at_5 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_document_single_label_is_perfect() {
        let vocab = Vocabulary::new(["only"]);
        let gt = truth(&[(7, &["only"])]);
        let preds = predictions(&[(7, "only", 0.3)]);
        let m = Evaluator::new(&vocab).evaluate(&preds, &gt).unwrap();
        assert_eq!(m.values(), [1.0; 6]);
    }

    #[test]
    fn test_low_confidence_on_relevant_label() {
        let vocab = Vocabulary::new(["a", "b", "c"]);
        let gt = truth(&[(1, &["c"])]);
        let preds = predictions(&[(1, "a", 0.9), (1, "b", 0.5), (1, "c", 0.1)]);
        let m = Evaluator::new(&vocab).evaluate(&preds, &gt).unwrap();
        assert!((m.mrr - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.r_prec, 0.0);
        assert!((m.ndcg - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_detailed_report() {
        let vocab = Vocabulary::new(["a", "b"]);
        let gt = truth(&[(3, &["a"]), (4, &["b"])]);
        let preds = predictions(&[(3, "a", 0.8), (4, "a", 0.8), (4, "b", 0.2)]);
        let report = Evaluator::new(&vocab)
            .evaluate_detailed(&preds, &gt)
            .unwrap();
        assert_eq!(report.documents, 2);
        assert_eq!(report.labels, 2);
        assert_eq!(report.predictions, 3);
        assert_eq!(
            report.per_document.iter().map(|d| d.doc_id).collect::<Vec<_>>(),
            vec![3, 4]
        );
        assert_eq!(report.per_document[0].scores.reciprocal_rank, 1.0);
        assert_eq!(report.per_document[1].scores.reciprocal_rank, 0.5);
        assert_eq!(report.metrics.mrr, 0.75);
    }

    #[test]
    fn test_detailed_matches_basic() {
        let vocab = Vocabulary::new(["a", "b", "c", "d"]);
        let gt = truth(&[(0, &["a", "d"]), (1, &["b"]), (2, &[])]);
        let preds = predictions(&[(0, "d", 0.7), (0, "b", 0.6), (1, "c", 0.9), (2, "a", 0.2)]);
        let evaluator = Evaluator::new(&vocab);
        let basic = evaluator.evaluate(&preds, &gt).unwrap();
        let detailed = evaluator.evaluate_detailed(&preds, &gt).unwrap();
        assert_eq!(basic, detailed.metrics);
    }

    #[test]
    fn test_errors_propagate() {
        let vocab = Vocabulary::new(["a"]);
        let evaluator = Evaluator::new(&vocab);
        let preds = predictions(&[(1, "a", 0.5)]);
        assert!(matches!(
            evaluator.evaluate(&preds, &GroundTruth::new()),
            Err(EvalError::EmptyGroundTruth)
        ));
        assert!(matches!(
            evaluator.evaluate(&preds, &truth(&[(2, &["a"])])),
            Err(EvalError::UnknownDocument { doc_id: 1 })
        ));
    }

    #[test]
    fn test_free_function_with_slice_provider() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let gt = truth(&[(0, &["b"])]);
        let m = evaluate_results(labels.as_slice(), &[0.4], &[(0, "b".to_string())], &gt).unwrap();
        assert_eq!(m.mrr, 1.0);
    }
}
