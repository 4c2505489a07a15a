//! Rank alignment: turn per-label relevance plus per-label confidence into
//! "was the k-th most confident guess relevant".

use crate::error::{EvalError, Result};
use crate::matrix::{RelevanceMatrix, ScoreMatrix};

/// `y_pred` after ranking: row i, position k is true iff document i's k-th
/// most confident label is relevant.
pub type RankingMatrix = Vec<Vec<bool>>;

/// Column permutation that orders `scores` from highest to lowest.
///
/// The sort is stable, so equal scores keep ascending column order.
/// `-0.0` and `0.0` count as equal.
pub fn argsort_descending(scores: &[f64]) -> Vec<usize> {
    // Adding 0.0 maps -0.0 to 0.0 and leaves every other value unchanged.
    let key = |col: usize| scores[col] + 0.0;
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| key(b).total_cmp(&key(a)));
    order
}

/// Gather each relevance row by its descending-confidence permutation.
pub fn rank_align(scores: &ScoreMatrix, relevance: &RelevanceMatrix) -> Result<RankingMatrix> {
    if scores.len() != relevance.len() {
        return Err(EvalError::shape_mismatch(format!(
            "{} score rows vs {} relevance rows",
            scores.len(),
            relevance.len()
        )));
    }

    scores
        .iter()
        .zip(relevance)
        .enumerate()
        .map(|(row, (score_row, relevance_row))| {
            if score_row.len() != relevance_row.len() {
                return Err(EvalError::shape_mismatch(format!(
                    "row {row}: {} scores vs {} relevance cells",
                    score_row.len(),
                    relevance_row.len()
                )));
            }
            Ok(argsort_descending(score_row)
                .into_iter()
                .map(|col| relevance_row[col])
                .collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_argsort_descending() {
        assert_eq!(argsort_descending(&[0.1, 0.9, 0.5]), vec![1, 2, 0]);
        assert!(argsort_descending(&[]).is_empty());
    }

    #[test]
    fn test_ties_keep_column_order() {
        assert_eq!(argsort_descending(&[0.0, 0.7, 0.0, 0.7]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_signed_zeros_tie() {
        assert_eq!(argsort_descending(&[-0.0, 0.0, 0.0]), vec![0, 1, 2]);
        assert_eq!(argsort_descending(&[0.0, -0.0, 0.5]), vec![2, 0, 1]);
    }

    #[test]
    fn test_negative_and_infinite_scores() {
        assert_eq!(
            argsort_descending(&[-1.0, f64::INFINITY, 0.0, f64::NEG_INFINITY]),
            vec![1, 2, 0, 3]
        );
    }

    #[test]
    fn test_rank_align_example() {
        let scores = vec![vec![0.9, 0.1, 0.0]];
        let relevance = vec![vec![true, false, false]];
        assert_eq!(
            rank_align(&scores, &relevance).unwrap(),
            vec![vec![true, false, false]]
        );
    }

    #[test]
    fn test_rank_align_moves_relevant_by_confidence() {
        let scores = vec![vec![0.2, 0.3, 0.9], vec![0.0, 0.0, 0.4]];
        let relevance = vec![vec![true, false, false], vec![false, true, false]];
        assert_eq!(
            rank_align(&scores, &relevance).unwrap(),
            vec![vec![false, false, true], vec![false, false, true]]
        );
    }

    #[test]
    fn test_rank_align_row_count_mismatch() {
        let scores = vec![vec![0.1]];
        let relevance: RelevanceMatrix = vec![];
        assert!(matches!(
            rank_align(&scores, &relevance),
            Err(EvalError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_rank_align_column_mismatch() {
        let scores = vec![vec![0.1, 0.2]];
        let relevance = vec![vec![true]];
        assert!(matches!(
            rank_align(&scores, &relevance),
            Err(EvalError::ShapeMismatch(_))
        ));
    }
}
