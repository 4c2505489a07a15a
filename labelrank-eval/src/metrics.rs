//! Rank-quality metrics over binary relevance rows.
//!
//! Each row is a ranked list: position 0 holds the relevance of the most
//! confident guess. Relevance is counted as integers, never by summing
//! booleans as numbers.
//!
//! Formulas (1-indexed rank i, R = relevant items in the row):
//! - AP = (1/R) · Σ precision@i over relevant positions i, 0 when R = 0
//! - RR = 1 / rank of the first relevant item, 0 when there is none
//! - DCG@k = Σ rel(i) / log2(i + 1), NDCG@k = DCG@k / IDCG@k, 0 when IDCG is 0
//! - R-precision = precision@R, 0 when R = 0
//! - precision@k = hits in the top min(k, len) / min(k, len)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::ranking::RankingMatrix;

/// Output keys of [`BasicMetrics::to_map`], in reporting order.
pub const METRIC_NAMES: [&str; 6] = ["map", "mrr", "ndcg", "r_prec", "p_at_3", "p_at_5"];

/// Number of relevant positions in a ranked row.
pub fn relevant_count(row: &[bool]) -> usize {
    row.iter().filter(|&&rel| rel).count()
}

/// Fraction of the top `min(k, row.len())` positions that are relevant.
pub fn precision_at_k(row: &[bool], k: usize) -> f64 {
    let cutoff = k.min(row.len());
    if cutoff == 0 {
        return 0.0;
    }
    relevant_count(&row[..cutoff]) as f64 / cutoff as f64
}

pub fn average_precision(row: &[bool]) -> f64 {
    let total = relevant_count(row);
    if total == 0 {
        return 0.0;
    }
    let mut hits = 0usize;
    let mut sum = 0.0;
    for (i, &rel) in row.iter().enumerate() {
        if rel {
            hits += 1;
            sum += hits as f64 / (i + 1) as f64;
        }
    }
    sum / total as f64
}

pub fn reciprocal_rank(row: &[bool]) -> f64 {
    row.iter()
        .position(|&rel| rel)
        .map_or(0.0, |pos| 1.0 / (pos + 1) as f64)
}

fn discount(position: usize) -> f64 {
    // position is 0-indexed, so rank i = position + 1 and the discount is log2(i + 1).
    (position as f64 + 2.0).log2()
}

pub fn dcg_at_k(row: &[bool], k: usize) -> f64 {
    row.iter()
        .take(k)
        .enumerate()
        .filter(|(_, rel)| **rel)
        .map(|(i, _)| 1.0 / discount(i))
        .sum()
}

/// DCG of the ideal ordering: every relevant item ranked first.
fn ideal_dcg_at_k(relevant: usize, k: usize) -> f64 {
    (0..relevant.min(k)).map(|i| 1.0 / discount(i)).sum()
}

pub fn ndcg_at_k(row: &[bool], k: usize) -> f64 {
    let idcg = ideal_dcg_at_k(relevant_count(row), k);
    if idcg == 0.0 {
        return 0.0;
    }
    dcg_at_k(row, k) / idcg
}

pub fn r_precision(row: &[bool]) -> f64 {
    match relevant_count(row) {
        0 => 0.0,
        r => precision_at_k(row, r),
    }
}

fn mean_of(rows: &RankingMatrix, f: impl Fn(&[bool]) -> f64) -> f64 {
    rows.iter().map(|row| f(row)).sum::<f64>() / rows.len() as f64
}

/// Mean of [`average_precision`] over all rows.
pub fn mean_average_precision(rows: &RankingMatrix) -> f64 {
    mean_of(rows, average_precision)
}

/// Mean of [`reciprocal_rank`] over all rows.
pub fn mean_reciprocal_rank(rows: &RankingMatrix) -> f64 {
    mean_of(rows, reciprocal_rank)
}

/// Scores of a single ranked row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowScores {
    pub relevant: usize,
    pub average_precision: f64,
    pub reciprocal_rank: f64,
    pub ndcg: f64,
    pub r_prec: f64,
    pub p_at_3: f64,
    pub p_at_5: f64,
}

impl RowScores {
    pub fn from_row(row: &[bool]) -> Self {
        Self {
            relevant: relevant_count(row),
            average_precision: average_precision(row),
            reciprocal_rank: reciprocal_rank(row),
            ndcg: ndcg_at_k(row, row.len()),
            r_prec: r_precision(row),
            p_at_3: precision_at_k(row, 3),
            p_at_5: precision_at_k(row, 5),
        }
    }
}

/// The six aggregate ranking metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMetrics {
    pub map: f64,
    pub mrr: f64,
    pub ndcg: f64,
    pub r_prec: f64,
    pub p_at_3: f64,
    pub p_at_5: f64,
}

impl BasicMetrics {
    /// Metric name → value, keyed by [`METRIC_NAMES`].
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        METRIC_NAMES.into_iter().zip(self.values()).collect()
    }

    /// Values in [`METRIC_NAMES`] order.
    pub fn values(&self) -> [f64; 6] {
        [
            self.map,
            self.mrr,
            self.ndcg,
            self.r_prec,
            self.p_at_3,
            self.p_at_5,
        ]
    }
}

/// Reduce a ranking matrix to the six aggregate metrics.
///
/// An empty matrix has no defined mean and is rejected.
pub fn calculate_basic_metrics(rows: &RankingMatrix) -> Result<BasicMetrics> {
    if rows.is_empty() {
        return Err(EvalError::EmptyRanking);
    }
    Ok(BasicMetrics {
        map: mean_average_precision(rows),
        mrr: mean_reciprocal_rank(rows),
        ndcg: mean_of(rows, |row| ndcg_at_k(row, row.len())),
        r_prec: mean_of(rows, r_precision),
        p_at_3: mean_of(rows, |row| precision_at_k(row, 3)),
        p_at_5: mean_of(rows, |row| precision_at_k(row, 5)),
    })
}
