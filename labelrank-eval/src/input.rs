//! Evaluation inputs: predictions and ground truth, plus their JSON loaders.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Document id → set of relevant labels.
///
/// JSON form is an object keyed by document id: `{"10": ["a", "b"]}`.
pub type GroundTruth = BTreeMap<i64, BTreeSet<String>>;

/// A single scored `(document, label)` guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub doc_id: i64,
    pub label: String,
    pub confidence: f64,
}

/// Index-aligned confidences and `(doc_id, label)` pairs.
///
/// The i-th confidence scores the i-th pair. Lengths are checked when the set
/// is evaluated, not on construction, so deserialized input can be reported
/// with a precise [`crate::EvalError::LengthMismatch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    pub confidences: Vec<f64>,
    pub pairs: Vec<(i64, String)>,
}

impl PredictionSet {
    pub fn new(confidences: Vec<f64>, pairs: Vec<(i64, String)>) -> Self {
        Self { confidences, pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn push(&mut self, prediction: Prediction) {
        self.confidences.push(prediction.confidence);
        self.pairs.push((prediction.doc_id, prediction.label));
    }
}

impl FromIterator<Prediction> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = Prediction>>(iter: I) -> Self {
        let mut set = Self::default();
        for prediction in iter {
            set.push(prediction);
        }
        set
    }
}

/// On-disk prediction file: either the aligned pair of arrays or a list of
/// records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionFile {
    Aligned(PredictionSet),
    Records(Vec<Prediction>),
}

/// Read predictions from a JSON file.
pub fn load_predictions(path: &Path) -> Result<PredictionSet> {
    let text = std::fs::read_to_string(path)?;
    let set = match serde_json::from_str::<PredictionFile>(&text)? {
        PredictionFile::Aligned(set) => set,
        PredictionFile::Records(records) => records.into_iter().collect(),
    };
    tracing::debug!(path = %path.display(), predictions = set.len(), "Loaded predictions");
    Ok(set)
}

/// Read ground truth from a JSON file.
pub fn load_ground_truth(path: &Path) -> Result<GroundTruth> {
    let text = std::fs::read_to_string(path)?;
    let ground_truth: GroundTruth = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.display(), documents = ground_truth.len(), "Loaded ground truth");
    Ok(ground_truth)
}
