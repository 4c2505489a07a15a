//! Label vocabulary: the ordered set of labels that defines matrix columns.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Label → column index for one evaluation call.
pub type LabelIndex = HashMap<String, usize>;

/// Source of the label vocabulary.
///
/// The evaluator queries the provider exactly once per call and treats the
/// returned sequence as immutable for the rest of that call.
pub trait LabelVocabulary {
    /// All known labels, in column order.
    fn labels(&self) -> Vec<String>;
}

impl LabelVocabulary for [String] {
    fn labels(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl LabelVocabulary for Vec<String> {
    fn labels(&self) -> Vec<String> {
        self.clone()
    }
}

impl<T: LabelVocabulary + ?Sized> LabelVocabulary for &T {
    fn labels(&self) -> Vec<String> {
        (**self).labels()
    }
}

/// In-memory vocabulary with unique labels in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary, keeping the first occurrence of any repeated label.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let labels = labels
            .into_iter()
            .map(Into::into)
            .filter(|label: &String| seen.insert(label.clone()))
            .collect();
        Self { labels }
    }

    /// Parse a vocabulary from text: one label per line, blank lines and
    /// `#` comments skipped, surrounding whitespace trimmed.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a vocabulary file (see [`Vocabulary::parse`]).
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let vocab = Self::parse(&text);
        tracing::debug!(path = %path.display(), labels = vocab.len(), "Loaded vocabulary");
        Ok(vocab)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl LabelVocabulary for Vocabulary {
    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Map each label to its column.
///
/// Columns are dense: a repeated label keeps its first column and does not
/// consume a new one, so `index.len()` is the column count.
pub fn build_label_index(labels: &[String]) -> LabelIndex {
    let mut index = LabelIndex::with_capacity(labels.len());
    for label in labels {
        let next = index.len();
        index.entry(label.clone()).or_insert(next);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_vocabulary_dedups_keeping_first() {
        let vocab = Vocabulary::new(["a", "b", "a", "c"]);
        assert_eq!(vocab.as_slice(), ["a", "b", "c"]);
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("b"));
        assert!(!vocab.contains("z"));
    }

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let vocab = Vocabulary::parse("# labels\nphysics\n\n  optics \n#x\nquantum\n");
        assert_eq!(vocab.as_slice(), ["physics", "optics", "quantum"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();
        let vocab = Vocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocab.labels(), vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Vocabulary::from_file(Path::new("/nonexistent/labels.txt"));
        assert!(matches!(result, Err(crate::EvalError::Io(_))));
    }

    #[test]
    fn test_label_index_first_column_wins() {
        let labels: Vec<String> = ["x", "y", "x"].iter().map(|s| s.to_string()).collect();
        let index = build_label_index(&labels);
        assert_eq!(index.len(), 2);
        assert_eq!(index["x"], 0);
        assert_eq!(index["y"], 1);

        let labels: Vec<String> = ["x", "x", "y"].iter().map(|s| s.to_string()).collect();
        let index = build_label_index(&labels);
        assert_eq!(index["y"], 1);
    }

    #[test]
    fn test_vec_provider() {
        let labels = vec!["p".to_string(), "q".to_string()];
        assert_eq!(LabelVocabulary::labels(&labels), labels);
        assert_eq!(labels.as_slice().labels(), labels);
    }
}
