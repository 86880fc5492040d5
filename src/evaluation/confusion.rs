use std::{collections::BTreeMap, fmt::Display};

use serde::Serialize;

use crate::utils::classes::{distinct_labels, invert_map};

/// Confusion Matrix Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfusionMatrixError {
    /// The label is not one of the matrix's classes
    #[error("unknown class label {0}")]
    UnknownLabel(String),
}

/// A square (predicted × actual) count matrix indexed by class label
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// The class labels, sorted
    labels: Vec<String>,

    /// A mapping from class labels to row and column indexes
    #[serde(skip)]
    label2id: BTreeMap<String, usize>,

    /// `counts[predicted][actual]`
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// Create an all-zero matrix over the given labels. Duplicates collapse.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<S> = labels.into_iter().collect();
        let labels = distinct_labels(labels.iter().map(|label| label.as_ref()));

        let label2id = invert_map(labels.iter().cloned().enumerate());
        let counts = vec![vec![0; labels.len()]; labels.len()];

        Self {
            labels,
            label2id,
            counts,
        }
    }

    /// The class labels, sorted
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn index(&self, label: &str) -> Result<usize, ConfusionMatrixError> {
        self.label2id
            .get(label)
            .copied()
            .ok_or_else(|| ConfusionMatrixError::UnknownLabel(label.to_string()))
    }

    /// Record one classification outcome
    pub fn add(&mut self, predicted: &str, actual: &str) -> Result<(), ConfusionMatrixError> {
        let predicted = self.index(predicted)?;
        let actual = self.index(actual)?;

        self.counts[predicted][actual] += 1;

        Ok(())
    }

    /// The number of documents of class `actual` that were predicted as `predicted`
    pub fn count(&self, predicted: &str, actual: &str) -> Result<u64, ConfusionMatrixError> {
        Ok(self.counts[self.index(predicted)?][self.index(actual)?])
    }

    /// The sum of all cells
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// The sum of the diagonal
    pub fn correct(&self) -> u64 {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// The fraction of outcomes on the diagonal, or `None` before any outcome is recorded
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.correct(), self.total())
    }

    /// Of the documents predicted as `label`, the fraction that really were
    pub fn precision(&self, label: &str) -> Result<Option<f64>, ConfusionMatrixError> {
        let i = self.index(label)?;
        let predicted: u64 = self.counts[i].iter().sum();

        Ok(ratio(self.counts[i][i], predicted))
    }

    /// Of the documents that were `label`, the fraction predicted as such
    pub fn recall(&self, label: &str) -> Result<Option<f64>, ConfusionMatrixError> {
        let i = self.index(label)?;
        let actual: u64 = self.counts.iter().map(|row| row[i]).sum();

        Ok(ratio(self.counts[i][i], actual))
    }

    /// The harmonic mean of precision and recall
    pub fn f1(&self, label: &str) -> Result<Option<f64>, ConfusionMatrixError> {
        let (Some(precision), Some(recall)) = (self.precision(label)?, self.recall(label)?) else {
            return Ok(None);
        };

        if precision + recall == 0.0 {
            return Ok(None);
        }

        Ok(Some(2.0 * precision * recall / (precision + recall)))
    }

    /// A human-readable report of the matrix and per-class metrics
    pub fn summary(&self) -> String {
        let width = self
            .labels
            .iter()
            .map(String::len)
            .chain([self.total().to_string().len(), 9])
            .max()
            .unwrap_or(9);

        let mut out = String::new();

        out.push_str("=== Confusion Matrix (rows: predicted, columns: actual) ===\n");
        out.push_str(&format!("{:>width$}", "", width = width));
        for label in &self.labels {
            out.push_str(&format!(" {:>width$}", label, width = width));
        }
        out.push('\n');

        for (label, row) in self.labels.iter().zip(&self.counts) {
            out.push_str(&format!("{:>width$}", label, width = width));
            for count in row {
                out.push_str(&format!(" {:>width$}", count, width = width));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "\nCorrectly classified: {} / {} ({})\n",
            self.correct(),
            self.total(),
            percent(self.accuracy())
        ));

        out.push_str("\n=== Per-class Metrics ===\n");
        out.push_str(&format!(
            "{:>width$} {:>9} {:>9} {:>9}\n",
            "class",
            "precision",
            "recall",
            "f1",
            width = width
        ));

        for label in &self.labels {
            out.push_str(&format!(
                "{:>width$} {:>9} {:>9} {:>9}\n",
                label,
                decimal(self.precision(label).ok().flatten()),
                decimal(self.recall(label).ok().flatten()),
                decimal(self.f1(label).ok().flatten()),
                width = width
            ));
        }

        out
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

fn ratio(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(count as f64 / total as f64)
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn decimal(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn matrix() -> ConfusionMatrix {
        let mut matrix = ConfusionMatrix::new(["pos", "neg", "pos"]);

        for (predicted, actual) in [
            ("pos", "pos"),
            ("pos", "pos"),
            ("pos", "neg"),
            ("neg", "neg"),
            ("neg", "pos"),
        ] {
            matrix.add(predicted, actual).unwrap();
        }

        matrix
    }

    #[test]
    fn test_counts() {
        let matrix = matrix();

        assert_eq!(matrix.labels(), &["neg".to_string(), "pos".to_string()]);
        assert_eq!(matrix.count("pos", "pos"), Ok(2));
        assert_eq!(matrix.count("pos", "neg"), Ok(1));
        assert_eq!(matrix.count("neg", "pos"), Ok(1));
        assert_eq!(matrix.total(), 5);
        assert_eq!(matrix.correct(), 3);
        assert_eq!(matrix.accuracy(), Some(0.6));
    }

    #[test]
    fn test_per_class_metrics() {
        let matrix = matrix();

        assert_eq!(matrix.precision("pos"), Ok(Some(2.0 / 3.0)));
        assert_eq!(matrix.recall("pos"), Ok(Some(2.0 / 3.0)));
        assert_eq!(matrix.precision("neg"), Ok(Some(0.5)));
        assert_eq!(matrix.recall("neg"), Ok(Some(0.5)));
        assert_eq!(matrix.f1("neg"), Ok(Some(0.5)));
    }

    #[test]
    fn test_unknown_label() {
        let mut matrix = matrix();

        assert_eq!(
            matrix.add("maybe", "pos"),
            Err(ConfusionMatrixError::UnknownLabel("maybe".to_string()))
        );
        assert_eq!(matrix.total(), 5);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = ConfusionMatrix::new(["a", "b"]);

        assert_eq!(matrix.total(), 0);
        assert_eq!(matrix.accuracy(), None);
        assert_eq!(matrix.precision("a"), Ok(None));
        assert_eq!(matrix.f1("a"), Ok(None));
        assert!(matrix.summary().contains("Correctly classified: 0 / 0 (n/a)"));
    }

    #[test]
    fn test_summary() {
        let summary = matrix().summary();

        assert!(summary.contains("Correctly classified: 3 / 5 (60.00%)"));
        assert!(summary.contains("      pos         1         2\n"));
    }
}
