use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Errors raised while pairing documents with their class labels
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// The document and label lists differ in length
    #[error("{documents} documents were given with {labels} class labels")]
    LengthMismatch {
        /// The number of documents
        documents: usize,

        /// The number of class labels
        labels: usize,
    },
}

/// A unit of classification input. What counts as a feature of a document is decided by the
/// `FeatureSetGenerator` that reads it.
pub trait Document: Clone + Debug {}

/// A document made of a single string of content
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextDocument {
    content: String,
}

impl TextDocument {
    /// Create a new document from its text content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the text content of the document
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Document for TextDocument {}

impl From<&str> for TextDocument {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for TextDocument {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// A document paired with its class label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample<D> {
    /// The document to classify
    pub document: D,

    /// The class name of the document
    pub label: String,
}

impl<D> TrainingExample<D> {
    /// Pair a document with its class label
    pub fn new(document: D, label: impl Into<String>) -> Self {
        Self {
            document,
            label: label.into(),
        }
    }
}

impl<D: Document> TrainingExample<D> {
    /// Returns the class label for the example
    pub fn class_label(&self) -> &str {
        &self.label
    }
}

/// Pair each document with the class label at the same position
pub fn zip_examples<D: Document>(
    documents: Vec<D>,
    labels: Vec<String>,
) -> Result<Vec<TrainingExample<D>>, DocumentError> {
    check_lengths(documents.len(), labels.len())?;

    Ok(documents
        .into_iter()
        .zip(labels)
        .map(|(document, label)| TrainingExample::new(document, label))
        .collect())
}

/// Split examples back into parallel document and label lists
pub fn unzip_examples<D: Document>(examples: &[TrainingExample<D>]) -> (Vec<D>, Vec<String>) {
    examples
        .iter()
        .map(|example| (example.document.clone(), example.label.clone()))
        .unzip()
}

/// Verify that a document list and a label list line up
pub fn check_lengths(documents: usize, labels: usize) -> Result<(), DocumentError> {
    if documents != labels {
        return Err(DocumentError::LengthMismatch { documents, labels });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_zip_examples() {
        let examples = zip_examples(
            vec![TextDocument::new("great movie"), TextDocument::new("awful")],
            vec!["pos".to_string(), "neg".to_string()],
        )
        .unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].document.content(), "great movie");
        assert_eq!(examples[1].class_label(), "neg");

        let (documents, labels) = unzip_examples(&examples);

        assert_eq!(documents[1], TextDocument::new("awful"));
        assert_eq!(labels, vec!["pos", "neg"]);
    }

    #[test]
    fn test_constructors_accept_borrowed_and_owned_text() {
        let borrowed = TrainingExample::new(TextDocument::new("loved it"), "pos");
        let owned = TrainingExample::new(
            TextDocument::new("loved it".to_string()),
            "pos".to_string(),
        );

        assert_eq!(borrowed, owned);
        assert_eq!(TextDocument::from("loved it"), borrowed.document);
    }

    #[test]
    fn test_zip_examples_length_mismatch() {
        let result = zip_examples(vec![TextDocument::new("lonely")], vec![]);

        assert_eq!(
            result,
            Err(DocumentError::LengthMismatch {
                documents: 1,
                labels: 0
            })
        );
    }
}
