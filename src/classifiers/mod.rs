use serde::{Deserialize, Serialize};

use crate::documents::{Document, TrainingExample};

/// Naive Bayes over generated feature sets
pub mod naive_bayes;

pub use naive_bayes::{NaiveBayes, NaiveBayesError};

/// The result of classifying one document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The predicted class label
    pub label: String,

    /// The confidence in the prediction, in `[0, 1]`. `None` when the backend does not report
    /// confidences.
    pub confidence: Option<f64>,
}

impl ClassificationResult {
    /// Create a new result from a label and an optional, unclamped confidence
    pub fn new(label: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// A prediction with a confidence, clamped into `[0, 1]`
    pub fn with_confidence(label: impl Into<String>, confidence: f64) -> Self {
        Self::new(label, Some(confidence.clamp(0.0, 1.0)))
    }

    /// A prediction from a backend that does not report confidences
    pub fn without_confidence(label: impl Into<String>) -> Self {
        Self::new(label, None)
    }
}

/// A trainable classifier backend.
///
/// `train` may be called repeatedly; each call replaces whatever was learned before.
pub trait Classifier<D: Document> {
    /// Errors raised by the backend. They are propagated to callers unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Train (or retrain) the classifier on the given examples
    fn train(&mut self, examples: &[TrainingExample<D>]) -> Result<(), Self::Error>;

    /// Classify a single document
    fn classify_document(&self, document: &D) -> Result<ClassificationResult, Self::Error>;

    /// Classify many documents, returning one result per document, in order. Backends that
    /// work more efficiently on groups of documents should override this.
    fn classify(&self, documents: &[D]) -> Result<Vec<ClassificationResult>, Self::Error> {
        documents
            .iter()
            .map(|document| self.classify_document(document))
            .collect()
    }

    /// Classify many documents, keeping only the predicted labels
    fn classify_to_labels(&self, documents: &[D]) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .classify(documents)?
            .into_iter()
            .map(|result| result.label)
            .collect())
    }
}

impl<D: Document, C: Classifier<D> + ?Sized> Classifier<D> for Box<C> {
    type Error = C::Error;

    fn train(&mut self, examples: &[TrainingExample<D>]) -> Result<(), Self::Error> {
        (**self).train(examples)
    }

    fn classify_document(&self, document: &D) -> Result<ClassificationResult, Self::Error> {
        (**self).classify_document(document)
    }

    fn classify(&self, documents: &[D]) -> Result<Vec<ClassificationResult>, Self::Error> {
        (**self).classify(documents)
    }
}
