use std::collections::{BTreeSet, HashMap};

use crate::{
    documents::{Document, DocumentError},
    tokenize::TokenizeError,
};

/// Order-preserving n-gram features
pub mod ngram;

/// Bi-Normal Separation feature selection
pub mod bns;

/// Subject Feature selection
pub mod sf;

/// Per-feature class distribution reports
pub mod report;

pub use bns::{Bns, ScoredFeature};
pub use ngram::NGram;
pub use report::{feature_distribution, FeatureDistribution};
pub use sf::Sf;

/// A single feature, compared by exact string equality
pub type Feature = String;

/// A set of distinct features, such as the vocabulary selected for a corpus
pub type FeatureSpace = BTreeSet<Feature>;

/// Feature generation Error
#[derive(thiserror::Error, Debug)]
pub enum FeatureError {
    /// A precondition on the arguments was violated
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The tokenizer failed on a document
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

impl From<DocumentError> for FeatureError {
    fn from(err: DocumentError) -> Self {
        FeatureError::InvalidArgument(err.to_string())
    }
}

/// Something that can build a vocabulary for a corpus and extract features from its documents
pub trait FeatureSetGenerator<D: Document> {
    /// Build the feature space to use for the whole corpus. The labels line up with the
    /// documents by position.
    fn feature_space(&self, documents: &[D], labels: &[String])
        -> Result<FeatureSpace, FeatureError>;

    /// Parse the (unfiltered) features out of a single document
    fn parse_features(&self, document: &D) -> Result<FeatureSpace, FeatureError>;

    /// Parse the features out of many documents, in order
    fn parse_all_features(&self, documents: &[D]) -> Result<Vec<FeatureSpace>, FeatureError> {
        documents
            .iter()
            .map(|document| self.parse_features(document))
            .collect()
    }

    /// Build the feature space along with the parsed features of every document, in order.
    /// Generators that parse the corpus while selecting override this to parse it only once.
    fn feature_space_with_features(
        &self,
        documents: &[D],
        labels: &[String],
    ) -> Result<(FeatureSpace, Vec<FeatureSpace>), FeatureError> {
        let feature_space = self.feature_space(documents, labels)?;
        let document_features = self.parse_all_features(documents)?;

        Ok((feature_space, document_features))
    }
}

impl<D: Document, G: FeatureSetGenerator<D> + ?Sized> FeatureSetGenerator<D> for Box<G> {
    fn feature_space(
        &self,
        documents: &[D],
        labels: &[String],
    ) -> Result<FeatureSpace, FeatureError> {
        (**self).feature_space(documents, labels)
    }

    fn parse_features(&self, document: &D) -> Result<FeatureSpace, FeatureError> {
        (**self).parse_features(document)
    }

    fn parse_all_features(&self, documents: &[D]) -> Result<Vec<FeatureSpace>, FeatureError> {
        (**self).parse_all_features(documents)
    }

    fn feature_space_with_features(
        &self,
        documents: &[D],
        labels: &[String],
    ) -> Result<(FeatureSpace, Vec<FeatureSpace>), FeatureError> {
        (**self).feature_space_with_features(documents, labels)
    }
}

/// Keep every feature that appears in at least `min` of the documents. Each document counts a
/// feature at most once.
pub fn select_by_document_frequency(
    document_features: &[FeatureSpace],
    min: usize,
) -> FeatureSpace {
    let min = min.max(1);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut features = FeatureSpace::new();

    for document in document_features {
        for feature in document {
            let count = counts.entry(feature.as_str()).or_insert(0);
            *count += 1;

            if *count >= min {
                features.insert(feature.clone());
            }
        }
    }

    features
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn space(features: &[&str]) -> FeatureSpace {
        features.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_select_by_document_frequency() {
        let documents = vec![space(&["a-b", "b-c"]), space(&["a-b"]), space(&["c-d"])];

        assert_eq!(select_by_document_frequency(&documents, 2), space(&["a-b"]));
        assert_eq!(
            select_by_document_frequency(&documents, 1),
            space(&["a-b", "b-c", "c-d"])
        );
        assert_eq!(
            select_by_document_frequency(&documents, 0),
            space(&["a-b", "b-c", "c-d"])
        );
        assert_eq!(select_by_document_frequency(&documents, 4), space(&[]));
    }
}
