use std::fmt::Display;

use log::debug;

use crate::{
    documents::{check_lengths, TextDocument},
    tokenize::Tokenizer,
};

use super::{select_by_document_frequency, FeatureError, FeatureSetGenerator, FeatureSpace};

/// Joins the tokens of a multi-token gram
pub static GRAM_SEPARATOR: &str = "-";

/// Join every window of `n` consecutive tokens into a single gram, in order
pub fn windows(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    tokens
        .windows(n)
        .map(|window| window.join(GRAM_SEPARATOR))
        .collect()
}

/// A feature set generator that splits text into n-grams. A gram of more than one token is
/// returned as its tokens joined with `-`; the tokens keep their order.
///
/// The vocabulary keeps every gram that appears in at least `min` distinct documents.
#[derive(Clone, Debug)]
pub struct NGram<T> {
    /// The 'n' in n-gram
    n: usize,

    /// The minimum number of documents a gram has to appear in to be kept
    min: usize,

    /// Produces the tokens the grams are built from
    tokenizer: T,
}

impl<T: Tokenizer> NGram<T> {
    /// Create a new n-gram generator. A `min` of zero behaves like one.
    pub fn new(n: usize, min: usize, tokenizer: T) -> Result<Self, FeatureError> {
        if n == 0 {
            return Err(FeatureError::InvalidArgument(
                "the gram width must be at least 1".to_string(),
            ));
        }

        Ok(Self { n, min, tokenizer })
    }

    /// The gram width
    pub fn n(&self) -> usize {
        self.n
    }

    /// The minimum document frequency
    pub fn min(&self) -> usize {
        self.min
    }

    /// The tokenizer the grams are built from
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Tokenize the document and return every gram, in order and with repeats
    pub fn grams(&self, document: &TextDocument) -> Result<Vec<String>, FeatureError> {
        let tokens = self.tokenizer.tokenize(document.content())?;

        Ok(windows(&tokens, self.n))
    }

    /// Select the vocabulary from features already parsed out of each document
    pub fn select(&self, document_features: &[FeatureSpace]) -> FeatureSpace {
        select_by_document_frequency(document_features, self.min)
    }
}

impl<T: Tokenizer> FeatureSetGenerator<TextDocument> for NGram<T> {
    fn feature_space(
        &self,
        documents: &[TextDocument],
        labels: &[String],
    ) -> Result<FeatureSpace, FeatureError> {
        let (features, _) = self.feature_space_with_features(documents, labels)?;

        Ok(features)
    }

    fn feature_space_with_features(
        &self,
        documents: &[TextDocument],
        labels: &[String],
    ) -> Result<(FeatureSpace, Vec<FeatureSpace>), FeatureError> {
        check_lengths(documents.len(), labels.len())?;

        let document_features = self.parse_all_features(documents)?;
        let features = self.select(&document_features);

        debug!(
            "Selected {} {}-grams appearing in at least {} of {} documents",
            features.len(),
            self.n,
            self.min.max(1),
            documents.len()
        );

        Ok((features, document_features))
    }

    fn parse_features(&self, document: &TextDocument) -> Result<FeatureSpace, FeatureError> {
        Ok(self.grams(document)?.into_iter().collect())
    }
}

impl<T: Display> Display for NGram<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NGram{{min={};n={};tokenizer={}}}",
            self.min, self.n, self.tokenizer
        )
    }
}
