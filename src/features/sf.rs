//! Subject Feature selection, as proposed by Dr. Leilei Chu.
//!
//! Tokens are ranked by how often they occur in the corpus and the top `num_features` form the
//! base vocabulary. The frequency of the last token taken is the fence value. Tokens tied at
//! the fence are either all kept or all dropped, depending on how much of the top ranks the
//! tie already occupies, so the cut never falls in the middle of a tie.

use std::{collections::HashMap, fmt::Display};

use log::debug;

use crate::{
    documents::{check_lengths, TextDocument},
    tokenize::Tokenizer,
};

use super::{ngram::windows, FeatureError, FeatureSetGenerator, FeatureSpace, NGram};

/// A feature set generator using Subject Feature selection
#[derive(Clone, Debug)]
pub struct Sf<T> {
    /// Parses the documents and provides the tokenizer
    ngram: NGram<T>,

    /// The starting size of the vocabulary. The final size is usually close to it, but the
    /// fence decision may add or remove the tied tokens.
    num_features: usize,

    /// The minimum ratio of tied tokens inside the top ranks to tied tokens outside them for the
    /// whole tie to be kept
    threshold: f64,
}

impl<T: Tokenizer> Sf<T> {
    /// Create a new SF generator
    pub fn new(
        n: usize,
        min: usize,
        num_features: usize,
        threshold: f64,
        tokenizer: T,
    ) -> Result<Self, FeatureError> {
        if num_features == 0 {
            return Err(FeatureError::InvalidArgument(
                "the number of features must be at least 1".to_string(),
            ));
        }

        if !threshold.is_finite() || threshold < 0.0 {
            return Err(FeatureError::InvalidArgument(format!(
                "the threshold must be a non-negative number, got {}",
                threshold
            )));
        }

        Ok(Self {
            ngram: NGram::new(n, min, tokenizer)?,
            num_features,
            threshold,
        })
    }

    /// The target vocabulary size
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// The fence inclusion threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Count every occurrence of every token in the corpus
    pub fn token_frequencies(
        &self,
        documents: &[TextDocument],
    ) -> Result<HashMap<String, usize>, FeatureError> {
        let mut frequencies = HashMap::new();

        for document in documents {
            for token in self.ngram.tokenizer().tokenize(document.content())? {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        Ok(frequencies)
    }
}

impl<T: Tokenizer> FeatureSetGenerator<TextDocument> for Sf<T> {
    fn feature_space(
        &self,
        documents: &[TextDocument],
        labels: &[String],
    ) -> Result<FeatureSpace, FeatureError> {
        check_lengths(documents.len(), labels.len())?;

        let frequencies = self.token_frequencies(documents)?;

        Ok(select_subject_features(&frequencies, self.num_features, self.threshold))
    }

    fn feature_space_with_features(
        &self,
        documents: &[TextDocument],
        labels: &[String],
    ) -> Result<(FeatureSpace, Vec<FeatureSpace>), FeatureError> {
        check_lengths(documents.len(), labels.len())?;

        let mut frequencies = HashMap::new();
        let mut document_features = Vec::with_capacity(documents.len());

        for document in documents {
            let tokens = self.ngram.tokenizer().tokenize(document.content())?;

            document_features.push(windows(&tokens, self.ngram.n()).into_iter().collect());

            for token in tokens {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        let features = select_subject_features(&frequencies, self.num_features, self.threshold);

        Ok((features, document_features))
    }

    fn parse_features(&self, document: &TextDocument) -> Result<FeatureSpace, FeatureError> {
        self.ngram.parse_features(document)
    }
}

/// Rank the tokens by descending frequency, ties broken by the token itself
pub fn rank_frequencies(frequencies: &HashMap<String, usize>) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = frequencies
        .iter()
        .map(|(token, count)| (token.as_str(), *count))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
}

/// Select the vocabulary from corpus token frequencies
pub fn select_subject_features(
    frequencies: &HashMap<String, usize>,
    num_features: usize,
    threshold: f64,
) -> FeatureSpace {
    if num_features == 0 {
        return FeatureSpace::new();
    }

    if frequencies.len() <= num_features {
        return frequencies.keys().cloned().collect();
    }

    let ranked = rank_frequencies(frequencies);

    let mut features: FeatureSpace = ranked[..num_features]
        .iter()
        .map(|(token, _)| token.to_string())
        .collect();

    let fence_value = ranked[num_features - 1].1;

    let fence_band: Vec<&str> = ranked
        .iter()
        .filter(|(_, count)| *count == fence_value)
        .map(|(token, _)| *token)
        .collect();
    let above = ranked
        .iter()
        .take_while(|(_, count)| *count > fence_value)
        .count();

    // Tied tokens already inside the top ranks, and those left outside
    let intersection = num_features - above;
    let only_tail = fence_band.len() - intersection;

    let keep_band = only_tail == 0 || intersection as f64 / only_tail as f64 >= threshold;

    if keep_band {
        features.extend(fence_band.iter().map(|token| token.to_string()));
    } else {
        for token in &fence_band {
            features.remove(*token);
        }

        if features.is_empty() {
            features.extend(fence_band.iter().map(|token| token.to_string()));
        }
    }

    debug!(
        "Fence value {} ties {} tokens ({} inside the top {}), {} the tie for {} features",
        fence_value,
        fence_band.len(),
        intersection,
        num_features,
        if keep_band { "keeping" } else { "dropping" },
        features.len()
    );

    features
}

impl<T: Display> Display for Sf<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sf{{super={};num_features={};threshold={}}}",
            self.ngram, self.num_features, self.threshold
        )
    }
}
