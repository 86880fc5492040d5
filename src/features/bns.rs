//! Bi-Normal Separation. See http://dl.acm.org/citation.cfm?id=944974 for a description.
//!
//! For each class, every candidate gram gets a true positive rate (the fraction of the class's
//! documents containing it) and a false positive rate (the fraction of all other documents
//! containing it). Both rates are z-scored over the candidates and the gram's score is the
//! absolute difference of the two z-scores. The best scoring grams of each class are kept and
//! the selections of all classes are unioned.

use std::{collections::BTreeMap, fmt::Display};

use log::{debug, trace};
use serde::Serialize;

use crate::{
    documents::{check_lengths, TextDocument},
    tokenize::Tokenizer,
    utils::{
        classes::distinct_labels,
        stats::{mean, std_dev, z_score},
    },
};

use super::{FeatureError, FeatureSetGenerator, FeatureSpace, NGram};

/// A feature with its separation score for one class
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredFeature {
    /// The feature
    pub feature: String,

    /// The absolute separation between the true and false positive rate z-scores
    pub score: f64,
}

/// True and false positive rates of a feature with respect to one class
#[derive(Clone, Copy, Debug, PartialEq)]
struct Rates {
    tpr: f64,
    fpr: f64,
}

/// A feature set generator ranking n-grams by Bi-Normal Separation
#[derive(Clone, Debug)]
pub struct Bns<T> {
    /// Parses the documents and provides the candidate grams
    ngram: NGram<T>,

    /// How many of the best scoring grams to keep for each class
    features_per_class: usize,
}

impl<T: Tokenizer> Bns<T> {
    /// Create a new BNS generator
    pub fn new(
        n: usize,
        min: usize,
        features_per_class: usize,
        tokenizer: T,
    ) -> Result<Self, FeatureError> {
        if features_per_class == 0 {
            return Err(FeatureError::InvalidArgument(
                "at least one feature per class must be selected".to_string(),
            ));
        }

        Ok(Self {
            ngram: NGram::new(n, min, tokenizer)?,
            features_per_class,
        })
    }

    /// How many grams are kept for each class
    pub fn features_per_class(&self) -> usize {
        self.features_per_class
    }

    /// Score every candidate gram against every class. Each class's list is ordered by score,
    /// highest first, with ties ordered by the feature itself.
    pub fn rank(
        &self,
        documents: &[TextDocument],
        labels: &[String],
    ) -> Result<BTreeMap<String, Vec<ScoredFeature>>, FeatureError> {
        check_lengths(documents.len(), labels.len())?;

        let document_features = self.ngram.parse_all_features(documents)?;

        Ok(self.rank_parsed(&document_features, labels))
    }

    fn rank_parsed(
        &self,
        document_features: &[FeatureSpace],
        labels: &[String],
    ) -> BTreeMap<String, Vec<ScoredFeature>> {
        let candidates = self.ngram.select(document_features);

        let mut ranking = BTreeMap::new();

        for class in distinct_labels(labels.iter().map(String::as_str)) {
            let rates: Vec<(&String, Rates)> = candidates
                .iter()
                .map(|feature| (feature, rates(feature, &class, document_features, labels)))
                .collect();

            let scored = score(&rates);

            trace!("Scored {} candidate grams for class {}", scored.len(), class);

            ranking.insert(class, scored);
        }

        ranking
    }
}

impl<T: Tokenizer> FeatureSetGenerator<TextDocument> for Bns<T> {
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

        let document_features = self.ngram.parse_all_features(documents)?;
        let ranking = self.rank_parsed(&document_features, labels);

        let mut features = FeatureSpace::new();
        for (class, scored) in ranking {
            let selected = scored.into_iter().take(self.features_per_class);
            let before = features.len();

            features.extend(selected.map(|scored| scored.feature));

            debug!(
                "Class {} added {} new grams to the BNS vocabulary",
                class,
                features.len() - before
            );
        }

        Ok((features, document_features))
    }

    fn parse_features(&self, document: &TextDocument) -> Result<FeatureSpace, FeatureError> {
        self.ngram.parse_features(document)
    }
}

/// Compute the rates of a feature for one class. A class (or its complement) without any
/// documents has a rate of zero.
fn rates(
    feature: &str,
    class: &str,
    document_features: &[FeatureSpace],
    labels: &[String],
) -> Rates {
    let mut class_count = 0;
    let mut non_class_count = 0;
    let mut tp = 0;
    let mut fp = 0;

    for (features, label) in document_features.iter().zip(labels) {
        let present = features.contains(feature);

        if label == class {
            class_count += 1;
            if present {
                tp += 1;
            }
        } else {
            non_class_count += 1;
            if present {
                fp += 1;
            }
        }
    }

    Rates {
        tpr: ratio(tp, class_count),
        fpr: ratio(fp, non_class_count),
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Score the features by the separation of their rate z-scores, best first
fn score(rates: &[(&String, Rates)]) -> Vec<ScoredFeature> {
    let tprs: Vec<f64> = rates.iter().map(|(_, r)| r.tpr).collect();
    let fprs: Vec<f64> = rates.iter().map(|(_, r)| r.fpr).collect();

    let (Some(t_mean), Some(f_mean)) = (mean(&tprs), mean(&fprs)) else {
        return Vec::new();
    };
    let t_std_dev = std_dev(&tprs, t_mean).unwrap_or(0.0);
    let f_std_dev = std_dev(&fprs, f_mean).unwrap_or(0.0);

    let mut scored: Vec<ScoredFeature> = rates
        .iter()
        .map(|(feature, r)| ScoredFeature {
            feature: (*feature).clone(),
            score: (z_score(r.tpr, t_mean, t_std_dev) - z_score(r.fpr, f_mean, f_std_dev)).abs(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.feature.cmp(&b.feature))
    });

    scored
}

impl<T: Display> Display for Bns<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bns{{super={};features_per_class={}}}",
            self.ngram, self.features_per_class
        )
    }
}
