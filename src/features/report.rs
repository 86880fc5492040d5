use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use serde::Serialize;

use crate::documents::{check_lengths, Document};

use super::{FeatureError, FeatureSetGenerator, FeatureSpace};

/// How the documents containing one feature are spread over the classes
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureDistribution {
    /// The feature
    pub feature: String,

    /// The number of documents containing the feature
    pub documents: usize,

    /// The number of documents in the corpus
    pub corpus_size: usize,

    /// For each class, the fraction of the documents containing the feature that have the class
    pub class_ratios: BTreeMap<String, f64>,
}

impl FeatureDistribution {
    /// The largest class fraction
    pub fn max_ratio(&self) -> f64 {
        self.class_ratios
            .values()
            .copied()
            .fold(0.0, f64::max)
    }
}

impl Display for FeatureDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = format!(
            "{} ({} / {})",
            self.feature, self.documents, self.corpus_size
        );

        let ratios = self
            .class_ratios
            .iter()
            .map(|(class, ratio)| format!("{}: {:.6}", class, ratio))
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{:<30} -- {}", header, ratios)
    }
}

/// Report the class distribution of every feature in `feature_space` that occurs in the corpus.
///
/// The most class-specific features come first; features with the same largest fraction are
/// ordered by the feature, descending.
pub fn feature_distribution<D, G>(
    documents: &[D],
    labels: &[String],
    feature_space: &FeatureSpace,
    generator: &G,
) -> Result<Vec<FeatureDistribution>, FeatureError>
where
    D: Document,
    G: FeatureSetGenerator<D> + ?Sized,
{
    check_lengths(documents.len(), labels.len())?;

    let mut counts: HashMap<&str, BTreeMap<&str, usize>> = HashMap::new();
    let mut totals: HashMap<&str, usize> = HashMap::new();

    let document_features = generator.parse_all_features(documents)?;

    for (features, label) in document_features.iter().zip(labels) {
        for feature in features {
            let Some(feature) = feature_space.get(feature) else {
                continue;
            };

            *totals.entry(feature.as_str()).or_insert(0) += 1;
            *counts
                .entry(feature.as_str())
                .or_default()
                .entry(label.as_str())
                .or_insert(0) += 1;
        }
    }

    let mut report: Vec<FeatureDistribution> = counts
        .into_iter()
        .map(|(feature, classes)| {
            let total = totals[feature];

            FeatureDistribution {
                feature: feature.to_string(),
                documents: total,
                corpus_size: documents.len(),
                class_ratios: classes
                    .into_iter()
                    .map(|(class, count)| (class.to_string(), count as f64 / total as f64))
                    .collect(),
            }
        })
        .collect();

    report.sort_by(|a, b| {
        b.max_ratio()
            .total_cmp(&a.max_ratio())
            .then_with(|| b.feature.cmp(&a.feature))
    });

    Ok(report)
}
