use std::{collections::BTreeMap, fmt::Display};

use log::debug;

use crate::{
    documents::{unzip_examples, Document, TrainingExample},
    features::{FeatureError, FeatureSetGenerator, FeatureSpace},
};

use super::{ClassificationResult, Classifier};

/// The default Laplace smoothing
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Naive Bayes Error
#[derive(thiserror::Error, Debug)]
pub enum NaiveBayesError {
    /// Classification was requested before any training
    #[error("the classifier has not been trained")]
    NotTrained,

    /// Training was requested without any examples
    #[error("cannot train on an empty training set")]
    EmptyTrainingSet,

    /// The smoothing constant must be positive
    #[error("smoothing must be a positive number, got {0}")]
    InvalidSmoothing(f64),

    /// The feature set generator failed
    #[error(transparent)]
    Features(#[from] FeatureError),
}

/// What was learned about one class
#[derive(Clone, Debug)]
struct ClassModel {
    /// Log of the fraction of training documents with this class
    log_prior: f64,

    /// For each feature, log P(present | class) minus log P(absent | class)
    log_odds: BTreeMap<String, f64>,

    /// The sum of log P(absent | class) over the whole vocabulary
    log_absent: f64,
}

/// A Bernoulli naive Bayes classifier over the features of a `FeatureSetGenerator`.
///
/// Each call to `train` rebuilds the feature space from scratch with the generator, so the
/// vocabulary always comes from the current training set only.
#[derive(Clone, Debug)]
pub struct NaiveBayes<G> {
    generator: G,
    smoothing: f64,
    vocabulary: FeatureSpace,
    classes: Option<BTreeMap<String, ClassModel>>,
}

impl<G> NaiveBayes<G> {
    /// Create an untrained classifier with the given Laplace smoothing
    pub fn new(generator: G, smoothing: f64) -> Result<Self, NaiveBayesError> {
        if !smoothing.is_finite() || smoothing <= 0.0 {
            return Err(NaiveBayesError::InvalidSmoothing(smoothing));
        }

        Ok(Self {
            generator,
            smoothing,
            vocabulary: FeatureSpace::new(),
            classes: None,
        })
    }

    /// The feature space learned by the last training
    pub fn vocabulary(&self) -> &FeatureSpace {
        &self.vocabulary
    }

    /// The generator used to build the vocabulary and parse documents
    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<D, G> Classifier<D> for NaiveBayes<G>
where
    D: Document,
    G: FeatureSetGenerator<D>,
{
    type Error = NaiveBayesError;

    fn train(&mut self, examples: &[TrainingExample<D>]) -> Result<(), Self::Error> {
        if examples.is_empty() {
            return Err(NaiveBayesError::EmptyTrainingSet);
        }

        let (documents, labels) = unzip_examples(examples);

        let (vocabulary, document_features) = self
            .generator
            .feature_space_with_features(&documents, &labels)?;

        // class => (document count, feature => documents containing it)
        let mut counts: BTreeMap<&str, (usize, BTreeMap<&str, usize>)> = BTreeMap::new();

        for (features, label) in document_features.iter().zip(&labels) {
            let (count, present) = counts.entry(label.as_str()).or_default();
            *count += 1;

            for feature in features.iter().filter(|f| vocabulary.contains(*f)) {
                *present.entry(feature.as_str()).or_insert(0) += 1;
            }
        }

        let total = examples.len() as f64;
        let mut classes = BTreeMap::new();

        for (label, (count, present)) in counts {
            let denominator = count as f64 + 2.0 * self.smoothing;

            let mut log_odds = BTreeMap::new();
            let mut log_absent = 0.0;

            for feature in &vocabulary {
                let seen = present.get(feature.as_str()).copied().unwrap_or(0) as f64;
                let p = (seen + self.smoothing) / denominator;

                log_absent += (1.0 - p).ln();
                log_odds.insert(feature.clone(), p.ln() - (1.0 - p).ln());
            }

            classes.insert(
                label.to_string(),
                ClassModel {
                    log_prior: (count as f64 / total).ln(),
                    log_odds,
                    log_absent,
                },
            );
        }

        debug!(
            "Trained naive Bayes on {} examples, {} classes and {} features",
            examples.len(),
            classes.len(),
            vocabulary.len()
        );

        self.vocabulary = vocabulary;
        self.classes = Some(classes);

        Ok(())
    }

    fn classify_document(&self, document: &D) -> Result<ClassificationResult, Self::Error> {
        let classes = self.classes.as_ref().ok_or(NaiveBayesError::NotTrained)?;

        let features = self.generator.parse_features(document)?;

        let scores: Vec<(&String, f64)> = classes
            .iter()
            .map(|(label, model)| {
                let evidence: f64 = features
                    .iter()
                    .filter_map(|feature| model.log_odds.get(feature))
                    .sum();

                (label, model.log_prior + model.log_absent + evidence)
            })
            .collect();

        let mut best: Option<(&String, f64)> = None;
        for &(label, score) in &scores {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((label, score));
            }
        }

        let (label, best_score) = best.ok_or(NaiveBayesError::NotTrained)?;

        // Normalise the posterior relative to the best score to stay numerically stable
        let normaliser: f64 = scores
            .iter()
            .map(|(_, score)| (score - best_score).exp())
            .sum();

        Ok(ClassificationResult::with_confidence(
            label.clone(),
            1.0 / normaliser,
        ))
    }
}

impl<G: Display> Display for NaiveBayes<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NaiveBayes{{smoothing={};generator={}}}",
            self.smoothing, self.generator
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use std::cell::Cell;

    use crate::{
        documents::TextDocument,
        features::{Bns, NGram, Sf},
        tokenize::{SmartSplit, TokenizeError, Tokenizer},
    };

    use super::*;

    fn examples() -> Vec<TrainingExample<TextDocument>> {
        [
            ("great fun movie", "pos"),
            ("great acting", "pos"),
            ("fun and great", "pos"),
            ("awful boring movie", "neg"),
            ("boring plot", "neg"),
            ("awful acting", "neg"),
        ]
        .iter()
        .map(|(text, label)| TrainingExample::new(TextDocument::new(*text), *label))
        .collect()
    }

    /// Counts the texts it is asked to tokenize
    #[derive(Default)]
    struct CountingSplit {
        calls: Cell<usize>,
        inner: SmartSplit,
    }

    impl Tokenizer for CountingSplit {
        fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.tokenize(text)
        }
    }

    fn classifier() -> NaiveBayes<NGram<SmartSplit>> {
        NaiveBayes::new(NGram::new(1, 1, SmartSplit::default()).unwrap(), 1.0).unwrap()
    }

    #[test]
    fn test_classify_after_training() {
        let mut classifier = classifier();
        classifier.train(&examples()).unwrap();

        let results = classifier
            .classify(&[
                TextDocument::new("great fun"),
                TextDocument::new("boring and awful"),
            ])
            .unwrap();

        assert_eq!(results[0].label, "pos");
        assert_eq!(results[1].label, "neg");

        for result in results {
            let confidence = result.confidence.unwrap();
            assert!(confidence > 0.5 && confidence <= 1.0);
        }
    }

    #[test]
    fn test_classify_to_labels() {
        let mut classifier = classifier();
        classifier.train(&examples()).unwrap();

        let labels = classifier
            .classify_to_labels(&[TextDocument::new("great acting")])
            .unwrap();

        assert_eq!(labels, vec!["pos"]);
    }

    #[test]
    fn test_retraining_replaces_the_vocabulary() {
        let mut classifier = classifier();
        classifier.train(&examples()).unwrap();
        assert!(classifier.vocabulary().contains("great"));

        classifier
            .train(&[TrainingExample::new(TextDocument::new("other words"), "x")])
            .unwrap();

        assert!(!classifier.vocabulary().contains("great"));
        assert_eq!(classifier.vocabulary().len(), 2);
    }

    #[test]
    fn test_classify_before_training() {
        let classifier = classifier();

        let result = classifier.classify_document(&TextDocument::new("anything"));

        assert!(matches!(result, Err(NaiveBayesError::NotTrained)));
    }

    #[test]
    fn test_empty_training_set() {
        let mut classifier = classifier();

        let result = Classifier::<TextDocument>::train(&mut classifier, &[]);

        assert!(matches!(result, Err(NaiveBayesError::EmptyTrainingSet)));
    }

    #[test]
    fn test_invalid_smoothing() {
        let result = NaiveBayes::new(NGram::new(1, 1, SmartSplit::default()).unwrap(), 0.0);

        assert!(matches!(result, Err(NaiveBayesError::InvalidSmoothing(_))));
    }

    #[test]
    fn test_training_tokenizes_each_document_once() {
        let examples = examples();

        let split = CountingSplit::default();
        let mut classifier = NaiveBayes::new(NGram::new(1, 1, &split).unwrap(), 1.0).unwrap();
        classifier.train(&examples).unwrap();
        assert_eq!(split.calls.get(), examples.len());

        let split = CountingSplit::default();
        let mut classifier = NaiveBayes::new(Bns::new(1, 1, 2, &split).unwrap(), 1.0).unwrap();
        classifier.train(&examples).unwrap();
        assert_eq!(split.calls.get(), examples.len());

        let split = CountingSplit::default();
        let mut classifier = NaiveBayes::new(Sf::new(1, 1, 3, 0.5, &split).unwrap(), 1.0).unwrap();
        classifier.train(&examples).unwrap();
        assert_eq!(split.calls.get(), examples.len());

        let results = classifier.classify(&[TextDocument::new("great fun")]).unwrap();
        assert_eq!(results[0].label, "pos");
    }
}
