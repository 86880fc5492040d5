use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use log::{debug, info};
use serde::{Serialize, Serializer};

use crate::{
    classifiers::Classifier,
    documents::{Document, TrainingExample},
};

use super::{partition, ConfusionMatrix, ConfusionMatrixError};

/// The default number of folds
pub const DEFAULT_FOLDS: usize = 10;

/// The default partitioning seed
pub const DEFAULT_SEED: u64 = 4;

/// Evaluation Error
#[derive(thiserror::Error, Debug)]
pub enum EvaluationError<E: std::error::Error + 'static> {
    /// The classifier backend failed to train or classify
    #[error(transparent)]
    Backend(E),

    /// The classifier returned a different number of results than it was given documents
    #[error("the classifier returned {actual} results for {expected} documents")]
    PredictionCount {
        /// The number of documents classified
        expected: usize,

        /// The number of results returned
        actual: usize,
    },

    /// The classifier predicted a label the corpus does not contain
    #[error("the classifier predicted unknown class label {0}")]
    UnknownLabel(String),
}

impl<E: std::error::Error + 'static> From<ConfusionMatrixError> for EvaluationError<E> {
    fn from(err: ConfusionMatrixError) -> Self {
        match err {
            ConfusionMatrixError::UnknownLabel(label) => EvaluationError::UnknownLabel(label),
        }
    }
}

/// Where an evaluation run is. Runs only move forward; a failure ends the run as `Aborted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has happened yet
    NotStarted,

    /// The corpus is being split into folds
    Partitioning,

    /// The classifier is training on every fold but the given one
    Training(usize),

    /// The classifier is classifying the given fold
    Classifying(usize),

    /// The predictions for the given fold are being recorded
    Accumulating(usize),

    /// Every fold has been evaluated
    Complete,

    /// The run failed
    Aborted,
}

/// The results of an evaluation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Results {
    /// The confusion matrix accumulated over every fold
    confusion_matrix: ConfusionMatrix,

    /// How long the evaluation took
    #[serde(rename = "elapsed_millis", serialize_with = "serialize_millis")]
    elapsed: Duration,
}

impl Results {
    /// Bundle a confusion matrix with the evaluation time
    pub fn new(confusion_matrix: ConfusionMatrix, elapsed: Duration) -> Self {
        Self {
            confusion_matrix,
            elapsed,
        }
    }

    /// The confusion matrix accumulated over every fold
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.confusion_matrix
    }

    /// How long the evaluation took
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// How long the evaluation took, in milliseconds
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl Display for Results {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.confusion_matrix.summary())?;
        writeln!(f, "Runtime: {}ms", self.elapsed_millis())
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(elapsed.as_millis())
}

/// Runs k-fold cross-validation of a classifier over a labeled corpus
#[derive(Clone, Debug)]
pub struct Evaluator {
    folds: usize,
    seed: u64,
    stage: Stage,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDS, DEFAULT_SEED)
    }
}

impl Evaluator {
    /// Create an evaluator splitting the corpus into `folds` folds with the given seed
    pub fn new(folds: usize, seed: u64) -> Self {
        Self {
            folds,
            seed,
            stage: Stage::NotStarted,
        }
    }

    /// The number of folds
    pub fn folds(&self) -> usize {
        self.folds
    }

    /// The partitioning seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The stage the last (or current) run reached
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Cross-validate the classifier over the examples.
    ///
    /// The examples are split into folds; then, for each fold, the classifier is retrained on
    /// every other fold and classifies this one, and its predictions are recorded against the
    /// real labels. Every example is classified exactly once. Any classifier failure aborts the
    /// whole run and is returned as is; no partial results are kept.
    ///
    /// With fewer than one fold nothing is trained and the matrix is empty.
    pub fn cross_validate<D, C>(
        &mut self,
        classifier: &mut C,
        examples: &[TrainingExample<D>],
    ) -> Result<Results, EvaluationError<C::Error>>
    where
        D: Document,
        C: Classifier<D> + ?Sized,
    {
        let result = self.run(classifier, examples);

        if result.is_err() {
            self.stage = Stage::Aborted;
        }

        result
    }

    fn run<D, C>(
        &mut self,
        classifier: &mut C,
        examples: &[TrainingExample<D>],
    ) -> Result<Results, EvaluationError<C::Error>>
    where
        D: Document,
        C: Classifier<D> + ?Sized,
    {
        let start = Instant::now();
        self.stage = Stage::NotStarted;

        let mut confusion_matrix =
            ConfusionMatrix::new(examples.iter().map(|example| example.label.as_str()));

        if self.folds < 1 {
            self.stage = Stage::Complete;

            return Ok(Results::new(confusion_matrix, start.elapsed()));
        }

        self.stage = Stage::Partitioning;
        let folds = partition(examples, self.folds, self.seed);

        for fold in 0..self.folds {
            self.stage = Stage::Training(fold);

            let training: Vec<TrainingExample<D>> = folds
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != fold)
                .flat_map(|(_, examples)| examples.iter().cloned())
                .collect();

            debug!(
                "Fold {}/{}: training on {} examples",
                fold + 1,
                self.folds,
                training.len()
            );

            classifier
                .train(&training)
                .map_err(EvaluationError::Backend)?;

            self.stage = Stage::Classifying(fold);

            let documents: Vec<D> = folds[fold]
                .iter()
                .map(|example| example.document.clone())
                .collect();

            let predictions = classifier
                .classify(&documents)
                .map_err(EvaluationError::Backend)?;

            if predictions.len() != documents.len() {
                return Err(EvaluationError::PredictionCount {
                    expected: documents.len(),
                    actual: predictions.len(),
                });
            }

            self.stage = Stage::Accumulating(fold);

            for (prediction, example) in predictions.iter().zip(&folds[fold]) {
                confusion_matrix.add(&prediction.label, &example.label)?;
            }

            debug!(
                "Fold {}/{}: classified {} examples",
                fold + 1,
                self.folds,
                documents.len()
            );
        }

        self.stage = Stage::Complete;

        let results = Results::new(confusion_matrix, start.elapsed());

        info!(
            "Cross-validated {} examples over {} folds in {}ms",
            examples.len(),
            self.folds,
            results.elapsed_millis()
        );

        Ok(results)
    }
}

/// Cross-validate the classifier over the examples with a fresh `Evaluator`
pub fn cross_validate<D, C>(
    classifier: &mut C,
    examples: &[TrainingExample<D>],
    folds: usize,
    seed: u64,
) -> Result<Results, EvaluationError<C::Error>>
where
    D: Document,
    C: Classifier<D> + ?Sized,
{
    Evaluator::new(folds, seed).cross_validate(classifier, examples)
}
