/// Random fold partitioning
pub mod partition;

/// Confusion matrices and per-class metrics
pub mod confusion;

/// The k-fold cross-validation engine
pub mod evaluator;

pub use confusion::{ConfusionMatrix, ConfusionMatrixError};
pub use evaluator::{cross_validate, EvaluationError, Evaluator, Results, Stage};
pub use partition::partition;
