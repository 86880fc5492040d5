//! # Textfold
//!
//! Feature selection and k-fold cross-validation for text classification experiments.
#![forbid(unsafe_code)]

/// Documents and labelled training examples
pub mod documents;

/// Tokenizers
pub mod tokenize;

/// Feature set generators
pub mod features;

/// Classifier backends
pub mod classifiers;

/// Cross-validation and scoring
pub mod evaluation;

/// Training set loading
pub mod datasets;

/// Experiment configuration
pub mod config;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;
