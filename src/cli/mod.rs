/// CLI Indexes: Feature set generators
pub mod generators;

/// CLI Indexes: Tokenizers
pub mod tokenizers;

pub use generators::{Generator, GeneratorError};
pub use tokenizers::TokenizerError;
