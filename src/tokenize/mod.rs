/// Word splitting with meta-token awareness
pub mod smart_split;

/// Stopword tables and the stopword-removing filter
pub mod stopwords;

/// The full filtering pipeline: links, smart split, stopwords
pub mod full_filter;

pub use full_filter::FullFilter;
pub use smart_split::SmartSplit;
pub use stopwords::{StopWordFilter, StopWords};

/// Tokenizer Error
#[derive(thiserror::Error, Debug)]
pub enum TokenizeError {
    /// The tokenizer could not process the given input
    #[error("unable to tokenize input: {0}")]
    Invalid(String),

    /// A resource the tokenizer depends on could not be read
    #[error("unable to load tokenizer resource: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns text into an ordered sequence of normalized tokens
pub trait Tokenizer {
    /// Tokenize a single text
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;

    /// Tokenize many texts, in order
    fn tokenize_all(&self, texts: &[&str]) -> Result<Vec<Vec<String>>, TokenizeError> {
        texts.iter().map(|text| self.tokenize(text)).collect()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for std::sync::Arc<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}
