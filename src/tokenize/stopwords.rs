use std::{collections::HashSet, fmt::Display, path::Path, sync::Arc};

use derive_new::new;

use crate::utils::files::read_file;

use super::{TokenizeError, Tokenizer};

/// Words this short are always treated as stopwords
pub const MAX_IMPLICIT_STOPWORD_LEN: usize = 2;

/// The most frequent English stopwords, from http://www.ranks.nl/resources/stopwords.html
pub static ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's", "me",
    "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll",
    "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where", "where's",
    "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't",
    "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

/// An immutable stopword table. Build it once and share it by reference (or `Arc`) with every
/// component that filters tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build a table from the given words. Each word is also stored without apostrophes, since
    /// the smart splitter drops them (`don't` is tokenized as `dont`).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = HashSet::new();

        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }

            table.insert(word.replace('\'', ""));
            table.insert(word);
        }

        Self { words: table }
    }

    /// The built-in English stopword table
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS)
    }

    /// Load a table with one stopword per line
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizeError> {
        Ok(Self::from_words(read_file(path)?))
    }

    /// Whether the (lowercase) word is a stopword. Words of two characters or fewer always are.
    pub fn is_stopword(&self, word: &str) -> bool {
        let word = word.trim();

        word.chars().count() <= MAX_IMPLICIT_STOPWORD_LEN || self.words.contains(word)
    }

    /// Return the words that are not stopwords, in order
    pub fn remove_stopwords(&self, words: Vec<String>) -> Vec<String> {
        words
            .into_iter()
            .filter(|word| !self.is_stopword(word))
            .map(|word| word.trim().to_string())
            .collect()
    }

    /// The number of words in the table
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Wraps a tokenizer and drops the stopwords from its output
#[derive(Clone, Debug, new)]
pub struct StopWordFilter<T> {
    /// The tokenizer producing the unfiltered tokens
    inner: T,

    /// The stopwords to remove
    stopwords: Arc<StopWords>,
}

impl<T: Tokenizer> Tokenizer for StopWordFilter<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let tokens = self.inner.tokenize(text)?;

        Ok(self.stopwords.remove_stopwords(tokens))
    }
}

impl<T: Display> Display for StopWordFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StopWordFilter{{inner={};stopwords={}}}",
            self.inner,
            self.stopwords.len()
        )
    }
}
