use std::{fs, path::Path, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    classifiers::naive_bayes::DEFAULT_SMOOTHING,
    datasets::DEFAULT_SEPARATOR,
    documents::TextDocument,
    evaluation::evaluator::{DEFAULT_FOLDS, DEFAULT_SEED},
    features::{Bns, FeatureError, FeatureSetGenerator, NGram, Sf},
    tokenize::{FullFilter, SmartSplit, StopWordFilter, StopWords, TokenizeError, Tokenizer},
};

/// Configuration Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file extension does not name a supported format
    #[error("unsupported config format for {0}, expected .json, .yaml or .yml")]
    UnsupportedFormat(String),

    /// The file could not be read
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON could not be parsed
    #[error("unable to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML could not be parsed
    #[error("unable to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration for a cross-validation experiment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of folds
    pub folds: usize,

    /// Seed for the fold partitioning
    pub seed: u64,

    /// Separates the class label from the text in training set files
    pub separator: String,

    /// Laplace smoothing for the naive Bayes backend
    pub smoothing: f64,

    /// How documents are tokenized
    pub tokenizer: TokenizerConfig,

    /// How the vocabulary is selected
    pub generator: GeneratorConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            folds: DEFAULT_FOLDS,
            seed: DEFAULT_SEED,
            separator: DEFAULT_SEPARATOR.to_string(),
            smoothing: DEFAULT_SMOOTHING,
            tokenizer: TokenizerConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// The available tokenizers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerKind {
    /// Split into words only
    SmartSplit,

    /// Split into words and remove stopwords
    StopWords,

    /// Replace links, split into words and remove stopwords
    #[default]
    Full,
}

/// Tokenizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Which tokenizer to use
    pub kind: TokenizerKind,

    /// Replace hashtags, mentions and retweet markers with meta tokens
    pub replace_meta: bool,

    /// A file with one stopword per line, replacing the built-in English table
    pub stopwords: Option<PathBuf>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            kind: TokenizerKind::default(),
            replace_meta: true,
            stopwords: None,
        }
    }
}

impl TokenizerConfig {
    /// Build the stopword table once, for every component that needs it
    pub fn stopwords(&self) -> Result<Arc<StopWords>, TokenizeError> {
        let table = match &self.stopwords {
            Some(path) => StopWords::from_file(path)?,
            None => StopWords::english(),
        };

        Ok(Arc::new(table))
    }

    /// Build the configured tokenizer
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>, TokenizeError> {
        let split = SmartSplit::new(self.replace_meta);

        let tokenizer: Arc<dyn Tokenizer> = match self.kind {
            TokenizerKind::SmartSplit => Arc::new(split),
            TokenizerKind::StopWords => Arc::new(StopWordFilter::new(split, self.stopwords()?)),
            TokenizerKind::Full => Arc::new(FullFilter::new(self.stopwords()?, self.replace_meta)),
        };

        Ok(tokenizer)
    }
}

fn default_n() -> usize {
    1
}

fn default_ngram_min() -> usize {
    1
}

fn default_selection_min() -> usize {
    5
}

fn default_feature_count() -> usize {
    100
}

fn default_threshold() -> f64 {
    0.5
}

/// Feature set generator configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GeneratorConfig {
    /// Every n-gram seen in at least `min` documents
    #[serde(rename = "ngram")]
    NGram {
        /// Gram width
        #[serde(default = "default_n")]
        n: usize,

        /// Minimum document frequency
        #[serde(default = "default_ngram_min")]
        min: usize,
    },

    /// The best Bi-Normal Separation scores of each class
    Bns {
        /// Gram width
        #[serde(default = "default_n")]
        n: usize,

        /// Minimum document frequency of the candidates
        #[serde(default = "default_selection_min")]
        min: usize,

        /// Grams kept per class
        #[serde(default = "default_feature_count")]
        features_per_class: usize,
    },

    /// Subject Feature selection
    Sf {
        /// Gram width used when parsing documents
        #[serde(default = "default_n")]
        n: usize,

        /// Minimum document frequency used when parsing documents
        #[serde(default = "default_selection_min")]
        min: usize,

        /// Target vocabulary size
        #[serde(default = "default_feature_count")]
        num_features: usize,

        /// Fence inclusion threshold
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::NGram {
            n: default_n(),
            min: default_ngram_min(),
        }
    }
}

impl GeneratorConfig {
    /// The default configuration for BNS
    pub fn bns() -> Self {
        GeneratorConfig::Bns {
            n: default_n(),
            min: default_selection_min(),
            features_per_class: default_feature_count(),
        }
    }

    /// The default configuration for SF
    pub fn sf() -> Self {
        GeneratorConfig::Sf {
            n: default_n(),
            min: default_selection_min(),
            num_features: default_feature_count(),
            threshold: default_threshold(),
        }
    }

    /// Build the configured generator around the given tokenizer
    pub fn build<T>(
        &self,
        tokenizer: T,
    ) -> Result<Box<dyn FeatureSetGenerator<TextDocument>>, FeatureError>
    where
        T: Tokenizer + 'static,
    {
        let generator: Box<dyn FeatureSetGenerator<TextDocument>> = match *self {
            GeneratorConfig::NGram { n, min } => Box::new(NGram::new(n, min, tokenizer)?),
            GeneratorConfig::Bns {
                n,
                min,
                features_per_class,
            } => Box::new(Bns::new(n, min, features_per_class, tokenizer)?),
            GeneratorConfig::Sf {
                n,
                min,
                num_features,
                threshold,
            } => Box::new(Sf::new(n, min, num_features, threshold, tokenizer)?),
        };

        Ok(generator)
    }
}
