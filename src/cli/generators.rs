use std::fmt::Display;

use crate::config::GeneratorConfig;

/// The unique string token for plain n-gram selection
pub static NGRAM: &str = "ngram";

/// The unique string token for Bi-Normal Separation
pub static BNS: &str = "bns";

/// The unique string token for Subject Feature selection
pub static SF: &str = "sf";

/// Available Feature Set Generators
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Generator {
    /// Document-frequency n-grams
    NGram,

    /// Bi-Normal Separation
    Bns,

    /// Subject Features
    Sf,
}

impl Generator {
    /// Get the default configuration for the given generator
    pub fn default_config(&self) -> GeneratorConfig {
        match self {
            Generator::NGram => GeneratorConfig::default(),
            Generator::Bns => GeneratorConfig::bns(),
            Generator::Sf => GeneratorConfig::sf(),
        }
    }
}

impl From<&GeneratorConfig> for Generator {
    fn from(config: &GeneratorConfig) -> Self {
        match config {
            GeneratorConfig::NGram { .. } => Generator::NGram,
            GeneratorConfig::Bns { .. } => Generator::Bns,
            GeneratorConfig::Sf { .. } => Generator::Sf,
        }
    }
}

impl TryFrom<&str> for Generator {
    type Error = GeneratorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.to_lowercase();

        if value == NGRAM {
            Ok(Generator::NGram)
        } else if value == BNS {
            Ok(Generator::Bns)
        } else if value == SF {
            Ok(Generator::Sf)
        } else {
            Err(GeneratorError::Unknown(value))
        }
    }
}

impl Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Generator::NGram => NGRAM,
            Generator::Bns => BNS,
            Generator::Sf => SF,
        };

        write!(f, "{}", name)
    }
}

/// Generator Error
#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    /// No generator found for the given string
    #[error("no generator found for {0}")]
    Unknown(String),
}
