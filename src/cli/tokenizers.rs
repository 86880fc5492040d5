use std::fmt::Display;

use crate::config::TokenizerKind;

/// The unique string token for word splitting only
pub static SMART_SPLIT: &str = "smart-split";

/// The unique string token for word splitting with stopword removal
pub static STOPWORDS: &str = "stopwords";

/// The unique string token for the full filter
pub static FULL: &str = "full";

impl TryFrom<&str> for TokenizerKind {
    type Error = TokenizerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.to_lowercase();

        if value == SMART_SPLIT {
            Ok(TokenizerKind::SmartSplit)
        } else if value == STOPWORDS {
            Ok(TokenizerKind::StopWords)
        } else if value == FULL {
            Ok(TokenizerKind::Full)
        } else {
            Err(TokenizerError::Unknown(value))
        }
    }
}

impl Display for TokenizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenizerKind::SmartSplit => SMART_SPLIT,
            TokenizerKind::StopWords => STOPWORDS,
            TokenizerKind::Full => FULL,
        };

        write!(f, "{}", name)
    }
}

/// Tokenizer Error
#[derive(thiserror::Error, Debug)]
pub enum TokenizerError {
    /// No tokenizer found for the given string
    #[error("no tokenizer found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_try_from() -> anyhow::Result<()> {
        assert_eq!(TokenizerKind::try_from("full")?, TokenizerKind::Full);
        assert_eq!(
            TokenizerKind::try_from("Smart-Split")?,
            TokenizerKind::SmartSplit
        );
        assert_eq!(
            TokenizerKind::try_from(TokenizerKind::StopWords.to_string().as_str())?,
            TokenizerKind::StopWords
        );

        assert!(TokenizerKind::try_from("whitespace").is_err());

        Ok(())
    }
}
