use std::{fmt::Display, sync::Arc};

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use super::{SmartSplit, StopWords, TokenizeError, Tokenizer};

/// The meta token that stands in for any link
pub static META_LINK: &str = "<$link$>";

lazy_static! {
    // Links start with a scheme or `www.`, or are bare hosts under a common top-level domain
    static ref LINK: Regex = Regex::new(
        r"(?i)(?:\S*\.)?www\.\S+|https?://\S+|[^\s./]+\.(?:com|edu|org|net|gov)\b(?:/\S*)?"
    )
    .expect("link pattern is valid");
}

/// Replace every link in the text with the given replacement, taken literally
pub fn replace_links(text: &str, replacement: &str) -> String {
    LINK.replace_all(text, NoExpand(replacement)).into_owned()
}

/// The full filtering pipeline. Links are replaced with a meta token, the text is smart split
/// (optionally replacing hashtags, mentions and retweet markers) and stopwords are removed.
#[derive(Clone, Debug)]
pub struct FullFilter {
    split: SmartSplit,
    stopwords: Arc<StopWords>,
}

impl FullFilter {
    /// Create a new filter using the given stopword table
    pub fn new(stopwords: Arc<StopWords>, replace_meta: bool) -> Self {
        Self {
            split: SmartSplit::new(replace_meta),
            stopwords,
        }
    }

    /// Create a filter with the built-in English stopwords that replaces meta words
    pub fn english() -> Self {
        Self::new(Arc::new(StopWords::english()), true)
    }
}

impl Tokenizer for FullFilter {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let text = replace_links(text, &format!(" {} ", META_LINK));
        let words = self.split.split(&text);

        Ok(self.stopwords.remove_stopwords(words))
    }
}

impl Display for FullFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FullFilter{{replace_meta={}}}",
            self.split.replace_meta
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_replace_links() {
        let text = replace_links("see http://bit.ly/WbcrU and www.example.com!", "LINK");

        assert_eq!(text, "see LINK and LINK");
    }

    #[test]
    fn test_replace_links_keeps_the_replacement_literal() {
        let text = replace_links("see http://x.io now", " <$link$> ");

        assert_eq!(text, "see  <$link$>  now");
    }

    #[test]
    fn test_replace_bare_domains() {
        let text = replace_links("read nasa.gov/news or shop.com, not a.company", "LINK");

        assert_eq!(text, "read LINK or LINK, not a.company");
    }

    #[test]
    fn test_words_after_a_link_survive() {
        let tokens = FullFilter::english()
            .tokenize("visit http://x.io today for cheap tickets")
            .unwrap();

        assert_eq!(tokens, vec!["visit", "<$link$>", "today", "cheap", "tickets"]);
    }

    #[test]
    fn test_full_filter() {
        let filter = FullFilter::english();

        let tokens = filter
            .tokenize("RT @pawlooza: wished @netflix had The Littlest Hobo http://bit.ly/WbcrU")
            .unwrap();

        assert_eq!(
            tokens,
            vec![
                "<$RT$>",
                "<$@$>",
                "pawlooza",
                "wished",
                "<$@$>",
                "netflix",
                "littlest",
                "hobo",
                "<$link$>"
            ]
        );
    }
}
