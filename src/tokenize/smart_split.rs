use std::fmt::Display;

use derive_new::new;

use super::{TokenizeError, Tokenizer};

/// Opens a meta token, such as `<$link$>`
pub static META_OPEN: &str = "<$";

/// Closes a meta token
pub static META_CLOSE: &str = "$>";

/// Emitted for a hashtag when meta words are replaced
pub static META_HASHTAG: &str = "<$#$>";

/// Emitted for a mention when meta words are replaced
pub static META_MENTION: &str = "<$@$>";

/// Emitted for a retweet marker when meta words are replaced
pub static META_RETWEET: &str = "<$RT$>";

/// Splits text along what counts as a word: a lowercased run of ASCII letters.
///
/// Everything between `<$` and `$>` is kept verbatim as a single meta token. Apostrophes inside
/// a word are dropped (`don't` becomes `dont`). With `replace_meta` set, a leading `#` or `@`
/// becomes a hashtag or mention meta token and the word `rt` becomes a retweet meta token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, new)]
pub struct SmartSplit {
    /// Replace hashtags, mentions and retweet markers with meta tokens
    pub replace_meta: bool,
}

impl SmartSplit {
    /// Split a text into words
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();

        let mut words = Vec::new();
        let mut word = String::new();
        let mut in_word = false;
        let mut in_meta = false;

        let mut index = 0;
        while index < chars.len() {
            let current = chars[index];
            let next = chars.get(index + 1).copied();
            let prev = index.checked_sub(1).map(|i| chars[i]);

            if current.is_whitespace() {
                if in_meta {
                    word.push(current);
                    in_word = true;
                } else if in_word {
                    self.push_word(&mut words, &mut word);
                    in_word = false;
                }
            } else if !in_meta
                && !in_word
                && self.replace_meta
                && (current == '@' || current == '#')
                && next.is_some_and(|c| c.is_ascii_lowercase())
                && prev.map_or(true, char::is_whitespace)
            {
                let meta = if current == '#' {
                    META_HASHTAG
                } else {
                    META_MENTION
                };
                words.push(meta.to_string());
            } else if in_word && current == '\'' && next.is_some_and(|c| c.is_ascii_lowercase()) {
                if let Some(next) = next {
                    word.push(next);
                }
                index += 1;
            } else if current == '<' && next == Some('$') {
                if in_word {
                    self.push_word(&mut words, &mut word);
                }

                word.push_str(META_OPEN);
                in_word = true;
                in_meta = true;
                index += 1;
            } else if in_meta && current == '$' && next == Some('>') {
                word.push_str(META_CLOSE);
                self.push_word(&mut words, &mut word);
                in_word = false;
                in_meta = false;
                index += 1;
            } else if in_meta || current.is_ascii_lowercase() {
                word.push(current);
                in_word = true;
            } else if in_word {
                self.push_word(&mut words, &mut word);
                in_word = false;
            }

            index += 1;
        }

        if !word.is_empty() {
            self.push_word(&mut words, &mut word);
        }

        words
    }

    fn push_word(&self, words: &mut Vec<String>, word: &mut String) {
        let word = std::mem::take(word);

        if self.replace_meta && word == "rt" {
            words.push(META_RETWEET.to_string());
        } else {
            words.push(word);
        }
    }
}

impl Tokenizer for SmartSplit {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(self.split(text))
    }
}

impl Display for SmartSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmartSplit{{replace_meta={}}}", self.replace_meta)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_words() {
        let words = SmartSplit::default().split("Hello, World!  It's 2 o'clock");

        assert_eq!(words, vec!["hello", "world", "its", "oclock"]);
    }

    #[test]
    fn test_split_keeps_meta_tokens() {
        let words = SmartSplit::default().split("see <$my link$> now");

        assert_eq!(words, vec!["see", "<$my link$>", "now"]);
    }

    #[test]
    fn test_split_replaces_meta_words() {
        let words = SmartSplit::new(true).split("RT @netflix loves #canada e@mail");

        assert_eq!(
            words,
            vec!["<$RT$>", "<$@$>", "netflix", "loves", "<$#$>", "canada", "e", "mail"]
        );
    }

    #[test]
    fn test_split_without_meta_replacement() {
        let words = SmartSplit::default().split("rt #canada");

        assert_eq!(words, vec!["rt", "canada"]);
    }
}
