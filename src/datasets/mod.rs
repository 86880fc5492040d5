use std::{fs::File, io::Read, path::Path};

use log::info;

use crate::{
    documents::{TextDocument, TrainingExample},
    utils::classes::distinct_labels,
};

/// The separator used by the tweet training sets
pub static DEFAULT_SEPARATOR: &str = "`";

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The separator must be a single byte
    #[error("the separator must be a single byte, got {0:?}")]
    InvalidSeparator(String),

    /// A line has no separator between the label and the text
    #[error("line {line} has no separator between the class label and the text")]
    Malformed {
        /// The 1-based line number
        line: u64,
    },

    /// The file could not be read
    #[error("unable to read the training set: {0}")]
    Io(#[from] std::io::Error),

    /// The records could not be parsed
    #[error("unable to parse the training set: {0}")]
    Csv(#[from] csv::Error),
}

/// Load a training set from a file with one example per line, in the form
/// `<label><separator><text>`
pub fn load_training_set(
    path: impl AsRef<Path>,
    separator: &str,
) -> Result<Vec<TrainingExample<TextDocument>>, DatasetError> {
    let path = path.as_ref();
    let examples = parse_training_set(File::open(path)?, separator)?;

    info!(
        "Loaded {} examples from {}",
        examples.len(),
        path.display()
    );

    Ok(examples)
}

/// Parse a training set with one example per line, in the form `<label><separator><text>`.
///
/// The text is everything after the first separator. Blank lines are skipped.
pub fn parse_training_set<R: Read>(
    reader: R,
    separator: &str,
) -> Result<Vec<TrainingExample<TextDocument>>, DatasetError> {
    let &[delimiter] = separator.as_bytes() else {
        return Err(DatasetError::InvalidSeparator(separator.to_string()));
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut examples = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        if record.len() < 2 {
            return Err(DatasetError::Malformed { line });
        }

        let label = record[0].trim();
        let text = record.iter().skip(1).collect::<Vec<_>>().join(separator);

        examples.push(TrainingExample::new(TextDocument::new(text), label));
    }

    Ok(examples)
}

/// The distinct class labels of the examples, sorted
pub fn class_labels(examples: &[TrainingExample<TextDocument>]) -> Vec<String> {
    distinct_labels(examples.iter().map(|example| example.label.as_str()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_training_set() {
        let data = "pos`what a great movie\n\nneg`awful, just `awful`\n";

        let examples = parse_training_set(data.as_bytes(), "`").unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].label, "pos");
        assert_eq!(examples[0].document.content(), "what a great movie");
        assert_eq!(examples[1].document.content(), "awful, just `awful`");
        assert_eq!(class_labels(&examples), vec!["neg", "pos"]);
    }

    #[test]
    fn test_parse_keeps_quotes() {
        let data = "pos\t\"quoted\" text\n";

        let examples = parse_training_set(data.as_bytes(), "\t").unwrap();

        assert_eq!(examples[0].document.content(), "\"quoted\" text");
    }

    #[test]
    fn test_malformed_line() {
        let data = "pos`fine\nno separator here\n";

        let result = parse_training_set(data.as_bytes(), "`");

        assert!(matches!(result, Err(DatasetError::Malformed { line: 2 })));
    }

    #[test]
    fn test_invalid_separator() {
        let result = parse_training_set("a::b".as_bytes(), "::");

        assert!(matches!(result, Err(DatasetError::InvalidSeparator(_))));
    }

    #[test]
    fn test_load_training_set() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "neg`boring")?;
        writeln!(file, "pos`fun")?;

        let examples = load_training_set(file.path(), DEFAULT_SEPARATOR)?;

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].label, "pos");

        Ok(())
    }
}
