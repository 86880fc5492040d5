use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Read a file from the given path into a list of strings
pub fn read_file(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let f = File::open(path)?;

    BufReader::new(f).lines().collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "first")?;
        writeln!(file, "second")?;

        let lines = read_file(file.path())?;

        assert_eq!(lines, vec!["first", "second"]);

        Ok(())
    }
}
