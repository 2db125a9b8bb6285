//! The address corpus that instructions are derived from.

use std::fs;
use std::path::Path;

use crate::error::CorpusError;

/// An ordered, cyclically reusable list of address strings.
///
/// The corpus owns its read position: [`AddressCorpus::next_wrapping`]
/// restarts at the first address when the list is exhausted instead of
/// terminating generation, while [`AddressCorpus::iter`] gives a single
/// pass for corpus-bounded policies. A corpus is guaranteed non-empty by
/// construction.
#[derive(Debug)]
pub struct AddressCorpus {
    addresses: Vec<String>,
    cursor: usize,
}

impl AddressCorpus {
    /// Loads a corpus from a plain-text file, one address per line.
    ///
    /// Blank lines are skipped. A file with no usable addresses is a fatal
    /// configuration error.
    pub fn from_file(path: &Path) -> Result<Self, CorpusError> {
        let raw = fs::read_to_string(path)?;
        Self::from_addresses(raw.lines().map(str::to_owned))
    }

    /// Builds a corpus from address strings, skipping blank entries.
    pub fn from_addresses(
        addresses: impl IntoIterator<Item = String>,
    ) -> Result<Self, CorpusError> {
        let addresses: Vec<String> = addresses
            .into_iter()
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect();

        if addresses.is_empty() {
            return Err(CorpusError::Empty);
        }

        Ok(Self {
            addresses,
            cursor: 0,
        })
    }

    /// Number of usable addresses; always at least one.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Always false; kept for `len` symmetry.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Returns the next address, wrapping around to the first one when the
    /// list is exhausted.
    pub fn next_wrapping(&mut self) -> &str {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.addresses.len();
        &self.addresses[index]
    }

    /// One single pass over the corpus in file order, independent of the
    /// wrapping cursor.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn wraps_around_on_exhaustion() {
        let mut corpus = AddressCorpus::from_addresses(
            ["10.0.0.1".to_owned(), "10.0.0.2".to_owned()],
        )
        .unwrap();

        assert_eq!(corpus.next_wrapping(), "10.0.0.1");
        assert_eq!(corpus.next_wrapping(), "10.0.0.2");
        assert_eq!(corpus.next_wrapping(), "10.0.0.1");
    }

    #[test]
    fn skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "10.0.0.1\n\n  \n10.0.0.2\n").unwrap();

        let corpus = AddressCorpus::from_file(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.iter().collect::<Vec<_>>(), ["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn empty_corpus_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n \n").unwrap();

        assert!(matches!(
            AddressCorpus::from_file(file.path()),
            Err(CorpusError::Empty)
        ));
    }

    #[test]
    fn single_pass_ignores_the_cursor() {
        let mut corpus = AddressCorpus::from_addresses(
            ["a".to_owned(), "b".to_owned(), "c".to_owned()],
        )
        .unwrap();

        corpus.next_wrapping();
        assert_eq!(corpus.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
