//! Word membership oracle.

use std::{
    collections::{BTreeSet, HashSet},
    io::{self, BufRead},
};

use crate::candidates::normalize;

/// Answers whether a string is a valid word.
///
/// Queries are uppercase ASCII strings. Implementations decide how strict they are
/// about anything else.
pub trait Dictionary {
    /// Returns `true` if `word` is a known word.
    fn contains(&self, word: &str) -> bool;
}

impl<D> Dictionary for &D
where
    D: Dictionary + ?Sized,
{
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl Dictionary for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

impl Dictionary for BTreeSet<String> {
    fn contains(&self, word: &str) -> bool {
        BTreeSet::contains(self, word)
    }
}

/// An in-memory, case-insensitive word list.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Dictionary, WordList};
///
/// let words = WordList::from_words(["cat", "Dog", "ice-cream"]);
/// assert!(words.contains("CAT"));
/// assert!(words.contains("DOG"));
/// assert!(words.contains("ICECREAM"));
/// assert!(!words.contains("COW"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Creates an empty word list, which rejects every word.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a word list from arbitrary strings, normalizing each one.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Reads a newline-separated word list.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `reader`.
    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead,
    {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            lines.push(line.to_owned());
        }
        Ok(Self::from_words(lines))
    }

    /// Returns the number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Adds a word, normalizing it first.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = normalize(word);
        !word.is_empty() && self.words.insert(word)
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl<S> FromIterator<S> for WordList
where
    S: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_words(iter)
    }
}
