//! Candidate answer sets.
//!
//! A [`Domain`] holds the remaining candidate answers for one clue; [`Domains`] is a
//! snapshot of every clue's domain. Snapshots have value semantics: solver rounds clone
//! the puzzle's backup snapshot and prune their own copy.

use std::collections::{BTreeMap, BTreeSet, btree_map};

use crate::ClueId;

/// Errors returned when inserting a word into a [`Domain`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DomainError {
    /// The word length differs from the domain's answer length.
    #[display("candidate `{word}` has {actual} letters, expected {expected}")]
    WrongLength {
        /// The rejected word.
        word: String,
        /// The domain's answer length.
        expected: usize,
        /// Length of the rejected word.
        actual: usize,
    },
    /// The word contains characters other than ASCII letters.
    #[display("candidate `{word}` contains non-letter characters")]
    NotAlphabetic {
        /// The rejected word.
        word: String,
    },
}

/// The set of candidate answers for a single clue.
///
/// Every word in a domain consists of exactly [`word_length`](Self::word_length)
/// uppercase ASCII letters. Iteration is lexicographic.
///
/// # Examples
///
/// ```
/// use crossfill_core::Domain;
///
/// let mut domain = Domain::new(3);
/// assert!(domain.insert("CAT")?);
/// assert!(!domain.insert("cat")?);
/// assert!(domain.insert("DOGS").is_err());
///
/// let removed = domain.retain(|word| word.starts_with('D'));
/// assert_eq!(removed, 1);
/// assert!(domain.is_empty());
/// # Ok::<(), crossfill_core::DomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    word_length: usize,
    words: BTreeSet<String>,
}

impl Domain {
    /// Creates an empty domain for answers of `word_length` letters.
    #[must_use]
    pub fn new(word_length: usize) -> Self {
        Self {
            word_length,
            words: BTreeSet::new(),
        }
    }

    /// Returns the required answer length.
    #[must_use]
    #[inline]
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Inserts a word, uppercasing it first.
    ///
    /// Returns `true` if the word was not already present.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the word is not made of ASCII letters or has the
    /// wrong length.
    pub fn insert(&mut self, word: &str) -> Result<bool, DomainError> {
        if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(DomainError::NotAlphabetic {
                word: word.to_owned(),
            });
        }
        if word.len() != self.word_length {
            return Err(DomainError::WrongLength {
                word: word.to_owned(),
                expected: self.word_length,
                actual: word.len(),
            });
        }
        Ok(self.words.insert(word.to_ascii_uppercase()))
    }

    /// Returns `true` if the domain contains `word`.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Returns the number of candidates.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if there are no candidates left.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the candidates in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// Keeps only the words for which `keep` returns `true`.
    ///
    /// Returns the number of words removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.words.len();
        self.words.retain(|word| keep(word));
        before - self.words.len()
    }

    /// Removes every candidate.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Returns `true` if every word in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Domain) -> bool {
        self.words.is_subset(&other.words)
    }
}

/// A snapshot of every clue's candidate domain.
///
/// Clues missing from the snapshot behave as if their domain were empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domains {
    domains: BTreeMap<ClueId, Domain>,
}

impl Domains {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the domain of `id`.
    pub fn insert(&mut self, id: ClueId, domain: Domain) -> Option<Domain> {
        self.domains.insert(id, domain)
    }

    /// Returns the domain of `id`.
    #[must_use]
    pub fn get(&self, id: ClueId) -> Option<&Domain> {
        self.domains.get(&id)
    }

    /// Returns the domain of `id` mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: ClueId) -> Option<&mut Domain> {
        self.domains.get_mut(&id)
    }

    /// Returns the number of candidates for `id`, `0` if the clue is unknown.
    #[must_use]
    pub fn len_of(&self, id: ClueId) -> usize {
        self.get(id).map_or(0, Domain::len)
    }

    /// Returns `true` if `id` has no candidates left.
    #[must_use]
    pub fn is_empty_for(&self, id: ClueId) -> bool {
        self.len_of(id) == 0
    }

    /// Empties the domain of `id`, if present.
    pub fn clear(&mut self, id: ClueId) {
        if let Some(domain) = self.domains.get_mut(&id) {
            domain.clear();
        }
    }

    /// Iterates over `(id, domain)` pairs in clue order.
    pub fn iter(&self) -> btree_map::Iter<'_, ClueId, Domain> {
        self.domains.iter()
    }

    /// Returns the identifiers of clues that still have candidates, in clue order.
    #[must_use]
    pub fn nonempty_ids(&self) -> Vec<ClueId> {
        self.domains
            .iter()
            .filter(|(_, domain)| !domain.is_empty())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Returns the total number of candidates across all clues.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.domains.values().map(Domain::len).sum()
    }
}

impl<'a> IntoIterator for &'a Domains {
    type Item = (&'a ClueId, &'a Domain);
    type IntoIter = btree_map::Iter<'a, ClueId, Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.iter()
    }
}
