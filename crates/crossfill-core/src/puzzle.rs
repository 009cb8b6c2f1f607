//! A validated puzzle: layout, clues and their candidate domains.

use std::collections::BTreeMap;

use crate::{
    Clue, ClueError, ClueId, Domain, DomainError, Domains, Layout, Position, candidates,
};

/// Errors returned when assembling a [`Puzzle`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleError {
    /// The clue geometry itself is invalid.
    #[display("invalid clue: {_0}")]
    Clue(ClueError),
    /// A clue with the same identifier was already added.
    #[display("duplicate clue {id}")]
    #[from(skip)]
    DuplicateClue {
        /// The repeated identifier.
        id: ClueId,
    },
    /// The identifier does not belong to any clue of the puzzle.
    #[display("unknown clue {id}")]
    #[from(skip)]
    UnknownClue {
        /// The unknown identifier.
        id: ClueId,
    },
    /// A letter of the clue falls outside the grid.
    #[display("clue {id} leaves the grid at {pos}")]
    #[from(skip)]
    OutOfBounds {
        /// The offending clue.
        id: ClueId,
        /// First letter position outside the grid.
        pos: Position,
    },
    /// A letter of the clue falls on a black cell.
    #[display("clue {id} crosses the black cell at {pos}")]
    #[from(skip)]
    BlackCell {
        /// The offending clue.
        id: ClueId,
        /// First black letter position.
        pos: Position,
    },
    /// Inserting a candidate failed.
    #[display("invalid candidate for clue {id}: {source}")]
    #[from(skip)]
    Candidate {
        /// The clue the candidate was meant for.
        id: ClueId,
        /// The underlying domain error.
        source: DomainError,
    },
}

/// The input of the solver: grid layout, clue geometry and candidate answers.
///
/// The candidate domains held here are the *backup* snapshot: solvers clone them for
/// every attempt and never modify the puzzle.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Clue, ClueId, Layout, Position, Puzzle};
///
/// let layout: Layout = "
///     ...
///     ...
///     ...
/// "
/// .parse()?;
/// let mut puzzle = Puzzle::new(layout);
/// puzzle.add_clue(Clue::new(ClueId::across(1), "Pet", Position::new(1, 0), 3)?)?;
/// let rejected = puzzle.set_candidates(ClueId::across(1), ["cat", "dogs", "Rat!"])?;
///
/// assert_eq!(rejected, ["DOGS"]);
/// assert_eq!(puzzle.domain(ClueId::across(1)).unwrap().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    layout: Layout,
    clues: BTreeMap<ClueId, Clue>,
    domains: Domains,
}

impl Puzzle {
    /// Creates a puzzle without clues.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            clues: BTreeMap::new(),
            domains: Domains::new(),
        }
    }

    /// Creates a puzzle with one untitled clue per slot derived from the layout.
    ///
    /// See [`Layout::slots`] for the numbering scheme.
    #[must_use]
    pub fn from_layout_slots(layout: Layout) -> Self {
        let mut puzzle = Self::new(layout);
        for slot in puzzle.layout.slots() {
            match Clue::new(slot.id, "", slot.start, slot.length) {
                Ok(clue) => puzzle.insert_clue(clue),
                Err(err) => log::error!("skipping derived slot: {err}"),
            }
        }
        puzzle
    }

    /// Adds a clue with an empty candidate domain.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if the identifier is already used or a letter of the
    /// clue lies outside the grid or on a black cell.
    pub fn add_clue(&mut self, clue: Clue) -> Result<(), PuzzleError> {
        let id = clue.id();
        if self.clues.contains_key(&id) {
            return Err(PuzzleError::DuplicateClue { id });
        }
        for &pos in clue.letter_positions() {
            if !self.layout.contains(pos) {
                return Err(PuzzleError::OutOfBounds { id, pos });
            }
            if self.layout.is_black(pos) {
                return Err(PuzzleError::BlackCell { id, pos });
            }
        }
        self.insert_clue(clue);
        Ok(())
    }

    fn insert_clue(&mut self, clue: Clue) {
        self.domains.insert(clue.id(), Domain::new(clue.length()));
        self.clues.insert(clue.id(), clue);
    }

    /// Replaces the text of a clue.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::UnknownClue`] if the clue does not exist.
    pub fn set_text(&mut self, id: ClueId, text: impl Into<String>) -> Result<(), PuzzleError> {
        let clue = self
            .clues
            .get(&id)
            .ok_or(PuzzleError::UnknownClue { id })?;
        let clue = Clue::new(id, text, clue.start(), clue.length())?;
        self.clues.insert(id, clue);
        Ok(())
    }

    /// Replaces the candidate domain of a clue.
    ///
    /// Candidates are normalized with [`candidates::normalize`]. Words that do not have
    /// the clue's length are skipped and returned (normalized) to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::UnknownClue`] if the clue does not exist.
    pub fn set_candidates<I, S>(&mut self, id: ClueId, words: I) -> Result<Vec<String>, PuzzleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let clue = self
            .clues
            .get(&id)
            .ok_or(PuzzleError::UnknownClue { id })?;
        let mut domain = Domain::new(clue.length());
        let mut rejected = Vec::new();
        for word in words {
            let word = candidates::normalize(word.as_ref());
            match domain.insert(&word) {
                Ok(_) => {}
                Err(DomainError::WrongLength { .. }) => {
                    log::warn!("clue {id}: dropping candidate {word} of wrong length");
                    rejected.push(word);
                }
                Err(source) => return Err(PuzzleError::Candidate { id, source }),
            }
        }
        self.domains.insert(id, domain);
        Ok(rejected)
    }

    /// Returns the layout.
    #[must_use]
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the clue with identifier `id`.
    #[must_use]
    pub fn clue(&self, id: ClueId) -> Option<&Clue> {
        self.clues.get(&id)
    }

    /// Iterates over the clues in identifier order.
    pub fn clues(&self) -> impl Iterator<Item = &Clue> + '_ {
        self.clues.values()
    }

    /// Returns the number of clues.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// Returns the candidate domain of a clue.
    #[must_use]
    pub fn domain(&self, id: ClueId) -> Option<&Domain> {
        self.domains.get(id)
    }

    /// Returns the candidate domains of all clues.
    #[must_use]
    #[inline]
    pub fn domains(&self) -> &Domains {
        &self.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        "
        #..
        ...
        ..#
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn test_from_layout_slots() {
        let puzzle = Puzzle::from_layout_slots(layout());
        let ids = puzzle.clues().map(Clue::id).collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                ClueId::across(1),
                ClueId::across(2),
                ClueId::across(3),
                ClueId::down(1),
                ClueId::down(2),
                ClueId::down(3),
            ]
        );
        assert!(puzzle.domains().nonempty_ids().is_empty());
    }

    #[test]
    fn test_add_clue_validates_geometry() {
        let mut puzzle = Puzzle::new(layout());
        let black = Clue::new(ClueId::across(1), "", Position::new(0, 0), 3).unwrap();
        assert_eq!(
            puzzle.add_clue(black),
            Err(PuzzleError::BlackCell {
                id: ClueId::across(1),
                pos: Position::new(0, 0),
            })
        );
        let long = Clue::new(ClueId::down(1), "", Position::new(1, 1), 3).unwrap();
        assert_eq!(
            puzzle.add_clue(long),
            Err(PuzzleError::OutOfBounds {
                id: ClueId::down(1),
                pos: Position::new(3, 1),
            })
        );
        let ok = Clue::new(ClueId::across(2), "", Position::new(1, 0), 3).unwrap();
        puzzle.add_clue(ok.clone()).unwrap();
        assert_eq!(
            puzzle.add_clue(ok),
            Err(PuzzleError::DuplicateClue {
                id: ClueId::across(2)
            })
        );
    }

    #[test]
    fn test_clue_errors_convert() {
        fn add(puzzle: &mut Puzzle, id: ClueId, length: usize) -> Result<(), PuzzleError> {
            puzzle.add_clue(Clue::new(id, "", Position::new(1, 0), length)?)
        }

        let mut puzzle = Puzzle::new(layout());
        let err = add(&mut puzzle, ClueId::across(2), 0).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Clue(ClueError::ZeroLength {
                id: ClueId::across(2)
            })
        );
        add(&mut puzzle, ClueId::across(2), 3).unwrap();
    }

    #[test]
    fn test_set_candidates_normalizes_and_filters() {
        let mut puzzle = Puzzle::from_layout_slots(layout());
        let rejected = puzzle
            .set_candidates(ClueId::across(2), ["c.a.t", "Dogs", "eel"])
            .unwrap();
        assert_eq!(rejected, vec!["DOGS".to_owned()]);
        let domain = puzzle.domain(ClueId::across(2)).unwrap();
        assert_eq!(domain.iter().collect::<Vec<_>>(), vec!["CAT", "EEL"]);
    }

    #[test]
    fn test_unknown_clue() {
        let mut puzzle = Puzzle::from_layout_slots(layout());
        assert_eq!(
            puzzle.set_candidates(ClueId::down(9), ["abc"]),
            Err(PuzzleError::UnknownClue { id: ClueId::down(9) })
        );
        assert!(puzzle.set_text(ClueId::down(9), "x").is_err());
        puzzle.set_text(ClueId::down(1), "Ocean").unwrap();
        assert_eq!(puzzle.clue(ClueId::down(1)).unwrap().text(), "Ocean");
    }
}
