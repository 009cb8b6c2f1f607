//! Letter-equality constraints between crossing clues.

use std::collections::BTreeMap;

use crossfill_core::{Clue, ClueId, Puzzle};

/// A directed constraint: the letter of `owner` at `owner_index` must equal the letter
/// of `other` at `other_index`.
///
/// Every crossing produces two constraints, one owned by each clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    /// The clue whose domain this constraint revises.
    pub owner: ClueId,
    /// The clue that supports the owner's letters.
    pub other: ClueId,
    /// Index of the shared cell in the owner's word.
    pub owner_index: usize,
    /// Index of the shared cell in the other word.
    pub other_index: usize,
}

impl Constraint {
    /// Returns `true` if the two words agree on the shared cell.
    ///
    /// Words too short to reach the shared cell never agree.
    #[must_use]
    pub fn is_satisfied_by(&self, owner_word: &str, other_word: &str) -> bool {
        match (
            letter_at(owner_word, self.owner_index),
            letter_at(other_word, self.other_index),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Returns the ASCII letter of `word` at `index`.
#[inline]
pub(crate) fn letter_at(word: &str, index: usize) -> Option<u8> {
    word.as_bytes().get(index).copied()
}

/// All directed constraints of a puzzle, indexed by owner and by partner.
///
/// Built once per puzzle and shared read-only by every solver round.
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Puzzle};
/// use crossfill_solver::ConstraintGraph;
///
/// let puzzle = Puzzle::from_layout_slots("#.#\n...\n#.#".parse()?);
/// let graph = ConstraintGraph::from_puzzle(&puzzle);
///
/// assert_eq!(graph.len(), 2);
/// let c = graph.owned_by(ClueId::across(1)).next().unwrap();
/// assert_eq!((c.other, c.owner_index, c.other_index), (ClueId::down(1), 1, 1));
/// # Ok::<(), crossfill_core::LayoutError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintGraph {
    constraints: Vec<Constraint>,
    by_owner: BTreeMap<ClueId, Vec<usize>>,
    by_other: BTreeMap<ClueId, Vec<usize>>,
}

impl ConstraintGraph {
    /// Builds the constraints between every ordered pair of distinct clues.
    ///
    /// For each pair, the owner's letter positions are scanned in order and the first
    /// cell shared with the other clue produces the constraint. Pairs that never meet
    /// produce nothing. Constraints are stored in the order the clues are given.
    pub fn build<'a, I>(clues: I) -> Self
    where
        I: IntoIterator<Item = &'a Clue>,
    {
        let clues = clues.into_iter().collect::<Vec<_>>();
        let mut graph = Self::default();
        for owner in &clues {
            for other in &clues {
                if owner.id() == other.id() {
                    continue;
                }
                let shared = owner
                    .letter_positions()
                    .iter()
                    .enumerate()
                    .find_map(|(i, &pos)| other.letter_index(pos).map(|j| (i, j)));
                if let Some((owner_index, other_index)) = shared {
                    graph.push(Constraint {
                        owner: owner.id(),
                        other: other.id(),
                        owner_index,
                        other_index,
                    });
                }
            }
        }
        log::debug!(
            "built {} constraints over {} clues",
            graph.constraints.len(),
            clues.len()
        );
        graph
    }

    /// Builds the constraints of every clue of `puzzle`.
    #[must_use]
    pub fn from_puzzle(puzzle: &Puzzle) -> Self {
        Self::build(puzzle.clues())
    }

    fn push(&mut self, constraint: Constraint) {
        let index = self.constraints.len();
        self.by_owner.entry(constraint.owner).or_default().push(index);
        self.by_other.entry(constraint.other).or_default().push(index);
        self.constraints.push(constraint);
    }

    /// Returns the number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if no clues cross.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns all constraints in build order.
    #[must_use]
    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the constraint stored at `index`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Constraint> {
        self.constraints.get(index)
    }

    /// Iterates over the constraints owned by `id`.
    pub fn owned_by(&self, id: ClueId) -> impl Iterator<Item = &Constraint> + '_ {
        self.indices_owned_by(id).iter().map(|&i| &self.constraints[i])
    }

    /// Iterates over the constraints whose partner is `id`.
    pub fn targeting(&self, id: ClueId) -> impl Iterator<Item = &Constraint> + '_ {
        self.indices_targeting(id).iter().map(|&i| &self.constraints[i])
    }

    pub(crate) fn indices_owned_by(&self, id: ClueId) -> &[usize] {
        self.by_owner.get(&id).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn indices_targeting(&self, id: ClueId) -> &[usize] {
        self.by_other.get(&id).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use crossfill_core::{Layout, Position};

    use super::*;

    fn clue(id: &str, row: u8, col: u8, length: usize) -> Clue {
        Clue::new(id.parse().unwrap(), "", Position::new(row, col), length).unwrap()
    }

    #[test]
    fn test_both_directions() {
        let clues = [clue("A1", 1, 0, 3), clue("D1", 0, 2, 3)];
        let graph = ConstraintGraph::build(&clues);
        assert_eq!(
            graph.constraints(),
            [
                Constraint {
                    owner: ClueId::across(1),
                    other: ClueId::down(1),
                    owner_index: 2,
                    other_index: 1,
                },
                Constraint {
                    owner: ClueId::down(1),
                    other: ClueId::across(1),
                    owner_index: 1,
                    other_index: 2,
                },
            ]
        );
        assert_eq!(graph.targeting(ClueId::down(1)).count(), 1);
        assert_eq!(graph.owned_by(ClueId::down(1)).count(), 1);
    }

    #[test]
    fn test_parallel_clues_do_not_constrain() {
        let clues = [clue("A1", 0, 0, 3), clue("A2", 2, 0, 3)];
        let graph = ConstraintGraph::build(&clues);
        assert!(graph.is_empty());
        assert_eq!(graph.owned_by(ClueId::across(1)).count(), 0);
    }

    #[test]
    fn test_full_grid_counts() {
        let layout: Layout = "...\n...\n...".parse().unwrap();
        let graph = ConstraintGraph::from_puzzle(&Puzzle::from_layout_slots(layout));
        // every across clue crosses every down clue, in both directions
        assert_eq!(graph.len(), 3 * 3 * 2);
        for c in graph.constraints() {
            assert_ne!(c.owner.heading(), c.other.heading());
            assert_eq!(c.owner_index, usize::from(c.other.ordinal() - 1));
        }
    }

    #[test]
    fn test_is_satisfied_by() {
        let c = Constraint {
            owner: ClueId::across(1),
            other: ClueId::down(1),
            owner_index: 1,
            other_index: 0,
        };
        assert!(c.is_satisfied_by("CAT", "ANT"));
        assert!(!c.is_satisfied_by("CAT", "CAB"));
        assert!(!c.is_satisfied_by("C", "ANT"));
    }
}
