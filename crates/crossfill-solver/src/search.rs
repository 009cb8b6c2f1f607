//! Backtracking search over reduced domains.
//!
//! Unlike a plain CSP search, every clue may also be *skipped*: a candidate list can be
//! wrong, and a grid with one clue left blank is better than no grid at all. Each leaf
//! of the search tree is therefore a [`Solution`], possibly partial.

use std::{collections::BTreeMap, fmt};

use crossfill_core::{ClueId, Domain, Domains};

use crate::ConstraintGraph;

/// Limits for one [`BacktrackingSearch`] run.
///
/// Skipping makes the tree grow with the product of domain sizes, so runs are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum number of search nodes to visit.
    pub max_nodes: usize,
    /// Maximum number of solutions to collect.
    pub max_solutions: usize,
}

impl SearchBudget {
    /// A budget that never stops the search.
    pub const UNLIMITED: Self = Self {
        max_nodes: usize::MAX,
        max_solutions: usize::MAX,
    };
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_nodes: 200_000,
            max_solutions: 10_000,
        }
    }
}

/// The state of one clue during search.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SlotState {
    /// Not decided yet.
    Unassigned,
    /// Holds an answer from the clue's domain.
    Assigned(String),
    /// Deliberately left without an answer on this branch.
    Skipped,
}

impl SlotState {
    /// Returns the assigned answer.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Assigned(word) => Some(word),
            Self::Unassigned | Self::Skipped => None,
        }
    }
}

/// One terminal state of a search: answers in the order they were assigned.
///
/// # Examples
///
/// ```
/// use crossfill_core::ClueId;
/// use crossfill_solver::Solution;
///
/// let solution = Solution::from_iter([
///     (ClueId::across(1), "CAT".to_owned()),
///     (ClueId::down(1), "CAB".to_owned()),
/// ]);
/// assert_eq!(solution.len(), 2);
/// assert_eq!(solution.answer(ClueId::down(1)), Some("CAB"));
/// assert_eq!(solution.to_string(), "A1=CAT D1=CAB");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    entries: Vec<(ClueId, String)>,
}

impl Solution {
    /// Creates an empty solution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of answered clues, the solution's coverage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no clue is answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `(clue, answer)` pairs in assignment order.
    #[must_use]
    pub fn entries(&self) -> &[(ClueId, String)] {
        &self.entries
    }

    /// Iterates over the `(clue, answer)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (ClueId, &str)> + '_ {
        self.entries.iter().map(|(id, word)| (*id, word.as_str()))
    }

    /// Returns the answer of `id`, if it has one.
    #[must_use]
    pub fn answer(&self, id: ClueId) -> Option<&str> {
        self.iter().find(|(i, _)| *i == id).map(|(_, word)| word)
    }

    /// Returns `true` if every pair of answered crossing clues agrees on its shared cell.
    #[must_use]
    pub fn is_consistent(&self, graph: &ConstraintGraph) -> bool {
        graph.constraints().iter().all(|c| {
            match (self.answer(c.owner), self.answer(c.other)) {
                (Some(a), Some(b)) => c.is_satisfied_by(a, b),
                _ => true,
            }
        })
    }
}

impl FromIterator<(ClueId, String)> for Solution {
    fn from_iter<T: IntoIterator<Item = (ClueId, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, word)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{id}={word}")?;
        }
        Ok(())
    }
}

/// Counters collected by one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of search nodes visited.
    pub nodes: usize,
    /// Number of skip branches taken.
    pub skips: usize,
    /// Number of candidates rejected by already assigned crossings.
    pub conflicts: usize,
    /// Whether the run stopped at its [`SearchBudget`].
    pub exhausted: bool,
}

/// The solutions of one search run and how much work it took.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Solutions in the order they were found.
    pub solutions: Vec<Solution>,
    /// Work counters.
    pub stats: SearchStats,
}

/// Depth-first search with an explicit skip branch per clue.
///
/// At every node the unassigned clue with the shortest answer and a non-empty domain is
/// picked, ties going to the lowest clue identifier. Each of its candidates consistent
/// with the answers assigned so far is tried in lexicographic order, and finally the
/// clue is skipped. A node where no clue can be picked is a leaf and yields a
/// [`Solution`]. Every state change is undone on the way back up, so sibling branches
/// never see each other's assignments.
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Puzzle};
/// use crossfill_solver::{BacktrackingSearch, ConstraintGraph, SearchBudget};
///
/// let mut puzzle = Puzzle::from_layout_slots("#.#\n...\n#.#".parse()?);
/// puzzle.set_candidates(ClueId::across(1), ["cat"])?;
/// puzzle.set_candidates(ClueId::down(1), ["cab", "ten"])?;
/// let graph = ConstraintGraph::from_puzzle(&puzzle);
/// let domains = puzzle.domains();
///
/// let outcome =
///     BacktrackingSearch::new(&graph, domains, domains.nonempty_ids(), SearchBudget::default())
///         .run();
/// assert_eq!(outcome.solutions[0].to_string(), "A1=CAT D1=CAB");
/// assert!(outcome.solutions.iter().all(|s| s.is_consistent(&graph)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BacktrackingSearch<'a> {
    graph: &'a ConstraintGraph,
    domains: &'a Domains,
    budget: SearchBudget,
    clues: Vec<ClueId>,
    slots: BTreeMap<ClueId, usize>,
    states: Vec<SlotState>,
    order: Vec<usize>,
    solutions: Vec<Solution>,
    stats: SearchStats,
}

impl<'a> BacktrackingSearch<'a> {
    /// Prepares a search over the clues in `search_set`.
    ///
    /// Clues outside the search set are never assigned, even if they have candidates.
    pub fn new<I>(
        graph: &'a ConstraintGraph,
        domains: &'a Domains,
        search_set: I,
        budget: SearchBudget,
    ) -> Self
    where
        I: IntoIterator<Item = ClueId>,
    {
        let mut clues = search_set.into_iter().collect::<Vec<_>>();
        clues.sort_unstable();
        clues.dedup();
        let slots = clues.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self {
            graph,
            domains,
            budget,
            states: vec![SlotState::Unassigned; clues.len()],
            clues,
            slots,
            order: Vec::new(),
            solutions: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Runs the search to completion or until the budget runs out.
    #[must_use]
    pub fn run(mut self) -> SearchOutcome {
        self.descend();
        if self.stats.exhausted {
            log::warn!(
                "search stopped early after {} nodes and {} solutions",
                self.stats.nodes,
                self.solutions.len()
            );
        }
        log::debug!(
            "search over {} clues: {} solutions, {:?}",
            self.clues.len(),
            self.solutions.len(),
            self.stats
        );
        SearchOutcome {
            solutions: self.solutions,
            stats: self.stats,
        }
    }

    fn descend(&mut self) {
        if self.stats.exhausted {
            return;
        }
        if self.stats.nodes >= self.budget.max_nodes {
            self.stats.exhausted = true;
            return;
        }
        self.stats.nodes += 1;

        let Some(slot) = self.select() else {
            self.record();
            return;
        };

        let domains = self.domains;
        for word in domains.get(self.clues[slot]).into_iter().flat_map(Domain::iter) {
            if self.stats.exhausted {
                break;
            }
            if !self.is_consistent(slot, word) {
                self.stats.conflicts += 1;
                continue;
            }
            self.states[slot] = SlotState::Assigned(word.to_owned());
            self.order.push(slot);
            self.descend();
            self.order.pop();
        }

        if !self.stats.exhausted {
            self.states[slot] = SlotState::Skipped;
            self.stats.skips += 1;
            self.descend();
        }
        self.states[slot] = SlotState::Unassigned;
    }

    fn select(&self) -> Option<usize> {
        (0..self.clues.len())
            .filter(|&i| self.states[i].is_unassigned())
            .filter_map(|i| {
                let domain = self.domains.get(self.clues[i])?;
                (!domain.is_empty()).then_some((i, domain.word_length()))
            })
            .min_by_key(|&(_, length)| length)
            .map(|(i, _)| i)
    }

    fn answer(&self, id: ClueId) -> Option<&str> {
        self.slots.get(&id).and_then(|&i| self.states[i].answer())
    }

    fn is_consistent(&self, slot: usize, word: &str) -> bool {
        let id = self.clues[slot];
        self.graph
            .owned_by(id)
            .all(|c| self.answer(c.other).is_none_or(|other| c.is_satisfied_by(word, other)))
            && self
                .graph
                .targeting(id)
                .all(|c| self.answer(c.owner).is_none_or(|owner| c.is_satisfied_by(owner, word)))
    }

    fn record(&mut self) {
        let solution = self
            .order
            .iter()
            .filter_map(|&i| Some((self.clues[i], self.states[i].answer()?.to_owned())))
            .collect();
        self.solutions.push(solution);
        if self.solutions.len() >= self.budget.max_solutions {
            self.stats.exhausted = true;
        }
    }
}
