//! Test utilities for the solver phases.
//!
//! [`Ac3Tester`] keeps the initial and current domains of a small puzzle so tests can
//! reduce, search, and assert in one fluent chain.

use crossfill_core::{ClueId, Domains, Layout, Puzzle};

use crate::{
    Ac3Stats, BacktrackingSearch, ConstraintGraph, SearchBudget, SearchOutcome,
    establish_arc_consistency,
};

/// A test harness over a puzzle built from a layout string.
///
/// Clue identifiers are given as strings such as `"A1"`; candidates are any case.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct Ac3Tester {
    puzzle: Puzzle,
    graph: ConstraintGraph,
    initial: Domains,
    current: Domains,
    stats: Ac3Stats,
}

impl Ac3Tester {
    /// Creates a tester with one empty clue per slot of `layout`.
    #[track_caller]
    pub fn new(layout: &str) -> Self {
        let layout = layout.parse::<Layout>().unwrap();
        let puzzle = Puzzle::from_layout_slots(layout);
        let graph = ConstraintGraph::from_puzzle(&puzzle);
        let initial = puzzle.domains().clone();
        Self {
            current: initial.clone(),
            puzzle,
            graph,
            initial,
            stats: Ac3Stats::default(),
        }
    }

    /// Sets the candidates of a clue, resetting the current domains to the initial ones.
    #[track_caller]
    pub fn candidates(mut self, id: &str, words: &[&str]) -> Self {
        let id = parse_id(id);
        let rejected = self.puzzle.set_candidates(id, words).unwrap();
        assert!(rejected.is_empty(), "{id}: rejected candidates {rejected:?}");
        self.initial = self.puzzle.domains().clone();
        self.current = self.initial.clone();
        self
    }

    /// Empties the current domain of a clue, as an ensemble round does.
    #[track_caller]
    pub fn leave_out(mut self, id: &str) -> Self {
        self.current.clear(parse_id(id));
        self
    }

    /// Runs AC-3 on the current domains.
    pub fn reduce(mut self) -> Self {
        self.stats = establish_arc_consistency(&self.graph, &mut self.current);
        self
    }

    /// Searches the current domains over their non-empty clues.
    pub fn search(&self, budget: SearchBudget) -> SearchOutcome {
        BacktrackingSearch::new(
            &self.graph,
            &self.current,
            self.current.nonempty_ids(),
            budget,
        )
        .run()
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn graph(&self) -> &ConstraintGraph {
        &self.graph
    }

    pub fn domains(&self) -> &Domains {
        &self.current
    }

    pub fn stats(&self) -> Ac3Stats {
        self.stats
    }

    /// Asserts that the current domain of `id` holds exactly `words`.
    #[track_caller]
    pub fn assert_domain(self, id: &str, words: &[&str]) -> Self {
        let id = parse_id(id);
        let mut expected = words.to_vec();
        expected.sort_unstable();
        let actual = self
            .current
            .get(id)
            .map(|d| d.iter().collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(actual, expected, "domain of {id}");
        self
    }

    /// Asserts that every word of a non-empty domain has support in every non-empty
    /// partner domain.
    #[track_caller]
    pub fn assert_sound(self) -> Self {
        for c in self.graph.constraints() {
            let (Some(owner), Some(other)) = (self.current.get(c.owner), self.current.get(c.other))
            else {
                continue;
            };
            if other.is_empty() {
                continue;
            }
            for word in owner.iter() {
                assert!(
                    other.iter().any(|w| c.is_satisfied_by(word, w)),
                    "{word} in {} has no support in {}",
                    c.owner,
                    c.other
                );
            }
        }
        self
    }

    /// Asserts that every current domain is a subset of its initial domain.
    #[track_caller]
    pub fn assert_shrunk_only(self) -> Self {
        for (id, domain) in &self.current {
            let initial = self.initial.get(*id).unwrap();
            assert!(domain.is_subset(initial), "domain of {id} grew");
        }
        self
    }

    /// Asserts that reducing the current domains again changes nothing.
    #[track_caller]
    pub fn assert_idempotent(self) -> Self {
        let mut again = self.current.clone();
        let stats = establish_arc_consistency(&self.graph, &mut again);
        assert_eq!(stats.removed, 0, "second pass removed words");
        assert_eq!(again, self.current);
        self
    }
}

#[track_caller]
pub fn parse_id(id: &str) -> ClueId {
    id.parse().unwrap()
}
