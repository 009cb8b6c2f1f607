//! Leave-one-clue-out ensemble of search rounds.
//!
//! Candidate lists come from noisy sources, and a single clue whose true answer is
//! missing can starve its crossings during AC-3. The ensemble therefore runs one round
//! on all domains plus one round per clue with that clue's domain emptied, and pools
//! the solutions of every round.

use std::{cmp::Reverse, fmt};

use crossfill_core::{ClueId, Domains};
use rayon::prelude::*;

use crate::{
    Ac3Stats, BacktrackingSearch, ConstraintGraph, SearchBudget, SearchStats, Solution,
    establish_arc_consistency,
};

/// The clue whose domain a round empties before solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum LeaveOut {
    /// Every domain is kept.
    Nothing,
    /// The domain of this clue is emptied.
    Clue(ClueId),
}

impl fmt::Display for LeaveOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "-"),
            Self::Clue(id) => write!(f, "{id}"),
        }
    }
}

/// Options for an [`Ensemble`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnsembleConfig {
    /// Runs the rounds on the rayon thread pool.
    ///
    /// Results are merged in round order, so the outcome is the same either way.
    pub parallel: bool,
    /// Search limits applied to each round separately.
    pub budget: SearchBudget,
}

/// What happened in one ensemble round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    /// The clue this round left out.
    pub leave_out: LeaveOut,
    /// Size of the round's search set.
    pub search_set: usize,
    /// AC-3 counters.
    pub ac3: Ac3Stats,
    /// Search counters.
    pub search: SearchStats,
    /// Number of solutions the round contributed.
    pub solutions: usize,
    /// Largest coverage among those solutions.
    pub best_coverage: usize,
}

/// The pooled result of every round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsembleOutcome {
    /// Every solution, grouped by round in round order.
    pub pool: Vec<Solution>,
    /// One report per round, in round order.
    pub rounds: Vec<RoundReport>,
}

impl EnsembleOutcome {
    /// Returns the solution with the highest coverage, the earliest one on ties.
    #[must_use]
    pub fn best(&self) -> Option<&Solution> {
        self.pool.iter().fold(None, |best, s| match best {
            Some(b) if b.len() >= s.len() => Some(b),
            _ => Some(s),
        })
    }

    /// Returns the pool sorted by coverage, descending, keeping pool order on ties.
    #[must_use]
    pub fn ranked(&self) -> Vec<&Solution> {
        let mut ranked = self.pool.iter().collect::<Vec<_>>();
        ranked.sort_by_key(|s| Reverse(s.len()));
        ranked
    }

    /// Consumes the outcome, returning the pool ranked as in [`ranked`](Self::ranked).
    #[must_use]
    pub fn into_ranked(self) -> Vec<Solution> {
        let mut pool = self.pool;
        pool.sort_by_key(|s| Reverse(s.len()));
        pool
    }
}

/// Runs the leave-one-out rounds over a fixed constraint graph and backup domains.
///
/// Every round works on its own copy of the backup, so rounds never observe each
/// other's pruning.
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Puzzle};
/// use crossfill_solver::{ConstraintGraph, Ensemble, EnsembleConfig, LeaveOut};
///
/// let mut puzzle = Puzzle::from_layout_slots("#.#\n...\n#.#".parse()?);
/// puzzle.set_candidates(ClueId::across(1), ["cat"])?;
/// // the right answer CAB is missing
/// puzzle.set_candidates(ClueId::down(1), ["ten"])?;
///
/// let graph = ConstraintGraph::from_puzzle(&puzzle);
/// let ensemble = Ensemble::new(&graph, puzzle.domains(), EnsembleConfig::default());
/// assert_eq!(
///     ensemble.leave_outs(),
///     [LeaveOut::Nothing, LeaveOut::Clue(ClueId::across(1)), LeaveOut::Clue(ClueId::down(1))]
/// );
///
/// let outcome = ensemble.run();
/// assert_eq!(outcome.rounds.len(), 3);
/// assert_eq!(outcome.best().unwrap().len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ensemble<'a> {
    graph: &'a ConstraintGraph,
    backup: &'a Domains,
    config: EnsembleConfig,
}

impl<'a> Ensemble<'a> {
    /// Creates an ensemble over `backup`, which is never modified.
    #[must_use]
    pub fn new(graph: &'a ConstraintGraph, backup: &'a Domains, config: EnsembleConfig) -> Self {
        Self {
            graph,
            backup,
            config,
        }
    }

    /// Returns the rounds to run: nothing left out first, then each clue with
    /// candidates in identifier order.
    #[must_use]
    pub fn leave_outs(&self) -> Vec<LeaveOut> {
        std::iter::once(LeaveOut::Nothing)
            .chain(self.backup.nonempty_ids().into_iter().map(LeaveOut::Clue))
            .collect()
    }

    /// Runs a single round and returns its report and solutions.
    #[must_use]
    pub fn run_round(&self, leave_out: LeaveOut) -> (RoundReport, Vec<Solution>) {
        let mut domains = self.backup.clone();
        if let LeaveOut::Clue(id) = leave_out {
            domains.clear(id);
        }
        // decided before pruning: clues emptied by AC-3 stay in the set but are never
        // selected
        let search_set = domains.nonempty_ids();
        let ac3 = establish_arc_consistency(self.graph, &mut domains);
        let outcome = BacktrackingSearch::new(
            self.graph,
            &domains,
            search_set.iter().copied(),
            self.config.budget,
        )
        .run();

        let report = RoundReport {
            leave_out,
            search_set: search_set.len(),
            ac3,
            search: outcome.stats,
            solutions: outcome.solutions.len(),
            best_coverage: outcome.solutions.iter().map(Solution::len).max().unwrap_or(0),
        };
        log::debug!(
            "round {leave_out}: {} solutions, best coverage {}",
            report.solutions,
            report.best_coverage
        );
        (report, outcome.solutions)
    }

    /// Runs every round and pools the results in round order.
    #[must_use]
    pub fn run(&self) -> EnsembleOutcome {
        let leave_outs = self.leave_outs();
        let results = if self.config.parallel {
            leave_outs
                .par_iter()
                .map(|&leave_out| self.run_round(leave_out))
                .collect::<Vec<_>>()
        } else {
            leave_outs
                .iter()
                .map(|&leave_out| self.run_round(leave_out))
                .collect::<Vec<_>>()
        };

        let mut outcome = EnsembleOutcome::default();
        for (report, solutions) in results {
            outcome.rounds.push(report);
            outcome.pool.extend(solutions);
        }
        log::info!(
            "ensemble ran {} rounds, pooled {} solutions",
            outcome.rounds.len(),
            outcome.pool.len()
        );
        outcome
    }
}
