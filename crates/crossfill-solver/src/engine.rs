//! The solving session tying all phases together.

use crossfill_core::{Dictionary, FillGrid, Puzzle};

use crate::{
    ConstraintGraph, Ensemble, EnsembleConfig, GapFillReport, RoundReport, SolverError,
    Solution, assemble, fill_gaps,
};

/// Options for an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ensemble options, including the per-round search budget.
    pub ensemble: EnsembleConfig,
    /// Whether to guess isolated blank cells after assembly.
    pub fill_gaps: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ensemble: EnsembleConfig::default(),
            fill_gaps: true,
        }
    }
}

/// The result of [`Engine::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillResult {
    /// The filled grid.
    pub grid: FillGrid,
    /// The winning solution, before gap filling.
    pub solution: Solution,
    /// Letters added by the gap filler.
    pub gap_fill: GapFillReport,
    /// One report per ensemble round.
    pub rounds: Vec<RoundReport>,
}

/// A solving session over one puzzle.
///
/// The engine owns the puzzle, whose domains serve as the backup every ensemble round
/// restores from, and the constraint graph, built once. [`solve`](Self::solve) can run
/// any number of times; the solution pool of the last run stays available through
/// [`solutions`](Self::solutions).
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Puzzle, WordList};
/// use crossfill_solver::{Engine, EngineConfig};
///
/// let mut puzzle = Puzzle::from_layout_slots("#.#\n...\n#..".parse()?);
/// puzzle.set_candidates(ClueId::across(1), ["cat"])?;
/// puzzle.set_candidates(ClueId::down(1), ["cab", "cub"])?;
///
/// let mut engine = Engine::with_config(puzzle, EngineConfig::default())?;
/// let result = engine.solve(&WordList::from_words(["BO", "TO"]))?;
///
/// assert_eq!(result.solution.to_string(), "A1=CAT D1=CAB");
/// assert_eq!(result.grid.to_string(), "#C#\nCAT\n#BO");
/// assert_eq!(engine.solutions()[0], result.solution);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    puzzle: Puzzle,
    graph: ConstraintGraph,
    config: EngineConfig,
    solutions: Vec<Solution>,
}

impl Engine {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoClues`] if the puzzle has no clues.
    pub fn new(puzzle: Puzzle) -> Result<Self, SolverError> {
        Self::with_config(puzzle, EngineConfig::default())
    }

    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoClues`] if the puzzle has no clues.
    pub fn with_config(puzzle: Puzzle, config: EngineConfig) -> Result<Self, SolverError> {
        if puzzle.clue_count() == 0 {
            return Err(SolverError::NoClues);
        }
        let graph = ConstraintGraph::from_puzzle(&puzzle);
        Ok(Self {
            puzzle,
            graph,
            config,
            solutions: Vec::new(),
        })
    }

    /// Returns the puzzle.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Returns the constraint graph.
    #[must_use]
    pub fn graph(&self) -> &ConstraintGraph {
        &self.graph
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the solution pool of the last [`solve`](Self::solve), best first.
    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Runs the ensemble, assembles the best solution and fills isolated gaps.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Unsolved`] if no round produced a solution, which only
    /// happens when the search budget allows no nodes at all.
    pub fn solve<D>(&mut self, dictionary: &D) -> Result<FillResult, SolverError>
    where
        D: Dictionary + ?Sized,
    {
        let outcome =
            Ensemble::new(&self.graph, self.puzzle.domains(), self.config.ensemble).run();
        let rounds = outcome.rounds.clone();
        self.solutions = outcome.into_ranked();

        let solution = self
            .solutions
            .first()
            .cloned()
            .ok_or(SolverError::Unsolved {
                rounds: rounds.len(),
            })?;
        log::info!(
            "best solution answers {} of {} clues",
            solution.len(),
            self.puzzle.clue_count()
        );

        let mut grid = assemble(&self.puzzle, &solution);
        let gap_fill = if self.config.fill_gaps {
            fill_gaps(&mut grid, dictionary)
        } else {
            GapFillReport::default()
        };

        Ok(FillResult {
            grid,
            solution,
            gap_fill,
            rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use crossfill_core::{Layout, WordList};

    use super::*;
    use crate::SearchBudget;

    #[test]
    fn test_no_clues() {
        let layout: Layout = "#.\n.#".parse().unwrap();
        let puzzle = Puzzle::from_layout_slots(layout);
        assert_eq!(Engine::new(puzzle).unwrap_err(), SolverError::NoClues);
    }

    #[test]
    fn test_zero_budget_is_unsolved() {
        let puzzle = Puzzle::from_layout_slots("..\n..".parse().unwrap());
        let config = EngineConfig {
            ensemble: EnsembleConfig {
                budget: SearchBudget {
                    max_nodes: 0,
                    ..SearchBudget::default()
                },
                ..EnsembleConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(puzzle, config).unwrap();
        assert_eq!(
            engine.solve(&WordList::new()),
            Err(SolverError::Unsolved { rounds: 1 })
        );
        assert!(engine.solutions().is_empty());
    }

    #[test]
    fn test_without_candidates_grid_stays_blank() {
        let puzzle = Puzzle::from_layout_slots("..\n..".parse().unwrap());
        let mut engine = Engine::new(puzzle).unwrap();
        let result = engine.solve(&WordList::new()).unwrap();
        assert!(result.solution.is_empty());
        assert_eq!(result.rounds.len(), 1);
        assert_eq!(result.grid.to_string(), "..\n..");
        assert_eq!(result.gap_fill.crowded.len(), 4);
    }

    #[test]
    fn test_gap_fill_can_be_disabled() {
        let mut puzzle = Puzzle::from_layout_slots("#.#\n...\n#..".parse().unwrap());
        puzzle
            .set_candidates("A1".parse().unwrap(), ["cat"])
            .unwrap();
        let config = EngineConfig {
            fill_gaps: false,
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(puzzle, config).unwrap();
        let result = engine
            .solve(&WordList::from_words(["CAB", "BE", "C"]))
            .unwrap();
        assert_eq!(result.grid.to_string(), "#.#\nCAT\n#..");
        assert_eq!(result.gap_fill, GapFillReport::default());
    }
}
