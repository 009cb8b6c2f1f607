//! Constraint-satisfaction engine for filling small crossword grids.
//!
//! The engine works in phases, each in its own module:
//!
//! 1. [`ConstraintGraph`] turns crossing clues into directed letter-equality constraints.
//! 2. [`establish_arc_consistency`] prunes candidate domains with AC-3.
//! 3. [`BacktrackingSearch`] enumerates consistent, possibly partial, assignments.
//! 4. [`Ensemble`] repeats 2 and 3 with each clue's candidates left out in turn, to
//!    survive a clue whose candidate list is wrong.
//! 5. [`assemble`] paints the best [`Solution`] onto a grid and [`fill_gaps`] guesses
//!    isolated blank cells with a [`Dictionary`](crossfill_core::Dictionary).
//!
//! [`Engine`] owns a puzzle and runs the whole pipeline.
//!
//! # Examples
//!
//! ```
//! use crossfill_core::{ClueId, Layout, Puzzle, WordList};
//! use crossfill_solver::Engine;
//!
//! let layout: Layout = "
//!     #.#
//!     ...
//!     #.#
//! "
//! .parse()?;
//! let mut puzzle = Puzzle::from_layout_slots(layout);
//! puzzle.set_candidates(ClueId::across(1), ["cat", "dog"])?;
//! puzzle.set_candidates(ClueId::down(1), ["ten", "cab"])?;
//!
//! let mut engine = Engine::new(puzzle)?;
//! let result = engine.solve(&WordList::new())?;
//! assert_eq!(result.solution.to_string(), "A1=CAT D1=CAB");
//! assert_eq!(result.grid.to_string(), "#C#\nCAT\n#B#");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    ac3::*, assemble::*, constraint::*, engine::*, ensemble::*, error::*, gap_fill::*,
    search::*,
};

mod ac3;
mod assemble;
mod constraint;
mod engine;
mod ensemble;
mod error;
mod gap_fill;
mod search;

#[cfg(test)]
mod testing;
