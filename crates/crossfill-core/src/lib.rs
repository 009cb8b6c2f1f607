//! Core data structures for crossword filling.
//!
//! This crate provides the immutable geometry of a small crossword puzzle together with
//! the candidate answers attached to each clue. These structures are shared by the
//! constraint solver and by front ends that load puzzles from files.
//!
//! # Overview
//!
//! 1. **Geometry** - Where things are on the board
//!    - [`position`]: Cell coordinates and the two clue [`Heading`]s
//!    - [`layout`]: The black/white fill-state of an N×N grid, plus clue slot derivation
//!
//! 2. **Clues** - What has to be filled
//!    - [`clue`]: Clue identifiers (`A1`, `D3`, ...) and clue geometry
//!    - [`domain`]: Candidate answer sets and per-puzzle domain snapshots
//!    - [`candidates`]: Normalization and cleaning of raw candidate words
//!
//! 3. **Aggregates**
//!    - [`puzzle`]: A validated layout + clues + candidate domains
//!    - [`fill_grid`]: The letter grid produced by filling a puzzle
//!    - [`dictionary`]: The word membership oracle used to validate guesses
//!
//! # Examples
//!
//! ```
//! use crossfill_core::{ClueId, Layout, Puzzle};
//!
//! let layout: Layout = "
//!     ...
//!     .#.
//!     ...
//! "
//! .parse()?;
//! let mut puzzle = Puzzle::from_layout_slots(layout);
//! puzzle.set_candidates(ClueId::across(1), ["cat", "dog"])?;
//!
//! assert_eq!(puzzle.clues().count(), 4);
//! assert_eq!(puzzle.domain(ClueId::across(1)).unwrap().len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod candidates;
pub mod clue;
pub mod dictionary;
pub mod domain;
pub mod fill_grid;
pub mod layout;
pub mod position;
pub mod puzzle;

pub use self::{
    clue::{Clue, ClueError, ClueId, ClueIdError},
    dictionary::{Dictionary, WordList},
    domain::{Domain, DomainError, Domains},
    fill_grid::FillGrid,
    layout::{ClueSlot, Layout, LayoutError},
    position::{Heading, Position},
    puzzle::{Puzzle, PuzzleError},
};
