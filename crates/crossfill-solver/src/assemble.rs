//! Painting a solution onto the letter grid.

use crossfill_core::{FillGrid, Puzzle};

use crate::Solution;

/// Paints the answers of `solution` onto an empty grid of the puzzle's layout.
///
/// Answers are written in solution order, letter by letter along each clue. White
/// cells no answer covers stay blank. Entries for unknown clues, or answers whose
/// length does not match their clue, are logged and ignored.
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Puzzle};
/// use crossfill_solver::{Solution, assemble};
///
/// let puzzle = Puzzle::from_layout_slots("#.#\n...\n#.#".parse()?);
/// let solution = Solution::from_iter([(ClueId::across(1), "CAT".to_owned())]);
///
/// let grid = assemble(&puzzle, &solution);
/// assert_eq!(grid.to_string(), "#.#\nCAT\n#.#");
/// # Ok::<(), crossfill_core::LayoutError>(())
/// ```
#[must_use]
pub fn assemble(puzzle: &Puzzle, solution: &Solution) -> FillGrid {
    let mut grid = FillGrid::new(puzzle.layout().clone());
    for (id, word) in solution.iter() {
        let Some(clue) = puzzle.clue(id) else {
            log::warn!("solution names unknown clue {id}");
            continue;
        };
        if word.len() != clue.length() {
            log::warn!("answer {word} does not fit clue {id} of length {}", clue.length());
            continue;
        }
        for (&pos, letter) in clue.letter_positions().iter().zip(word.chars()) {
            grid.set(pos, letter);
        }
    }
    grid
}
