//! JSON puzzle input and solved output.

use std::collections::{BTreeMap, BTreeSet};

use crossfill_core::{
    Clue, ClueError, ClueId, ClueIdError, Dictionary, FillGrid, Layout, LayoutError, Position,
    Puzzle, PuzzleError,
    candidates::{self, CleanOptions},
};
use crossfill_solver::Solution;
use serde::{Deserialize, Serialize};

/// Errors raised while turning a [`PuzzleFile`] into a [`Puzzle`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleFileError {
    #[display("invalid layout: {_0}")]
    Layout(LayoutError),
    #[display("invalid clue id: {_0}")]
    ClueId(ClueIdError),
    #[display("{_0}")]
    Clue(ClueError),
    #[display("{_0}")]
    Puzzle(PuzzleError),
    #[display("clue {id} has no geometry and no matching slot in the layout")]
    #[from(skip)]
    NoSlot { id: ClueId },
}

/// A puzzle as stored on disk.
///
/// ```json
/// {
///   "layout": ["#....", ".....", ".....", ".....", "....#"],
///   "clues": [
///     { "id": "A1", "text": "Deli meats", "candidates": ["hams", "salami"] },
///     { "id": "D5", "start": [1, 0], "length": 4, "candidates": ["bats"] }
///   ]
/// }
/// ```
///
/// Clue geometry is optional and defaults to the layout slot with the same id. Slots
/// without an entry become clues without candidates, unless a clue already starts at
/// the same cell in the same direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleFile {
    pub layout: Vec<String>,
    #[serde(default)]
    pub clues: Vec<ClueEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClueEntry {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<[u8; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default)]
    pub candidates: Vec<String>,
}

impl PuzzleFile {
    /// Builds the puzzle, cleaning candidates first when `clean` is given.
    pub fn to_puzzle<D>(
        &self,
        clean: Option<&CleanOptions>,
        dictionary: Option<&D>,
    ) -> Result<Puzzle, PuzzleFileError>
    where
        D: Dictionary + ?Sized,
    {
        let layout = self.layout.join("\n").parse::<Layout>()?;
        let slots = layout
            .slots()
            .into_iter()
            .map(|slot| (slot.id, slot))
            .collect::<BTreeMap<_, _>>();
        let mut puzzle = Puzzle::new(layout);

        for entry in &self.clues {
            let id = entry.id.parse::<ClueId>()?;
            let slot = slots.get(&id);
            let start = match (entry.start, slot) {
                (Some([row, col]), _) => Position::new(row, col),
                (None, Some(slot)) => slot.start,
                (None, None) => return Err(PuzzleFileError::NoSlot { id }),
            };
            let length = match (entry.length, slot) {
                (Some(length), _) => length,
                (None, Some(slot)) => slot.length,
                (None, None) => return Err(PuzzleFileError::NoSlot { id }),
            };
            puzzle.add_clue(Clue::new(id, entry.text.as_str(), start, length)?)?;

            let rejected = match clean {
                Some(options) => {
                    let words =
                        candidates::clean(&entry.text, length, &entry.candidates, options, dictionary);
                    log::debug!(
                        "{id}: kept {} of {} candidates after cleaning",
                        words.len(),
                        entry.candidates.len()
                    );
                    puzzle.set_candidates(id, words)?
                }
                None => puzzle.set_candidates(id, &entry.candidates)?,
            };
            if !rejected.is_empty() {
                log::info!("{id}: ignored {} candidates of the wrong length", rejected.len());
            }
        }

        let placed = puzzle
            .clues()
            .map(|clue| (clue.start(), clue.heading()))
            .collect::<BTreeSet<_>>();
        for (id, slot) in slots {
            if puzzle.clue(id).is_some() || placed.contains(&(slot.start, id.heading())) {
                continue;
            }
            puzzle.add_clue(Clue::new(id, "", slot.start, slot.length)?)?;
        }
        Ok(puzzle)
    }
}

/// The solved grid and answers, as printed with `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedFile {
    pub grid: Vec<String>,
    pub answers: Vec<AnswerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub id: String,
    pub answer: String,
}

impl SolvedFile {
    pub fn new(grid: &FillGrid, solution: &Solution) -> Self {
        let mut answers = solution
            .iter()
            .map(|(id, answer)| (id, answer.to_owned()))
            .collect::<Vec<_>>();
        answers.sort_unstable_by_key(|(id, _)| *id);
        Self {
            grid: grid.to_string().lines().map(str::to_owned).collect(),
            answers: answers
                .into_iter()
                .map(|(id, answer)| AnswerEntry {
                    id: id.to_string(),
                    answer,
                })
                .collect(),
        }
    }
}
