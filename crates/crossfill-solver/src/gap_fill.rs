//! Dictionary-driven completion of isolated blank cells.

use crossfill_core::{Dictionary, FillGrid, Heading, Position};

/// What [`fill_gaps`] did with each blank cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapFillReport {
    /// Cells that received a letter, in visiting order.
    pub filled: Vec<(Position, char)>,
    /// Isolated cells for which no letter made both crossing lines words.
    pub unresolved: Vec<Position>,
    /// Cells sharing a line with another blank cell, left untouched.
    pub crowded: Vec<Position>,
}

impl GapFillReport {
    /// Returns the number of cells still blank.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.unresolved.len() + self.crowded.len()
    }
}

/// The letters of a full row or column with a single hole.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    letters: Vec<char>,
    hole: usize,
}

impl Pattern {
    /// Reads the line through the blank cell `pos`, or `None` if the line has another
    /// blank cell.
    fn through(grid: &FillGrid, pos: Position, heading: Heading) -> Option<Self> {
        let mut letters = Vec::new();
        let mut hole = None;
        for (p, letter) in grid.line(pos, heading) {
            match letter {
                Some(c) => letters.push(c),
                None if p == pos => {
                    hole = Some(letters.len());
                    letters.push('?');
                }
                None => return None,
            }
        }
        Some(Self {
            letters,
            hole: hole?,
        })
    }

    fn with(&self, letter: char) -> String {
        let mut letters = self.letters.clone();
        letters[self.hole] = letter;
        letters.into_iter().collect()
    }
}

/// Guesses letters for blank white cells.
///
/// Blank cells are visited in row-major order. For each one, the whole row and the
/// whole column through it are read, skipping black cells. If either line has another
/// blank cell, the cell is left alone. Otherwise the letters `A` to `Z` are tried in
/// order, and the first one that turns both lines into dictionary words is written.
/// Letters written earlier in the pass are visible to later cells.
///
/// # Examples
///
/// ```
/// use crossfill_core::{FillGrid, Position, WordList};
/// use crossfill_solver::fill_gaps;
///
/// let mut grid = FillGrid::new("...\n...\n...".parse()?);
/// for (row, word) in ["CAT", "A.E", "BET"].iter().enumerate() {
///     for (col, c) in word.chars().enumerate() {
///         if c != '.' {
///             grid.set(Position::new(row as u8, col as u8), c);
///         }
///     }
/// }
/// let words = WordList::from_words(["ACE", "ARE", "AXE"]);
/// let report = fill_gaps(&mut grid, &words);
///
/// assert_eq!(report.filled, [(Position::new(1, 1), 'C')]);
/// assert_eq!(grid.to_string(), "CAT\nACE\nBET");
/// # Ok::<(), crossfill_core::LayoutError>(())
/// ```
pub fn fill_gaps<D>(grid: &mut FillGrid, dictionary: &D) -> GapFillReport
where
    D: Dictionary + ?Sized,
{
    let mut report = GapFillReport::default();
    for pos in grid.blank_cells() {
        let (Some(across), Some(down)) = (
            Pattern::through(grid, pos, Heading::Across),
            Pattern::through(grid, pos, Heading::Down),
        ) else {
            report.crowded.push(pos);
            continue;
        };
        let letter = ('A'..='Z')
            .find(|&c| dictionary.contains(&across.with(c)) && dictionary.contains(&down.with(c)));
        match letter {
            Some(letter) => {
                grid.set(pos, letter);
                log::debug!("filled {pos} with {letter}");
                report.filled.push((pos, letter));
            }
            None => report.unresolved.push(pos),
        }
    }
    if report.remaining() > 0 {
        log::info!(
            "{} blank cells left ({} unresolved, {} crowded)",
            report.remaining(),
            report.unresolved.len(),
            report.crowded.len()
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use crossfill_core::WordList;

    use super::*;

    fn grid(rows: &[&str]) -> FillGrid {
        let layout = rows
            .iter()
            .map(|r| r.replace(|c: char| c.is_ascii_alphabetic(), "."))
            .collect::<Vec<_>>()
            .join("\n");
        let mut grid = FillGrid::new(layout.parse().unwrap());
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if c.is_ascii_alphabetic() {
                    grid.set(
                        Position::new(row.try_into().unwrap(), col.try_into().unwrap()),
                        c,
                    );
                }
            }
        }
        grid
    }

    #[test]
    fn test_no_common_letter_stays_blank() {
        // row C?T and column D?G share no letter that makes both words
        let mut grid = grid(&["#D#", "C.T", "#G#"]);
        let words = WordList::from_words(["CAT", "CUT", "DOG", "DIG"]);
        let report = fill_gaps(&mut grid, &words);
        assert_eq!(report.unresolved, [Position::new(1, 1)]);
        assert!(report.filled.is_empty());
        assert!(grid.is_blank(Position::new(1, 1)));

        let report = fill_gaps(&mut grid, &WordList::from_words(["CAT", "DOG", "RAT"]));
        assert_eq!(report.unresolved, [Position::new(1, 1)]);
    }

    #[test]
    fn test_first_letter_in_alphabet_wins() {
        let mut grid = grid(&["#D#", "C.T", "#G#"]);
        let words = WordList::from_words(["CAT", "COT", "CUT", "DOG", "DUG"]);
        let report = fill_gaps(&mut grid, &words);
        assert_eq!(report.filled, [(Position::new(1, 1), 'O')]);
        assert_eq!(grid.to_string(), "#D#\nCOT\n#G#");
    }

    #[test]
    fn test_crowded_lines_are_left_alone() {
        let mut grid = grid(&["#D#", "..T", "#G#"]);
        let words = WordList::from_words(["CAT", "DOG", "OT"]);
        let report = fill_gaps(&mut grid, &words);
        assert_eq!(report.crowded, [Position::new(1, 0), Position::new(1, 1)]);
        assert_eq!(report.remaining(), 2);
    }

    #[test]
    fn test_lines_skip_black_cells() {
        // the row reads A?E across the black cell in the middle
        let mut grid = grid(&["A#.E", "####", "####", "####"]);
        let words = WordList::from_words(["ACE", "C"]);
        let report = fill_gaps(&mut grid, &words);
        assert_eq!(report.filled, [(Position::new(0, 2), 'C')]);
    }

    #[test]
    fn test_full_grid_is_untouched() {
        let mut grid = grid(&["AB", "CD"]);
        let report = fill_gaps(&mut grid, &WordList::new());
        assert_eq!(report, GapFillReport::default());
    }
}
