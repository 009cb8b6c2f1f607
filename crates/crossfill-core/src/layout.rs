//! Black/white cell layout of a square grid.

use std::{fmt, str::FromStr};

use crate::{ClueId, Heading, Position};

/// Largest supported grid side length.
pub const MAX_SIZE: usize = 32;

/// Errors returned when building a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LayoutError {
    /// No rows were given.
    #[display("layout has no rows")]
    Empty,
    /// The side length exceeds [`MAX_SIZE`].
    #[display("layout size {size} exceeds the maximum of {MAX_SIZE}")]
    TooLarge {
        /// Requested side length.
        size: usize,
    },
    /// A row's length differs from the number of rows.
    #[display("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Zero-based row index.
        row: usize,
        /// Number of cells in the row.
        len: usize,
        /// Expected number of cells.
        expected: usize,
    },
    /// A cell character is neither `#`, `.`, `_` nor a letter.
    #[display("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidCell {
        /// The offending character.
        ch: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },
}

/// Immutable fill-state of an N×N grid.
///
/// # Text format
///
/// One row per line, surrounding whitespace ignored, blank lines skipped:
/// - `#` is a black cell
/// - `.`, `_` or any ASCII letter is a white cell
///
/// # Examples
///
/// ```
/// use crossfill_core::{Layout, Position};
///
/// let layout: Layout = "
///     #...
///     ....
///     ....
///     ...#
/// "
/// .parse()?;
/// assert_eq!(layout.size(), 4);
/// assert!(layout.is_black(Position::new(0, 0)));
/// assert!(layout.is_white(Position::new(0, 1)));
/// # Ok::<(), crossfill_core::LayoutError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    size: usize,
    black: Vec<bool>,
}

/// Geometry of a clue derived from a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueSlot {
    /// Identifier assigned by numbering order.
    pub id: ClueId,
    /// First cell of the answer.
    pub start: Position,
    /// Number of letters.
    pub length: usize,
}

impl Layout {
    /// Creates an all-white layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if `size` is zero or exceeds [`MAX_SIZE`].
    pub fn new(size: usize) -> Result<Self, LayoutError> {
        if size == 0 {
            return Err(LayoutError::Empty);
        }
        if size > MAX_SIZE {
            return Err(LayoutError::TooLarge { size });
        }
        Ok(Self {
            size,
            black: vec![false; size * size],
        })
    }

    /// Creates a layout from a row-major fill-state matrix (`true` = black).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the matrix is empty, too large or not square.
    pub fn from_matrix<R>(rows: &[R]) -> Result<Self, LayoutError>
    where
        R: AsRef<[bool]>,
    {
        let mut layout = Self::new(rows.len())?;
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != layout.size {
                return Err(LayoutError::NotSquare {
                    row,
                    len: cells.len(),
                    expected: layout.size,
                });
            }
            layout.black[row * layout.size..(row + 1) * layout.size].copy_from_slice(cells);
        }
        Ok(layout)
    }

    /// Returns the side length.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `pos` lies on the grid.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        usize::from(pos.row()) < self.size && usize::from(pos.col()) < self.size
    }

    /// Returns `true` if `pos` is a black cell.
    ///
    /// Positions outside the grid are reported as black.
    #[must_use]
    #[inline]
    pub fn is_black(&self, pos: Position) -> bool {
        self.index(pos).is_none_or(|i| self.black[i])
    }

    /// Returns `true` if `pos` is a white (fillable) cell.
    #[must_use]
    #[inline]
    pub fn is_white(&self, pos: Position) -> bool {
        !self.is_black(pos)
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size_u8();
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Iterates over the white positions of the line through `pos` along `heading`,
    /// from the edge of the grid to the opposite edge.
    pub fn line_through(
        &self,
        pos: Position,
        heading: Heading,
    ) -> impl Iterator<Item = Position> + '_ {
        let size = self.size_u8();
        (0..size)
            .map(move |i| match heading {
                Heading::Across => Position::new(pos.row(), i),
                Heading::Down => Position::new(i, pos.col()),
            })
            .filter(|&p| self.is_white(p))
    }

    /// Derives numbered clue slots from the fill-state.
    ///
    /// A slot is a run of at least two white cells bounded by black cells or the grid
    /// edge. Across slots are numbered `A1, A2, ...` and down slots `D1, D2, ...`, each
    /// in row-major order of their start cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossfill_core::{ClueId, Layout, Position};
    ///
    /// let layout: Layout = "##.\n...\n...".parse()?;
    /// let slots = layout.slots();
    /// assert_eq!(slots[0].id, ClueId::across(1));
    /// assert_eq!(slots[0].start, Position::new(1, 0));
    /// let d1 = slots.iter().find(|s| s.id == ClueId::down(1)).unwrap();
    /// assert_eq!((d1.start, d1.length), (Position::new(0, 2), 3));
    /// let d2 = slots.iter().find(|s| s.id == ClueId::down(2)).unwrap();
    /// assert_eq!((d2.start, d2.length), (Position::new(1, 0), 2));
    /// # Ok::<(), crossfill_core::LayoutError>(())
    /// ```
    #[must_use]
    pub fn slots(&self) -> Vec<ClueSlot> {
        let mut slots = Vec::new();
        for heading in Heading::ALL {
            let mut ordinal = 0u16;
            for start in self.positions() {
                if self.is_black(start) || self.has_white_before(start, heading) {
                    continue;
                }
                let length = (0..self.size)
                    .map_while(|i| start.step(heading, i).filter(|&p| self.is_white(p)))
                    .count();
                if length < 2 {
                    continue;
                }
                ordinal += 1;
                slots.push(ClueSlot {
                    id: ClueId::new(heading, ordinal),
                    start,
                    length,
                });
            }
        }
        slots
    }

    fn has_white_before(&self, pos: Position, heading: Heading) -> bool {
        let prev = match heading {
            Heading::Across => pos.col().checked_sub(1).map(|c| Position::new(pos.row(), c)),
            Heading::Down => pos.row().checked_sub(1).map(|r| Position::new(r, pos.col())),
        };
        prev.is_some_and(|p| self.is_white(p))
    }

    #[expect(clippy::cast_possible_truncation)]
    fn size_u8(&self) -> u8 {
        debug_assert!(self.size <= MAX_SIZE);
        self.size as u8
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| usize::from(pos.row()) * self.size + usize::from(pos.col()))
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        '#' => Ok(true),
                        '.' | '_' => Ok(false),
                        c if c.is_ascii_alphabetic() => Ok(false),
                        ch => Err(LayoutError::InvalidCell { ch, row, col }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_matrix(&rows)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.positions().enumerate() {
            if i > 0 && pos.col() == 0 {
                writeln!(f)?;
            }
            f.write_str(if self.is_black(pos) { "#" } else { "." })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    const MINI: &str = "
        #....
        .....
        .....
        .....
        ....#
    ";

    #[test]
    fn test_parse_and_display() {
        let layout: Layout = MINI.parse().unwrap();
        assert_eq!(layout.size(), 5);
        assert_eq!(
            layout.to_string(),
            "#....\n.....\n.....\n.....\n....#"
        );
    }

    #[test]
    fn test_slot_numbering_at_max_size() {
        let pattern = "..#".repeat(11);
        let row = &pattern[..MAX_SIZE];
        let layout: Layout = vec![row; MAX_SIZE].join("\n").parse().unwrap();
        let slots = layout.slots();

        let across = slots
            .iter()
            .filter(|s| s.id.heading() == Heading::Across)
            .collect::<Vec<_>>();
        assert_eq!(across.len(), 11 * MAX_SIZE);
        assert_eq!(across.last().unwrap().id, ClueId::across(352));
        assert_eq!(slots.len(), 352 + 22);

        let mut ids = slots.iter().map(|s| s.id).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), slots.len());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Layout>(), Err(LayoutError::Empty));
        assert_eq!(
            "..\n...".parse::<Layout>(),
            Err(LayoutError::NotSquare {
                row: 1,
                len: 3,
                expected: 2
            })
        );
        assert_eq!(
            ".?\n..".parse::<Layout>(),
            Err(LayoutError::InvalidCell {
                ch: '?',
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn test_out_of_bounds_is_black() {
        let layout = Layout::new(3).unwrap();
        assert!(layout.is_black(Position::new(3, 0)));
        assert!(layout.is_white(Position::new(2, 2)));
    }

    #[test]
    fn test_slots_of_mini() {
        let layout: Layout = MINI.parse().unwrap();
        let slots = layout.slots();
        let across = slots
            .iter()
            .filter(|s| s.id.heading() == Heading::Across)
            .map(|s| (s.start, s.length))
            .collect::<Vec<_>>();
        assert_eq!(
            across,
            vec![
                (Position::new(0, 1), 4),
                (Position::new(1, 0), 5),
                (Position::new(2, 0), 5),
                (Position::new(3, 0), 5),
                (Position::new(4, 0), 4),
            ]
        );
        let down = slots
            .iter()
            .filter(|s| s.id.heading() == Heading::Down)
            .map(|s| (s.id, s.start, s.length))
            .collect::<Vec<_>>();
        assert_eq!(down.len(), 5);
        assert_eq!(down[0], (ClueId::down(1), Position::new(0, 1), 5));
        assert_eq!(down[4], (ClueId::down(5), Position::new(1, 0), 4));
    }

    #[test]
    fn test_single_cells_are_not_slots() {
        let layout: Layout = "
            .#.
            ###
            .#.
        "
        .parse()
        .unwrap();
        assert!(layout.slots().is_empty());
    }

    #[test]
    fn test_line_through_skips_black() {
        let layout: Layout = MINI.parse().unwrap();
        let row = layout
            .line_through(Position::new(0, 3), Heading::Across)
            .collect::<Vec<_>>();
        assert_eq!(row.len(), 4);
        assert_eq!(row[0], Position::new(0, 1));
        let col = layout
            .line_through(Position::new(2, 4), Heading::Down)
            .collect::<Vec<_>>();
        assert_eq!(col.len(), 4);
    }

    fn black_cells() -> impl Strategy<Value = Vec<Vec<bool>>> {
        (1usize..=6).prop_flat_map(|size| {
            prop::collection::vec(prop::collection::vec(prop::bool::weighted(0.25), size), size)
        })
    }

    proptest! {
        #[test]
        fn prop_slots_cover_white_runs(black in black_cells()) {
            let layout = Layout::from_matrix(&black).unwrap();
            let slots = layout.slots();

            let mut covered = BTreeMap::new();
            for slot in &slots {
                prop_assert!(slot.length >= 2);
                for i in 0..slot.length {
                    let pos = slot.start.step(slot.id.heading(), i).unwrap();
                    prop_assert!(layout.is_white(pos));
                    let previous = covered.insert((pos, slot.id.heading()), slot.id);
                    prop_assert_eq!(previous, None, "cell {} in two slots", pos);
                }
            }
            // a white cell with a white neighbour along a heading lies in a slot of
            // that heading
            for pos in layout.positions().filter(|&p| layout.is_white(p)) {
                for heading in Heading::ALL {
                    let next = pos.step(heading, 1).filter(|&p| layout.is_white(p));
                    if next.is_some() {
                        prop_assert!(covered.contains_key(&(pos, heading)));
                    }
                }
            }
        }
    }
}
