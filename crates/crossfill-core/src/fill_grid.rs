//! The letter grid produced by filling a puzzle.

use std::fmt;

use crate::{Heading, Layout, Position};

/// An N×N grid of optional letters on top of a [`Layout`].
///
/// Black cells never hold a letter.
///
/// # Examples
///
/// ```
/// use crossfill_core::{FillGrid, Layout, Position};
///
/// let layout: Layout = "
///     ..
///     .#
/// "
/// .parse()?;
/// let mut grid = FillGrid::new(layout);
/// assert!(grid.set(Position::new(0, 0), 'c'));
/// assert!(!grid.set(Position::new(1, 1), 'X'));
/// assert_eq!(grid.get(Position::new(0, 0)), Some('C'));
/// assert_eq!(grid.to_string(), "C.\n.#");
/// # Ok::<(), crossfill_core::LayoutError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillGrid {
    layout: Layout,
    cells: Vec<Option<char>>,
}

impl FillGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        let cells = vec![None; layout.size() * layout.size()];
        Self { layout, cells }
    }

    /// Returns the underlying layout.
    #[must_use]
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the side length.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Returns the letter at `pos`.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<char> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Writes an uppercase letter into a white cell.
    ///
    /// Returns `false`, leaving the grid untouched, if `pos` is black or off the grid.
    pub fn set(&mut self, pos: Position, letter: char) -> bool {
        if self.layout.is_black(pos) {
            return false;
        }
        let Some(i) = self.index(pos) else {
            return false;
        };
        self.cells[i] = Some(letter.to_ascii_uppercase());
        true
    }

    /// Empties a cell.
    pub fn clear(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = None;
        }
    }

    /// Returns `true` if `pos` is a white cell without a letter.
    #[must_use]
    pub fn is_blank(&self, pos: Position) -> bool {
        self.layout.is_white(pos) && self.get(pos).is_none()
    }

    /// Returns every blank white cell in row-major order.
    #[must_use]
    pub fn blank_cells(&self) -> Vec<Position> {
        self.layout
            .positions()
            .filter(|&pos| self.is_blank(pos))
            .collect()
    }

    /// Returns the letters of the white cells on the line through `pos`, `None` for
    /// blanks.
    #[must_use]
    pub fn line(&self, pos: Position, heading: Heading) -> Vec<(Position, Option<char>)> {
        self.layout
            .line_through(pos, heading)
            .map(|p| (p, self.get(p)))
            .collect()
    }

    /// Returns the grid as rows of optional letters, black cells as `None`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Option<char>>> {
        self.cells
            .chunks(self.size())
            .map(<[Option<char>]>::to_vec)
            .collect()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.layout
            .contains(pos)
            .then(|| usize::from(pos.row()) * self.size() + usize::from(pos.col()))
    }
}

impl fmt::Display for FillGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.layout.positions().enumerate() {
            if i > 0 && pos.col() == 0 {
                writeln!(f)?;
            }
            match self.get(pos) {
                _ if self.layout.is_black(pos) => write!(f, "#")?,
                Some(letter) => write!(f, "{letter}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> FillGrid {
        FillGrid::new(".#.\n...\n.#.".parse().unwrap())
    }

    #[test]
    fn test_blank_cells_exclude_black_and_filled() {
        let mut grid = grid();
        assert_eq!(grid.blank_cells().len(), 7);
        grid.set(Position::new(1, 1), 'A');
        assert_eq!(grid.blank_cells().len(), 6);
        grid.clear(Position::new(1, 1));
        assert!(grid.is_blank(Position::new(1, 1)));
        assert!(!grid.is_blank(Position::new(0, 1)));
    }

    #[test]
    fn test_line_skips_black() {
        let mut grid = grid();
        grid.set(Position::new(2, 0), 'Z');
        let line = grid.line(Position::new(0, 0), Heading::Down);
        assert_eq!(
            line,
            vec![
                (Position::new(0, 0), None),
                (Position::new(1, 0), None),
                (Position::new(2, 0), Some('Z')),
            ]
        );
        assert_eq!(grid.line(Position::new(0, 2), Heading::Across).len(), 2);
    }

    #[test]
    fn test_to_rows() {
        let mut grid = grid();
        grid.set(Position::new(0, 0), 'q');
        let rows = grid.to_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Some('Q'), None, None]);
    }
}
