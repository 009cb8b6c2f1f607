//! Grid coordinates and clue headings.

use std::fmt;

/// A cell coordinate on the grid, `(row, col)`, both zero based.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Heading, Position};
///
/// let pos = Position::new(1, 2);
/// assert_eq!(pos.step(Heading::Across, 2), Some(Position::new(1, 4)));
/// assert_eq!(pos.step(Heading::Down, 1), Some(Position::new(2, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the position `n` cells further along `heading`.
    ///
    /// Returns `None` if the coordinate would overflow.
    #[must_use]
    pub fn step(self, heading: Heading, n: usize) -> Option<Self> {
        let n = u8::try_from(n).ok()?;
        let (dr, dc) = heading.delta();
        Some(Self {
            row: self.row.checked_add(dr.checked_mul(n)?)?,
            col: self.col.checked_add(dc.checked_mul(n)?)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u8, u8)> for Position {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

/// The direction an answer is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum Heading {
    /// Left to right, step `(0, 1)`.
    Across,
    /// Top to bottom, step `(1, 0)`.
    Down,
}

impl Heading {
    /// Both headings, across first.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the `(row, col)` step taken between consecutive letters.
    #[must_use]
    #[inline]
    pub const fn delta(self) -> (u8, u8) {
        match self {
            Heading::Across => (0, 1),
            Heading::Down => (1, 0),
        }
    }

    /// Returns the single-letter prefix used in clue identifiers.
    #[must_use]
    #[inline]
    pub const fn prefix(self) -> char {
        match self {
            Heading::Across => 'A',
            Heading::Down => 'D',
        }
    }

    /// Returns the heading for a clue identifier prefix, ignoring case.
    #[must_use]
    pub fn from_prefix(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Heading::Across),
            'D' => Some(Heading::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heading::Across => f.write_str("across"),
            Heading::Down => f.write_str("down"),
        }
    }
}
