//! Clue identifiers and clue geometry.

use std::{fmt, str::FromStr};

use crate::{Heading, Position};

/// Identifies a clue by heading and 1-based ordinal, written `A1`, `D3`, ...
///
/// Identifiers order across clues before down clues, then by ordinal.
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Heading};
///
/// let id: ClueId = "D2".parse()?;
/// assert_eq!(id, ClueId::down(2));
/// assert_eq!(id.heading(), Heading::Down);
/// assert_eq!(id.to_string(), "D2");
/// assert!(ClueId::across(5) < ClueId::down(1));
/// # Ok::<(), crossfill_core::ClueIdError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClueId {
    heading: Heading,
    ordinal: u16,
}

impl ClueId {
    /// Creates a clue identifier.
    #[must_use]
    #[inline]
    pub const fn new(heading: Heading, ordinal: u16) -> Self {
        Self { heading, ordinal }
    }

    /// Shorthand for an across clue identifier.
    #[must_use]
    #[inline]
    pub const fn across(ordinal: u16) -> Self {
        Self::new(Heading::Across, ordinal)
    }

    /// Shorthand for a down clue identifier.
    #[must_use]
    #[inline]
    pub const fn down(ordinal: u16) -> Self {
        Self::new(Heading::Down, ordinal)
    }

    /// Returns the heading of the clue.
    #[must_use]
    #[inline]
    pub const fn heading(self) -> Heading {
        self.heading
    }

    /// Returns the ordinal of the clue within its heading.
    #[must_use]
    #[inline]
    pub const fn ordinal(self) -> u16 {
        self.ordinal
    }
}

impl fmt::Display for ClueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.heading.prefix(), self.ordinal)
    }
}

/// Errors returned when parsing a [`ClueId`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClueIdError {
    /// The identifier does not start with `A` or `D`.
    #[display("clue id `{_0}` must start with `A` or `D`")]
    InvalidHeading(#[error(not(source))] String),
    /// The ordinal part is missing, zero, or not a number.
    #[display("clue id `{_0}` must end with a positive ordinal")]
    InvalidOrdinal(#[error(not(source))] String),
}

impl FromStr for ClueId {
    type Err = ClueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let heading = chars
            .next()
            .and_then(Heading::from_prefix)
            .ok_or_else(|| ClueIdError::InvalidHeading(s.to_owned()))?;
        let ordinal = chars
            .as_str()
            .parse::<u16>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| ClueIdError::InvalidOrdinal(s.to_owned()))?;
        Ok(Self::new(heading, ordinal))
    }
}

/// Errors returned when constructing a [`Clue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClueError {
    /// The answer length is zero.
    #[display("clue {id} has zero length")]
    ZeroLength {
        /// The offending clue.
        id: ClueId,
    },
    /// Stepping from the start position overflows the coordinate space.
    #[display("clue {id} starting at {start} does not fit {length} letters")]
    PositionOverflow {
        /// The offending clue.
        id: ClueId,
        /// Start cell of the clue.
        start: Position,
        /// Requested answer length.
        length: usize,
    },
}

/// The fixed geometry and text of a single clue.
///
/// The heading is taken from the identifier, so an across identifier always
/// describes an across answer.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Clue, ClueId, Position};
///
/// let clue = Clue::new(ClueId::down(1), "Feline", Position::new(0, 1), 3)?;
/// assert_eq!(
///     clue.letter_positions(),
///     &[Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)]
/// );
/// assert_eq!(clue.letter_index(Position::new(2, 1)), Some(2));
/// # Ok::<(), crossfill_core::ClueError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    id: ClueId,
    text: String,
    start: Position,
    length: usize,
    letter_positions: Vec<Position>,
}

impl Clue {
    /// Creates a clue and derives its letter positions.
    ///
    /// # Errors
    ///
    /// Returns [`ClueError::ZeroLength`] if `length` is zero, or
    /// [`ClueError::PositionOverflow`] if a letter position cannot be represented.
    pub fn new(
        id: ClueId,
        text: impl Into<String>,
        start: Position,
        length: usize,
    ) -> Result<Self, ClueError> {
        if length == 0 {
            return Err(ClueError::ZeroLength { id });
        }
        let letter_positions = (0..length)
            .map(|i| start.step(id.heading(), i))
            .collect::<Option<Vec<_>>>()
            .ok_or(ClueError::PositionOverflow { id, start, length })?;
        Ok(Self {
            id,
            text: text.into(),
            start,
            length,
            letter_positions,
        })
    }

    /// Returns the identifier.
    #[must_use]
    #[inline]
    pub fn id(&self) -> ClueId {
        self.id
    }

    /// Returns the clue text.
    #[must_use]
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the first cell of the answer.
    #[must_use]
    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Returns the answer direction.
    #[must_use]
    #[inline]
    pub fn heading(&self) -> Heading {
        self.id.heading()
    }

    /// Returns the required answer length.
    #[must_use]
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the cells of the answer, in letter order.
    #[must_use]
    #[inline]
    pub fn letter_positions(&self) -> &[Position] {
        &self.letter_positions
    }

    /// Returns the letter index of `pos` within the answer, if the answer covers it.
    #[must_use]
    pub fn letter_index(&self, pos: Position) -> Option<usize> {
        self.letter_positions.iter().position(|&p| p == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clue_id() {
        assert_eq!("A1".parse(), Ok(ClueId::across(1)));
        assert_eq!(" d12 ".parse(), Ok(ClueId::down(12)));
        assert!(matches!(
            "X1".parse::<ClueId>(),
            Err(ClueIdError::InvalidHeading(_))
        ));
        assert!(matches!(
            "A0".parse::<ClueId>(),
            Err(ClueIdError::InvalidOrdinal(_))
        ));
        assert!(matches!(
            "A".parse::<ClueId>(),
            Err(ClueIdError::InvalidOrdinal(_))
        ));
        assert!(matches!(
            "".parse::<ClueId>(),
            Err(ClueIdError::InvalidHeading(_))
        ));
    }

    #[test]
    fn test_clue_id_order() {
        let mut ids = vec![ClueId::down(1), ClueId::across(2), ClueId::across(1)];
        ids.sort();
        assert_eq!(
            ids,
            vec![ClueId::across(1), ClueId::across(2), ClueId::down(1)]
        );
    }

    #[test]
    fn test_across_letter_positions() {
        let clue = Clue::new(ClueId::across(2), "", Position::new(1, 0), 4).unwrap();
        assert_eq!(clue.heading(), Heading::Across);
        assert_eq!(clue.letter_positions().len(), 4);
        assert_eq!(clue.letter_positions()[3], Position::new(1, 3));
        assert_eq!(clue.letter_index(Position::new(2, 0)), None);
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = Clue::new(ClueId::across(1), "", Position::new(0, 0), 0).unwrap_err();
        assert_eq!(
            err,
            ClueError::ZeroLength {
                id: ClueId::across(1)
            }
        );
    }

    #[test]
    fn test_overflow_rejected() {
        let err = Clue::new(ClueId::down(1), "", Position::new(254, 0), 5).unwrap_err();
        assert!(matches!(err, ClueError::PositionOverflow { .. }));
    }
}
