//! Source locations of tokens, nodes and diagnostics

use std::fmt::{Display, Formatter};

/// Something that knows where in the source it came from.
///
/// Implemented by tokens and by every AST node.
pub trait Located {
    fn location(&self) -> Location;
}

/// A line-relative source range.
///
/// `start` and `end` are character offsets within `line`, `end` being exclusive. Lines are
/// 1-based, offsets are 0-based.
#[derive(Debug, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Location {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Location {
    /// Creates a new location
    pub const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// The number of characters covered by this location
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a location that covers both `self` and `other`.
    ///
    /// When the two locations are on different lines the result starts at the earlier location
    /// and ends where the later one ends.
    pub fn join(&self, other: Self) -> Self {
        let (first, last) = if (self.line, self.start) <= (other.line, other.start) {
            (*self, other)
        } else {
            (other, *self)
        };
        if first.line == last.line {
            Self::new(first.line, first.start, first.end.max(last.end))
        } else {
            Self::new(first.line, first.start, last.end)
        }
    }
}

impl Located for Location {
    fn location(&self) -> Location {
        *self
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}..{}", self.line, self.start, self.end)
    }
}
