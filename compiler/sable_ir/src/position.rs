//! Source locations.

use std::fmt;

use crate::Name;

/// A source location: file, 1-based line, 1-based column.
///
/// The file name is interned so positions stay `Copy`; render through a
/// [`StringLookup`](crate::StringLookup) implementor to recover the path.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    /// Interned file name.
    pub file: Name,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(file: Name, line: u32, column: u32) -> Self {
        Position { file, line, column }
    }

    /// Position for synthesized nodes with no source location.
    pub const BUILTIN: Position = Position {
        file: Name::EMPTY,
        line: 0,
        column: 0,
    };
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.raw(), self.line, self.column)
    }
}
