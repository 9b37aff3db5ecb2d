//! Source locations and line maps.
//!
//! Tokens, AST nodes, and diagnostics all point back into the source buffer
//! through these types.

use std::fmt;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A byte offset with its 1-based row and column.
///
/// Locations are plain values. `SourceLocation::INVALID` marks nodes the
/// parser synthesizes without a source counterpart.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    pub index: TextPos,
    pub row: u32,
    pub column: u32,
}

impl SourceLocation {
    pub const INVALID: SourceLocation = SourceLocation {
        index: u32::MAX,
        row: 0,
        column: 0,
    };

    #[inline]
    pub const fn new(index: TextPos, row: u32, column: u32) -> Self {
        Self { index, row, column }
    }

    /// The location of the first character of a buffer.
    #[inline]
    pub const fn start() -> Self {
        Self::new(0, 1, 1)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.index != u32::MAX
    }

    /// The location `offset` bytes further along the same line.
    pub fn adding(&self, offset: u32) -> Self {
        if !self.is_valid() {
            return *self;
        }
        Self::new(self.index + offset, self.row, self.column + offset)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}:{}@{}", self.row, self.column, self.index)
        } else {
            write!(f, "<invalid>")
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}:{}", self.row, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}

/// A map from byte offsets to rows, built while tokenizing.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map by scanning source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Build a line map from offsets collected elsewhere. `0` is implied.
    pub fn from_line_starts(mut line_starts: Vec<TextPos>) -> Self {
        if line_starts.first() != Some(&0) {
            line_starts.insert(0, 0);
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the 1-based location for a byte offset.
    pub fn location_of(&self, pos: TextPos) -> SourceLocation {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        SourceLocation::new(pos, line + 1, pos - line_start + 1)
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get all line starts.
    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_location() {
        let loc = SourceLocation::INVALID;
        assert!(!loc.is_valid());
        assert_eq!(loc.adding(3), loc);
        assert!(SourceLocation::start().is_valid());
    }

    #[test]
    fn test_location_adding() {
        let loc = SourceLocation::new(10, 2, 4);
        assert_eq!(loc.adding(2), SourceLocation::new(12, 2, 6));
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0); // newline char
        assert_eq!(map.line_of(6), 1); // start of line2
        assert_eq!(map.line_of(12), 2);

        let loc = map.location_of(8);
        assert_eq!(loc.row, 2);
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_line_map_from_starts() {
        let map = LineMap::from_line_starts(vec![4, 9]);
        assert_eq!(map.line_starts(), &[0, 4, 9]);
        assert_eq!(map.line_of(5), 1);
    }
}
