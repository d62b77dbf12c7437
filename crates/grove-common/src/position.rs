//! Line/column positions for byte offsets.

use serde::Serialize;

/// A zero-based line/character position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Precomputed line start offsets for a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    #[must_use]
    pub fn build(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a line/character position.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let start = self.line_starts.get(line).copied().unwrap_or(0);
        Position::new(
            u32::try_from(line).unwrap_or(u32::MAX),
            offset.saturating_sub(start),
        )
    }

    /// Byte offset where `line` starts, if the line exists.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_offsets_across_lines() {
        let map = LineMap::build("ab\ncd\n\nx");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.offset_to_position(0), Position::new(0, 0));
        assert_eq!(map.offset_to_position(1), Position::new(0, 1));
        assert_eq!(map.offset_to_position(3), Position::new(1, 0));
        assert_eq!(map.offset_to_position(6), Position::new(2, 0));
        assert_eq!(map.offset_to_position(7), Position::new(3, 0));
    }
}
