//! Source location model.
//!
//! Lines and columns are 1-based, as reported by the analysis pass. A range
//! serializes as a flat `[start_line, start_col, end_line, end_col]` array.

use serde::{Deserialize, Serialize};

/// A single line/column point in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: u32,
    pub column: u32,
}

impl Point {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct SourceRange {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl SourceRange {
    /// Build a range from its start and end points.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start_line: start.line,
            start_col: start.column,
            end_line: end.line,
            end_col: end.column,
        }
    }

    /// Degenerate range: start and end are the same point.
    pub fn point(at: Point) -> Self {
        Self::new(at, at)
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_line, self.start_col)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_line, self.end_col)
    }

    /// True when start equals end.
    pub fn is_point(&self) -> bool {
        self.start() == self.end()
    }
}

impl From<[u32; 4]> for SourceRange {
    fn from(v: [u32; 4]) -> Self {
        Self {
            start_line: v[0],
            start_col: v[1],
            end_line: v[2],
            end_col: v[3],
        }
    }
}

impl From<SourceRange> for [u32; 4] {
    fn from(r: SourceRange) -> Self {
        [r.start_line, r.start_col, r.end_line, r.end_col]
    }
}
