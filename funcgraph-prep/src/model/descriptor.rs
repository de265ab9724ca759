//! Input facts produced by the upstream analysis and graph-generation stages.
//!
//! These types mirror what the external collaborators emit; nothing here is
//! normalized yet. See [`crate::graph::builder`] and [`crate::graph::calls`]
//! for the conversion into index records.

use crate::model::span::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared position of a function: file plus line/column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Absolute source path; empty when the function has no position at all.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Position {
    pub fn point(&self) -> Point {
        Point::new(self.line, self.column)
    }
}

/// Start/end of the function's syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxExtent {
    pub start: Point,
    pub end: Point,
}

/// One parameter as rendered by the analysis pass.
///
/// Usually the textual form `parameter <name> : <type>`; some producers emit
/// the structured form directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamDescriptor {
    Text(String),
    Structured {
        name: String,
        #[serde(rename = "type")]
        ty: String,
    },
}

/// One analyzed function (or method, closure, wrapper).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFunction {
    /// Fully-qualified name; the index key.
    pub qualified_name: String,
    /// Simple display name.
    pub name: String,
    #[serde(default)]
    pub pos: Position,
    /// Absent for functions without hand-written syntax.
    #[serde(default)]
    pub syntax: Option<SyntaxExtent>,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    /// Result tuple rendering, e.g. `(int, error)`.
    #[serde(default)]
    pub results: String,
    /// Synthetic marker; empty for source-defined functions, otherwise the
    /// reason the function was generated (e.g. `wrapper for func(...)`).
    #[serde(default)]
    pub synthetic: String,
}

impl AnalyzedFunction {
    pub fn is_synthetic(&self) -> bool {
        !self.synthetic.is_empty()
    }
}

/// A call-graph edge as rendered by the graph-generation stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    /// Caller qualified name.
    pub from: String,
    /// Callee qualified name.
    pub to: String,
    /// Free-form attributes; the call site lives in `tooltip`.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl CallEdge {
    pub const SITE_ATTR: &'static str = "tooltip";

    pub fn new(from: impl Into<String>, to: impl Into<String>, site: impl Into<String>) -> Self {
        let mut attrs = BTreeMap::new();
        attrs.insert(Self::SITE_ATTR.to_string(), site.into());
        Self {
            from: from.into(),
            to: to.into(),
            attrs,
        }
    }

    /// The call-site annotation, empty when the edge carries none.
    pub fn site_annotation(&self) -> &str {
        self.attrs.get(Self::SITE_ATTR).map(String::as_str).unwrap_or("")
    }
}
