//! Readers for the artifacts produced by the upstream analysis and
//! graph-generation stages.

pub mod dot;
pub mod jsonl;

use crate::model::descriptor::CallEdge;
use anyhow::Result;
use std::path::Path;

/// Read call edges, choosing the format by extension: `.dot`/`.gv` is parsed
/// as Graphviz, anything else as JSONL.
pub fn read_edges(path: &Path) -> Result<Vec<CallEdge>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("dot") || ext.eq_ignore_ascii_case("gv") => {
            dot::read_dot_edges(path)
        }
        _ => jsonl::read_edges(path),
    }
}
