//! Edge reader for Graphviz DOT call graphs.
//!
//! Only single-line edge statements are recognized:
//!
//! ```text
//! "pkg.A" -> "pkg.B" [ tooltip="pkg/a.go:5:2" color="red" ];
//! ```
//!
//! Graph/node/subgraph statements, comments and attributes other than the
//! ones carried on edges are ignored. Quoted IDs may contain escaped quotes.
//! A line that holds `->` but is not a single edge statement (several edges
//! on one line, edge chains, attribute lists split across lines) is skipped
//! with a warning.

use crate::model::descriptor::CallEdge;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

const ID: &str = r#"(?:"(?:[^"\\]|\\.)*"|[A-Za-z0-9_.$/*()]+)"#;

/// Compiled DOT patterns, built once per read.
struct DotPatterns {
    edge: Regex,
    attr: Regex,
}

impl DotPatterns {
    fn new() -> Result<Self> {
        let edge = Regex::new(&format!(
            r#"^\s*({ID})\s*->\s*({ID})\s*(?:\[(.*)\])?\s*;?\s*$"#
        ))
        .context("compile DOT edge pattern")?;
        let attr = Regex::new(r#"([A-Za-z_][\w]*)\s*=\s*("(?:[^"\\]|\\.)*"|[^,;\s\]]+)"#)
            .context("compile DOT attribute pattern")?;
        Ok(Self { edge, attr })
    }
}

/// Edges found in DOT source plus the edge-like lines that were skipped.
#[derive(Debug, Default)]
struct DotScan {
    edges: Vec<CallEdge>,
    unrecognized: usize,
}

/// Extract every edge statement from DOT source, in file order.
pub fn parse_dot_edges(text: &str) -> Result<Vec<CallEdge>> {
    Ok(scan_dot(text)?.edges)
}

fn scan_dot(text: &str) -> Result<DotScan> {
    let pats = DotPatterns::new()?;
    let mut scan = DotScan::default();

    for (i, line) in text.lines().enumerate() {
        let Some(cap) = pats.edge.captures(line) else {
            if line.contains("->") {
                warn!(line = i + 1, text = %line.trim(), "dot: unrecognized edge statement; skipped");
                scan.unrecognized += 1;
            }
            continue;
        };
        let (Some(from), Some(to)) = (cap.get(1), cap.get(2)) else {
            continue;
        };

        let mut attrs = BTreeMap::new();
        if let Some(list) = cap.get(3) {
            for a in pats.attr.captures_iter(list.as_str()) {
                if let (Some(k), Some(v)) = (a.get(1), a.get(2)) {
                    attrs.insert(k.as_str().to_string(), unquote(v.as_str()));
                }
            }
        }

        let edge = CallEdge {
            from: unquote(from.as_str()),
            to: unquote(to.as_str()),
            attrs,
        };
        debug!(line = i + 1, from = %edge.from, to = %edge.to, "dot: edge");
        scan.edges.push(edge);
    }

    Ok(scan)
}

/// Read and parse a DOT file.
pub fn read_dot_edges(path: &Path) -> Result<Vec<CallEdge>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let scan = scan_dot(&text)?;
    info!(
        count = scan.edges.len(),
        unrecognized = scan.unrecognized,
        path = %path.display(),
        "dot: read call edges"
    );
    Ok(scan.edges)
}

/// Strip surrounding quotes and resolve `\"` / `\\` escapes.
fn unquote(s: &str) -> String {
    let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return s.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(n @ ('"' | '\\')) => out.push(n),
                Some(n) => {
                    out.push('\\');
                    out.push(n);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
