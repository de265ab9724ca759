//! JSONL readers for upstream artifacts.
//!
//! One JSON object per line; blank lines are ignored. A line that does not
//! deserialize aborts the read with its 1-based line number, since a truncated
//! input would otherwise yield a silently partial index.

use crate::model::descriptor::{AnalyzedFunction, CallEdge};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::info;

/// Parse JSONL from any buffered reader. `source` names the input in errors.
pub fn parse_jsonl<T, R>(reader: R, source: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read {source} line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(&line)
            .with_context(|| format!("parse {source} line {}", i + 1))?;
        out.push(item);
    }
    Ok(out)
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_jsonl(BufReader::new(f), &path.display().to_string())
}

/// Read analyzed-function descriptors.
pub fn read_functions(path: &Path) -> Result<Vec<AnalyzedFunction>> {
    let funcs: Vec<AnalyzedFunction> = read_jsonl(path)?;
    info!(count = funcs.len(), path = %path.display(), "jsonl: read function descriptors");
    Ok(funcs)
}

/// Read call edges in `{"from","to","attrs"}` form.
pub fn read_edges(path: &Path) -> Result<Vec<CallEdge>> {
    let edges: Vec<CallEdge> = read_jsonl(path)?;
    info!(count = edges.len(), path = %path.display(), "jsonl: read call edges");
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skips_blank_lines() {
        let text = "{\"from\":\"a.F\",\"to\":\"a.G\",\"attrs\":{\"tooltip\":\"f.go:1:2\"}}\n\n   \n{\"from\":\"a.G\",\"to\":\"a.H\"}\n";
        let edges: Vec<CallEdge> = parse_jsonl(Cursor::new(text), "edges").unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].site_annotation(), "f.go:1:2");
    }

    #[test]
    fn bad_line_reports_line_number() {
        let text = "{\"from\":\"a.F\",\"to\":\"a.G\"}\n{not json\n";
        let err = parse_jsonl::<CallEdge, _>(Cursor::new(text), "edges").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn reads_functions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funcs.jsonl");
        std::fs::write(
            &path,
            "{\"qualifiedName\":\"pkg.A\",\"name\":\"A\",\"results\":\"()\"}\n",
        )
        .unwrap();
        let funcs = read_functions(&path).unwrap();
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].qualified_name, "pkg.A");
        assert!(funcs[0].syntax.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_functions(&dir.path().join("absent.jsonl")).is_err());
    }
}
