//! Phase 2: apply call-graph edges to the records built in phase 1.
//!
//! Each edge appends its callee to the caller's `calls` and a point-range
//! entry to `callPositions`, in edge input order. Callees need not exist in
//! the index; callers must, unless the placeholder policy is active.

use crate::config::model::MissingCallerPolicy;
use crate::errors::CallSiteError;
use crate::model::{
    descriptor::CallEdge,
    record::FunctionRecord,
    span::{Point, SourceRange},
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

const SITE_DELIMITER: char = ':';
const ROW_FIELD: usize = 1;
const COL_FIELD: usize = 2;

/// Call-site row/column parsed from an edge annotation such as `file.go:12:4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSite {
    pub row: u32,
    pub col: u32,
}

impl CallSite {
    /// Split on `:` and read fields 1 and 2 as row and column.
    pub fn parse(annotation: &str) -> Result<Self, CallSiteError> {
        let fields: Vec<&str> = annotation.split(SITE_DELIMITER).collect();
        Ok(Self {
            row: numeric_field(annotation, &fields, ROW_FIELD)?,
            col: numeric_field(annotation, &fields, COL_FIELD)?,
        })
    }

    /// Degenerate range at the call site.
    pub fn range(&self) -> SourceRange {
        SourceRange::point(Point::new(self.row, self.col))
    }
}

fn numeric_field(raw: &str, fields: &[&str], index: usize) -> Result<u32, CallSiteError> {
    let field = fields.get(index).ok_or_else(|| CallSiteError::MissingField {
        raw: raw.to_string(),
        index,
    })?;
    field.trim().parse().map_err(|_| CallSiteError::NotANumber {
        raw: raw.to_string(),
        index,
        field: field.to_string(),
    })
}

/// Counters for one phase-2 pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotateReport {
    pub seen: usize,
    pub applied: usize,
    /// Edges whose caller had no record when the edge was processed.
    pub missing_caller: usize,
    pub placeholders_created: usize,
    /// Edges applied with a `(0, 0)` position because the annotation was bad.
    pub malformed_sites: usize,
    pub unresolved_callees: usize,
}

/// Apply `edges` to `records` in order. Only [`FunctionIndex::annotate`]
/// calls this, so the record set is always complete beforehand.
///
/// [`FunctionIndex::annotate`]: crate::model::index::FunctionIndex::annotate
pub(crate) fn annotate_calls<'a, I>(
    records: &mut BTreeMap<String, FunctionRecord>,
    edges: I,
    missing_caller: MissingCallerPolicy,
) -> AnnotateReport
where
    I: IntoIterator<Item = &'a CallEdge>,
{
    let mut report = AnnotateReport::default();

    for edge in edges {
        report.seen += 1;

        let site = match CallSite::parse(edge.site_annotation()) {
            Ok(site) => site,
            Err(err) => {
                warn!(caller = %edge.from, callee = %edge.to, error = %err, "bad call site; using 0:0");
                report.malformed_sites += 1;
                CallSite::default()
            }
        };

        // Checked before any placeholder insert.
        let callee_known = records.contains_key(&edge.to);

        if !records.contains_key(&edge.from) {
            report.missing_caller += 1;
            match missing_caller {
                MissingCallerPolicy::Skip => {
                    warn!(caller = %edge.from, callee = %edge.to, "caller not in index; edge skipped");
                    continue;
                }
                MissingCallerPolicy::Placeholder => {
                    debug!(caller = %edge.from, "creating placeholder record");
                    records.insert(edge.from.clone(), FunctionRecord::placeholder(&edge.from));
                    report.placeholders_created += 1;
                }
            }
        }

        let Some(caller) = records.get_mut(&edge.from) else {
            continue;
        };
        caller.push_call(&edge.to, site.range());
        report.applied += 1;

        if !callee_known {
            debug!(caller = %edge.from, callee = %edge.to, "callee not in index");
            report.unresolved_callees += 1;
        }
    }

    info!(
        edges = report.seen,
        applied = report.applied,
        missing_caller = report.missing_caller,
        placeholders = report.placeholders_created,
        malformed_sites = report.malformed_sites,
        unresolved_callees = report.unresolved_callees,
        "call edges applied"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::index::FunctionIndex;

    fn index_of(keys: &[&str]) -> FunctionIndex {
        let mut idx = FunctionIndex::new();
        for k in keys {
            idx.insert(FunctionRecord::placeholder(k));
        }
        idx
    }

    #[test]
    fn parses_call_site_fields() {
        assert_eq!(CallSite::parse("x:12:4").unwrap(), CallSite { row: 12, col: 4 });
        assert_eq!(
            CallSite::parse("/src/pkg/a.go:7:15:extra").unwrap(),
            CallSite { row: 7, col: 15 }
        );
    }

    #[test]
    fn rejects_malformed_call_sites() {
        assert!(matches!(
            CallSite::parse("x:12"),
            Err(CallSiteError::MissingField { index: 2, .. })
        ));
        assert!(matches!(
            CallSite::parse(""),
            Err(CallSiteError::MissingField { index: 1, .. })
        ));
        assert!(matches!(
            CallSite::parse("x:twelve:4"),
            Err(CallSiteError::NotANumber { index: 1, .. })
        ));
        assert!(CallSite::parse("x:-1:4").is_err());
    }

    #[test]
    fn call_position_is_point_range() {
        let idx = index_of(&["pkg.A", "pkg.B"]);
        let edges = [CallEdge::new("pkg.A", "pkg.B", "x:12:4")];
        let (out, _) = idx.annotate(&edges, MissingCallerPolicy::Skip);
        let pos = &out.get("pkg.A").unwrap().call_positions[0];
        assert_eq!(<[u32; 4]>::from(pos.range), [12, 4, 12, 4]);
        assert_eq!(pos.callee_id, "pkg.B");
    }

    #[test]
    fn appends_in_edge_order_and_keeps_duplicates() {
        let idx = index_of(&["pkg.A", "pkg.B", "pkg.C"]);
        let edges = [
            CallEdge::new("pkg.A", "pkg.C", "a.go:3:1"),
            CallEdge::new("pkg.A", "pkg.B", "a.go:4:1"),
            CallEdge::new("pkg.A", "pkg.C", "a.go:5:1"),
        ];
        let (out, report) = idx.annotate(&edges, MissingCallerPolicy::Skip);
        let a = out.get("pkg.A").unwrap();
        assert_eq!(a.calls, ["pkg.C", "pkg.B", "pkg.C"]);
        let rows: Vec<u32> = a.call_positions.iter().map(|p| p.range.start_line).collect();
        assert_eq!(rows, [3, 4, 5]);
        assert_eq!(report.applied, 3);
        assert_eq!(out.call_count(), 3);
    }

    #[test]
    fn empty_index_with_skip_policy_stays_empty() {
        let edges = [CallEdge::new("pkg.A", "pkg.B", "x:1:1")];
        let (out, report) = FunctionIndex::new().annotate(&edges, MissingCallerPolicy::Skip);
        assert!(out.is_empty());
        assert_eq!(report.missing_caller, 1);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn empty_index_with_placeholder_policy_creates_caller() {
        let edges = [
            CallEdge::new("pkg.A", "pkg.B", "x:1:1"),
            CallEdge::new("pkg.A", "pkg.C", "x:2:1"),
        ];
        let (out, report) = FunctionIndex::new().annotate(&edges, MissingCallerPolicy::Placeholder);
        assert_eq!(out.len(), 1);
        let a = out.get("pkg.A").unwrap();
        assert_eq!(a.name, "A");
        assert_eq!(a.file_id, "");
        assert_eq!(a.calls, ["pkg.B", "pkg.C"]);
        assert_eq!(report.placeholders_created, 1);
        assert_eq!(report.missing_caller, 1);
        assert_eq!(report.unresolved_callees, 2);
    }

    #[test]
    fn malformed_site_still_applies_edge_at_zero() {
        let idx = index_of(&["pkg.A"]);
        let edges = [CallEdge::new("pkg.A", "fmt.Println", "no position")];
        let (out, report) = idx.annotate(&edges, MissingCallerPolicy::Skip);
        let a = out.get("pkg.A").unwrap();
        assert_eq!(a.calls, ["fmt.Println"]);
        assert_eq!(<[u32; 4]>::from(a.call_positions[0].range), [0, 0, 0, 0]);
        assert_eq!(report.malformed_sites, 1);
        assert_eq!(report.unresolved_callees, 1);
    }
}
