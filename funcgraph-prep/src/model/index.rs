//! The function index in its two phases.
//!
//! [`FunctionIndex`] is what phase 1 produces: one record per qualified name,
//! no call data. Consuming it with [`FunctionIndex::annotate`] yields an
//! [`AnnotatedIndex`], the only form the exporter accepts. Edges therefore
//! cannot be applied before the record set is complete.
//!
//! Both use a `BTreeMap` so iteration and serialization order is the byte-wise
//! order of qualified names, independent of insertion order.

use crate::config::model::MissingCallerPolicy;
use crate::graph::calls::{AnnotateReport, annotate_calls};
use crate::model::{descriptor::CallEdge, record::FunctionRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Phase-1 index: function records keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct FunctionIndex {
    records: BTreeMap<String, FunctionRecord>,
}

impl FunctionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keyed by `record.qualified_name`. Last write wins; the replaced
    /// record, if any, is returned.
    pub fn insert(&mut self, record: FunctionRecord) -> Option<FunctionRecord> {
        self.records.insert(record.qualified_name.clone(), record)
    }

    pub fn get(&self, qualified_name: &str) -> Option<&FunctionRecord> {
        self.records.get(qualified_name)
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.records.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FunctionRecord)> {
        self.records.iter()
    }

    /// Run phase 2 over `edges` (in the given order) and seal the index.
    pub fn annotate<'a, I>(
        self,
        edges: I,
        missing_caller: MissingCallerPolicy,
    ) -> (AnnotatedIndex, AnnotateReport)
    where
        I: IntoIterator<Item = &'a CallEdge>,
    {
        let mut records = self.records;
        let report = annotate_calls(&mut records, edges, missing_caller);
        (AnnotatedIndex { records }, report)
    }
}

/// Phase-2 index: records with call data applied. Serializes as a plain
/// `qualifiedName -> record` object.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AnnotatedIndex {
    records: BTreeMap<String, FunctionRecord>,
}

impl AnnotatedIndex {
    pub fn get(&self, qualified_name: &str) -> Option<&FunctionRecord> {
        self.records.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FunctionRecord)> {
        self.records.iter()
    }

    /// Total number of call edges applied across all records.
    pub fn call_count(&self) -> usize {
        self.records.values().map(|r| r.calls.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_last_write_wins() {
        let mut idx = FunctionIndex::new();
        let mut first = FunctionRecord::placeholder("pkg.F");
        first.return_type = "int".into();
        let mut second = FunctionRecord::placeholder("pkg.F");
        second.return_type = "string".into();

        assert!(idx.insert(first).is_none());
        let replaced = idx.insert(second).unwrap();
        assert_eq!(replaced.return_type, "int");
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("pkg.F").unwrap().return_type, "string");
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let mut idx = FunctionIndex::new();
        for k in ["pkg.c", "pkg.a", "pkg.b"] {
            idx.insert(FunctionRecord::placeholder(k));
        }
        let keys: Vec<_> = idx.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["pkg.a", "pkg.b", "pkg.c"]);
    }
}
