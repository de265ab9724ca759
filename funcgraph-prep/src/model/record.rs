//! Normalized per-function record: the value type of the function index and
//! the unit of the exported JSON document.
//!
//! Field names are part of the exported schema. Avoid renaming them.

use crate::model::span::SourceRange;
use serde::{Deserialize, Serialize};

/// One positional parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

/// One call site inside the caller's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPosition {
    /// Always a point range (start == end).
    pub range: SourceRange,
    #[serde(rename = "calleeID")]
    pub callee_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub qualified_name: String,
    pub name: String,
    #[serde(rename = "fileID")]
    pub file_id: String,
    pub range: SourceRange,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub signature: String,
    /// Callees in append order; repeats mean repeated call sites.
    pub calls: Vec<String>,
    pub call_positions: Vec<CallPosition>,

    // Reserved for downstream stages; never populated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub this_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_class: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_by: Option<Vec<String>>,
}

impl FunctionRecord {
    /// Record for a caller that was not produced by the analysis pass.
    ///
    /// Only the key and a display name derived from it are known.
    pub fn placeholder(qualified_name: &str) -> Self {
        let name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(qualified_name)
            .to_string();
        Self {
            qualified_name: qualified_name.to_string(),
            name,
            ..Self::default()
        }
    }

    /// Append one call edge. `calls` and `call_positions` grow together.
    pub fn push_call(&mut self, callee: &str, site: SourceRange) {
        self.calls.push(callee.to_string());
        self.call_positions.push(CallPosition {
            range: site,
            callee_id: callee.to_string(),
        });
    }
}
