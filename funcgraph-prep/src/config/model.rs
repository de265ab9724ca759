//! Configuration data structures for the function-index pipeline.
//!
//! Groups:
//! - [`IndexConfig`] — top-level container for all config groups
//! - [`Filters`]     — which functions to leave out of the index
//! - [`Policies`]    — how recoverable inconsistencies are resolved
//! - [`Limits`]      — size caps
//!
//! All structs are `serde`-friendly so they can be loaded from YAML/JSON.
//! Every field has a default, so a config file only lists what it overrides.

use anyhow::{Result, anyhow};
use globset::Glob;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Which functions to include/exclude.
    pub filters: Filters,
    /// Resolution policies for missing callers and out-of-root paths.
    pub policies: Policies,
    /// Size limits.
    pub limits: Limits,
}

impl IndexConfig {
    /// Validate config sanity (patterns compile, no absurd values).
    pub fn validate(&self) -> Result<()> {
        for pat in &self.filters.ignore_globs {
            if pat.trim().is_empty() {
                return Err(anyhow!("`ignore_globs` contains an empty pattern"));
            }
            Glob::new(pat).map_err(|e| anyhow!("invalid ignore glob `{pat}`: {e}"))?;
        }
        Ok(())
    }
}

/// Function filtering rules, applied during phase 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Skip compiler-generated functions (wrappers, thunks, bound closures).
    pub exclude_synthetic: bool,
    /// Glob patterns matched against the project-relative `fileID`.
    pub ignore_globs: Vec<String>,
}

/// What to do with an edge whose caller is not in the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCallerPolicy {
    /// Drop the edge and log a warning.
    #[default]
    Skip,
    /// Create a placeholder record for the caller, then apply the edge.
    Placeholder,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policies {
    pub missing_caller: MissingCallerPolicy,
    /// Skip (with a warning) functions whose file lies outside the project
    /// root instead of failing the run.
    pub skip_outside_root: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of function descriptors to process (0 = unlimited).
    pub max_functions: usize,
}
