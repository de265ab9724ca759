//! Normalization helpers for paths and glob handling.
//!
//! File identifiers in the exported index must not depend on where the project
//! was checked out, so every source path is rewritten relative to the project
//! root with stable `/` separators.

use crate::errors::PathError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Rewrites absolute source paths into project-relative identifiers.
///
/// The root is normalized once: separators become `/` and a trailing `/` is
/// guaranteed, so `/src/proj` and `/src/proj/` behave identically and
/// `/src/project2/x.go` is never mistaken for a file under `/src/proj`.
///
/// # Example
/// ```
/// use funcgraph_prep::core::normalize::PathNormalizer;
///
/// let n = PathNormalizer::new("/work/proj");
/// assert_eq!(n.relativize("/work/proj/pkg/run.go").unwrap(), "pkg/run.go");
/// assert!(n.relativize("/work/other/main.go").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    prefix: String,
}

impl PathNormalizer {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut prefix = to_unix_sep(root.as_ref().to_string_lossy());
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// Normalized root, always ending in `/`.
    pub fn root(&self) -> &str {
        &self.prefix
    }

    /// Strip the project root from `file`.
    ///
    /// An empty `file` (a function with no recorded position) maps to an
    /// empty identifier. Any other path must lie under the root.
    pub fn relativize(&self, file: &str) -> Result<String, PathError> {
        if file.is_empty() {
            return Ok(String::new());
        }
        let unix = to_unix_sep(file);
        match unix.strip_prefix(&self.prefix) {
            Some(rel) => Ok(rel.to_string()),
            None => Err(PathError::OutsideRoot {
                path: file.to_string(),
                root: self.prefix.clone(),
            }),
        }
    }
}

/// Replace OS-specific separators with `/`.
///
/// # Example
/// ```
/// use funcgraph_prep::core::normalize::to_unix_sep;
///
/// let win_path = r"pkg\sub\run.go";
/// assert_eq!(to_unix_sep(win_path), "pkg/sub/run.go");
/// ```
pub fn to_unix_sep<S: AsRef<str>>(s: S) -> String {
    s.as_ref().replace('\\', "/")
}

/// Build a [`GlobSet`] from patterns, skipping invalid or empty ones.
///
/// Returns `None` if the input list is empty or the set fails to build.
///
/// # Example
/// ```
/// use funcgraph_prep::core::normalize::build_globset;
///
/// let gs = build_globset(&vec!["vendor/**".to_string()]).unwrap();
/// assert!(gs.is_match("vendor/x/y.go"));
/// ```
pub fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        if pat.trim().is_empty() {
            continue;
        }
        if let Ok(g) = Glob::new(pat) {
            builder.add(g);
        }
    }
    builder.build().ok()
}

/// Return `true` if a project-relative file id matches the ignore glob set.
///
/// # Example
/// ```
/// use funcgraph_prep::core::normalize::{build_globset, is_ignored_by};
///
/// let gs = build_globset(&vec!["**/*_test.go".to_string()]);
/// assert!(is_ignored_by("pkg/run_test.go", gs.as_ref()));
/// assert!(!is_ignored_by("pkg/run.go", gs.as_ref()));
/// ```
pub fn is_ignored_by(file_id: &str, set: Option<&GlobSet>) -> bool {
    set.is_some_and(|gs| gs.is_match(file_id))
}
