//! Configuration loader and validator.
//!
//! Responsibilities:
//! - Read an explicit YAML config, or `<root>/.funcgraph.yml` when present
//! - Apply defaults when values are missing
//! - Validate constraints (e.g., glob patterns must compile)

pub mod model;

use crate::config::model::IndexConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Config file looked up in the project root when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".funcgraph.yml";

/// Load [`IndexConfig`] from `explicit`, or from the project's default config
/// file, falling back to defaults if neither exists.
///
/// An explicit path that does not exist is an error; a missing default file
/// is not.
pub fn load_or_default(root: &Path, explicit: Option<&Path>) -> Result<IndexConfig> {
    let cfg = match explicit {
        Some(path) => read_yaml(path)?,
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                read_yaml(&candidate)?
            } else {
                debug!(root = %root.display(), "no config file; using defaults");
                IndexConfig::default()
            }
        }
    };

    cfg.validate()?;
    Ok(cfg)
}

fn read_yaml(path: &Path) -> Result<IndexConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: IndexConfig =
        serde_yml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(cfg)
}
