//! High-level orchestration for building and exporting the function index.
//!
//! [`prepare_function_index`] is the file-based entry point used by the CLI;
//! [`build_function_index`] runs both phases on in-memory inputs.

use crate::{
    config::{self, model::IndexConfig},
    core::{
        normalize::PathNormalizer,
        summary::{RunSummary, SummaryStopwatch},
    },
    export::json,
    graph::builder,
    input,
    model::{
        descriptor::{AnalyzedFunction, CallEdge},
        index::AnnotatedIndex,
    },
};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs of one extraction run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Project root; source paths are made relative to it.
    pub project_dir: PathBuf,
    /// Analyzed-function descriptors (JSONL).
    pub functions: PathBuf,
    /// Call edges (JSONL, or DOT by extension).
    pub edges: PathBuf,
    /// Output base name; `.json` is appended.
    pub output_base: PathBuf,
    /// Explicit config file; otherwise `<project_dir>/.funcgraph.yml` if present.
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub summary: RunSummary,
}

/// Run both phases over in-memory inputs.
///
/// Phase 1 fully populates the index before any edge is looked at.
pub fn build_function_index(
    functions: &[AnalyzedFunction],
    edges: &[CallEdge],
    project_root: &Path,
    cfg: &IndexConfig,
) -> Result<(AnnotatedIndex, RunSummary)> {
    let normalizer = PathNormalizer::new(project_root);
    let (index, build) = builder::populate(functions, &normalizer, cfg)?;
    let (annotated, annotate) = index.annotate(edges, cfg.policies.missing_caller);
    Ok((annotated, RunSummary::from_reports(&build, &annotate)))
}

/// Load inputs, build the index, and export it to `<output_base>.json`.
///
/// # Steps:
/// 1. **Config**: explicit file, project default file, or defaults.
/// 2. **Load** function descriptors and call edges.
/// 3. **Build** one record per qualified name (phase 1).
/// 4. **Annotate** records with call edges (phase 2).
/// 5. **Export** the annotated index atomically.
#[tracing::instrument(level = "info", skip_all, fields(root = %opts.project_dir.display()))]
pub fn prepare_function_index(opts: &RunOptions) -> Result<RunOutcome> {
    let mut sw = SummaryStopwatch::start();

    // Absolute but not canonical: descriptor paths are compared as the
    // analysis pass recorded them, symlinks included.
    let root = std::path::absolute(&opts.project_dir)
        .with_context(|| format!("resolve project dir {}", opts.project_dir.display()))?;
    if !root.is_dir() {
        bail!("project dir {} is not a directory", root.display());
    }
    let cfg = config::load_or_default(&root, opts.config.as_deref())?;
    info!("Configuration loaded");

    let functions = input::jsonl::read_functions(&opts.functions)?;
    let edges = input::read_edges(&opts.edges)?;
    sw.stop_load();

    let normalizer = PathNormalizer::new(&root);
    let (index, build) = builder::populate(&functions, &normalizer, &cfg)?;
    sw.stop_build();

    let (annotated, annotate) = index.annotate(&edges, cfg.policies.missing_caller);
    sw.stop_annotate();

    let output_path = json::export_index(&annotated, &json::output_path_for(&opts.output_base))?;
    sw.stop_export();

    let summary = RunSummary::from_reports(&build, &annotate).with_timings(sw.into_timings());
    info!(
        records = summary.counts.records,
        edges_applied = summary.counts.edges_applied,
        total_ms = summary.timings_ms.total as u64,
        out = %output_path.display(),
        "Function index exported"
    );

    Ok(RunOutcome {
        output_path,
        summary,
    })
}
