//! Phase 1: turn analyzed-function descriptors into index records.
//!
//! One pass over the descriptors, no edges. Records are keyed by qualified
//! name; a repeated key replaces the earlier record (last write wins).

use crate::config::model::IndexConfig;
use crate::core::{
    normalize::{PathNormalizer, build_globset, is_ignored_by},
    signature,
};
use crate::errors::{DescriptorError, PathError};
use crate::model::{
    descriptor::AnalyzedFunction, index::FunctionIndex, record::FunctionRecord, span::SourceRange,
};
use tracing::{debug, info, warn};

/// Counters for one phase-1 pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub seen: usize,
    /// Records written into the index, overwrites included.
    pub inserted: usize,
    pub overwritten: usize,
    pub skipped_filtered: usize,
    pub skipped_synthetic: usize,
    pub skipped_outside_root: usize,
    pub skipped_over_limit: usize,
    pub malformed_parameters: usize,
}

impl BuildReport {
    pub fn skipped(&self) -> usize {
        self.skipped_filtered
            + self.skipped_synthetic
            + self.skipped_outside_root
            + self.skipped_over_limit
    }
}

/// A record plus the parameter descriptors that could not be parsed.
#[derive(Debug, Clone)]
pub struct BuiltRecord {
    pub record: FunctionRecord,
    pub malformed: Vec<DescriptorError>,
}

/// Source extent of a function.
///
/// Source-defined functions with a syntax node span that node. Synthetic
/// functions, and any function without a syntax node, collapse to their
/// declared position: `[line, col, line, col]`.
pub fn function_range(func: &AnalyzedFunction) -> SourceRange {
    match (&func.syntax, func.is_synthetic()) {
        (Some(extent), false) => SourceRange::new(extent.start, extent.end),
        _ => SourceRange::point(func.pos.point()),
    }
}

/// Compose path normalization and signature extraction into one record.
pub fn build_record(
    func: &AnalyzedFunction,
    normalizer: &PathNormalizer,
) -> Result<BuiltRecord, PathError> {
    let file_id = normalizer.relativize(&func.pos.file)?;
    let sig = signature::extract(func);

    if !func.is_synthetic() && func.syntax.is_none() {
        debug!(function = %func.qualified_name, "no syntax extent; using declared position");
    }

    let record = FunctionRecord {
        qualified_name: sig.qualified_name,
        name: sig.name,
        file_id,
        range: function_range(func),
        return_type: sig.return_type,
        parameters: sig.parameters,
        signature: sig.signature,
        ..FunctionRecord::default()
    };

    Ok(BuiltRecord {
        record,
        malformed: sig.malformed,
    })
}

/// Build the phase-1 index from `functions`.
///
/// Fails fast with [`PathError::OutsideRoot`] unless
/// `policies.skip_outside_root` is set. Malformed parameter descriptors are
/// logged and counted; they never abort the pass.
pub fn populate<'a, I>(
    functions: I,
    normalizer: &PathNormalizer,
    cfg: &IndexConfig,
) -> Result<(FunctionIndex, BuildReport), PathError>
where
    I: IntoIterator<Item = &'a AnalyzedFunction>,
{
    let ignore = build_globset(&cfg.filters.ignore_globs);
    let max = cfg.limits.max_functions;

    let mut index = FunctionIndex::new();
    let mut report = BuildReport::default();

    for func in functions {
        report.seen += 1;

        if max > 0 && report.seen > max {
            if report.skipped_over_limit == 0 {
                warn!(max_functions = max, "function limit reached; ignoring the rest");
            }
            report.skipped_over_limit += 1;
            continue;
        }

        if cfg.filters.exclude_synthetic && func.is_synthetic() {
            debug!(function = %func.qualified_name, synthetic = %func.synthetic, "skip synthetic");
            report.skipped_synthetic += 1;
            continue;
        }

        let built = match build_record(func, normalizer) {
            Ok(b) => b,
            Err(err) if cfg.policies.skip_outside_root => {
                warn!(function = %func.qualified_name, error = %err, "skip function");
                report.skipped_outside_root += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        if is_ignored_by(&built.record.file_id, ignore.as_ref()) {
            debug!(function = %func.qualified_name, file = %built.record.file_id, "skip ignored file");
            report.skipped_filtered += 1;
            continue;
        }

        for err in &built.malformed {
            warn!(function = %func.qualified_name, error = %err, "keeping raw parameter text");
        }
        report.malformed_parameters += built.malformed.len();

        if let Some(prev) = index.insert(built.record) {
            debug!(
                function = %prev.qualified_name,
                previous_file = %prev.file_id,
                "duplicate qualified name; last write wins"
            );
            report.overwritten += 1;
        }
        report.inserted += 1;
    }

    info!(
        seen = report.seen,
        records = index.len(),
        overwritten = report.overwritten,
        skipped = report.skipped(),
        malformed_parameters = report.malformed_parameters,
        "function records built"
    );
    Ok((index, report))
}
