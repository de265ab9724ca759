//! Run summary: counters and timings collected during one index preparation.
//!
//! The summary is returned to the caller and logged at the end of a run. It
//! is not persisted; the exported index is the only artifact.
//!
//! ```ignore
//! let mut sw = SummaryStopwatch::start();
//! // ... read inputs ...
//! sw.stop_load();
//! // ... phase 1 ...
//! sw.stop_build();
//! // ... phase 2 ...
//! sw.stop_annotate();
//! // ... export ...
//! sw.stop_export();
//!
//! let summary = RunSummary::from_reports(&build, &annotate).with_timings(sw.into_timings());
//! ```

use crate::graph::{builder::BuildReport, calls::AnnotateReport};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// ISO 8601 UTC timestamp when the summary was produced.
    pub generated_at: String,
    pub counts: Counts,
    pub timings_ms: TimingsMs,
}

/// Aggregate counters used by [`RunSummary`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Function descriptors read from the input.
    pub functions_seen: usize,
    /// Records in the final index (including placeholders).
    pub records: usize,
    /// Descriptors whose key was already present (last write won).
    pub overwritten: usize,
    /// Descriptors left out by filters, limits or the out-of-root policy.
    pub functions_skipped: usize,
    pub malformed_parameters: usize,

    pub edges_seen: usize,
    pub edges_applied: usize,
    pub edges_missing_caller: usize,
    pub placeholders_created: usize,
    pub malformed_call_sites: usize,
    /// Applied edges whose callee has no record.
    pub unresolved_callees: usize,
}

/// Millisecond timings for the pipeline phases. Unmeasured phases stay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingsMs {
    pub load: u128,
    pub build: u128,
    pub annotate: u128,
    pub export: u128,
    pub total: u128,
}

impl RunSummary {
    /// Build a summary from the phase reports (timings default to zero).
    pub fn from_reports(build: &BuildReport, annotate: &AnnotateReport) -> Self {
        let counts = Counts {
            functions_seen: build.seen,
            records: build.inserted - build.overwritten + annotate.placeholders_created,
            overwritten: build.overwritten,
            functions_skipped: build.skipped(),
            malformed_parameters: build.malformed_parameters,
            edges_seen: annotate.seen,
            edges_applied: annotate.applied,
            edges_missing_caller: annotate.missing_caller,
            placeholders_created: annotate.placeholders_created,
            malformed_call_sites: annotate.malformed_sites,
            unresolved_callees: annotate.unresolved_callees,
        };

        Self {
            generated_at: Utc::now().to_rfc3339(),
            counts,
            timings_ms: TimingsMs::default(),
        }
    }

    /// Attach timings captured by a [`SummaryStopwatch`].
    pub fn with_timings(mut self, timings: TimingsMs) -> Self {
        self.timings_ms = timings;
        self
    }
}

/// Simple stopwatch to measure pipeline phases; each `stop_*` records the time
/// since the previous mark.
#[derive(Debug, Clone)]
pub struct SummaryStopwatch {
    started: Instant,
    last_mark: Instant,
    tm: TimingsMs,
}

impl SummaryStopwatch {
    #[inline]
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_mark: now,
            tm: TimingsMs::default(),
        }
    }

    #[inline]
    pub fn stop_load(&mut self) -> &mut Self {
        self.tm.load = self.since_mark_ms();
        self
    }

    #[inline]
    pub fn stop_build(&mut self) -> &mut Self {
        self.tm.build = self.since_mark_ms();
        self
    }

    #[inline]
    pub fn stop_annotate(&mut self) -> &mut Self {
        self.tm.annotate = self.since_mark_ms();
        self
    }

    #[inline]
    pub fn stop_export(&mut self) -> &mut Self {
        self.tm.export = self.since_mark_ms();
        self
    }

    /// Finish and compute `total`.
    #[inline]
    pub fn into_timings(mut self) -> TimingsMs {
        self.tm.total = as_millis(self.started.elapsed());
        self.tm
    }

    #[inline]
    fn since_mark_ms(&mut self) -> u128 {
        let now = Instant::now();
        let d = now.duration_since(self.last_mark);
        self.last_mark = now;
        as_millis(d)
    }
}

#[inline]
fn as_millis(d: Duration) -> u128 {
    (d.as_secs() as u128)
        .saturating_mul(1_000)
        .saturating_add((d.subsec_nanos() as u128) / 1_000_000)
}
