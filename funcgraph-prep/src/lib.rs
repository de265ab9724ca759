//! Function index preparation: merge analyzed-function facts and call-graph
//! edges into one keyed record set and export it as JSON.
//!
//! The pipeline has two strictly ordered phases:
//! 1. [`graph::builder::populate`] turns analyzed-function descriptors into
//!    [`model::record::FunctionRecord`]s keyed by qualified name;
//! 2. [`model::index::FunctionIndex::annotate`] consumes that index and appends
//!    call references and call-site positions from the edge list.
//!
//! The result is written by [`export::json::export_index`].

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod graph;
pub mod input;
pub mod model;
pub mod run;

pub use errors::{CallSiteError, DescriptorError, PathError};
pub use model::index::{AnnotatedIndex, FunctionIndex};
pub use model::record::FunctionRecord;
pub use run::{RunOptions, RunOutcome, prepare_function_index};
