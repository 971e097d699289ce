//! Vendor catalog refresh: collect places and promos, then reconcile vendors
//! into the store.

pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod types;

pub use error::PipelineError;
pub use pipeline::{run, run_from_lookup, run_with, run_with_store};
pub use reconcile::reconcile;
pub use types::{Diagnostic, ReconcileReport, RunSummary, Stage};
