//! Planning module for package dry runs.
//!
//! This module compares a package against platform state, producing a
//! [`Diff`] of what would change and a [`Summary`] of the resolved result.

mod diff;
mod resolver;
mod summary;

pub use diff::{diff_bucket, diff_label, Diff, DiffBucket, DiffLabel, DiffLabelMapping};
pub use resolver::Resolver;
pub use summary::{
    summarize, summarize_bucket, summarize_label, summarize_label_mappings, Summary,
    SummaryBucket, SummaryLabel, SummaryLabelMapping,
};
