//! Project observation diffing.
//!
//! Observations are an append-only audit log. Change observations are
//! produced by diffing a fixed allowlist of project fields between the
//! pre- and post-save snapshots; the allowlist and its semantic
//! formatters are a static descriptor table, not runtime reflection.

pub mod diff;
pub mod types;

#[cfg(test)]
mod tests;

pub use diff::{build_changes, receipt_note, CHANGE_NOTE, PROJECT_CHANGE_FIELDS};
pub use types::{FieldChange, FieldValue, ObservationKind, ProjectSnapshot, RefValue};
