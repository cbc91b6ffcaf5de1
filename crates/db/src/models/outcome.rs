//! Results of multi-document operations.
//!
//! Two-sided links and cascading deletes touch several documents without a
//! transaction. These types report how far such an operation got instead of
//! collapsing it into a boolean.

use serde::Serialize;

/// Result of adding or removing a reference on both sides of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    /// Both documents now reflect the change.
    BothUpdated,
    /// The first document changed but the second did not. The first write
    /// is not rolled back.
    FirstOnly,
    /// Nothing was written: a document was missing or the first side was
    /// already in the requested state.
    Failed,
}

impl LinkOutcome {
    pub fn is_success(self) -> bool {
        self == LinkOutcome::BothUpdated
    }
}

/// Result of one reference-removal sweep over a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SweepOutcome {
    Cleaned { count: u64 },
    NothingToClean,
    Failed { reason: String },
}

/// A sweep and the collection/field it ran over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sweep {
    pub collection: String,
    pub field: &'static str,
    #[serde(flatten)]
    pub outcome: SweepOutcome,
}

/// Result of deleting a document and pruning references to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    /// Whether the primary document was removed. This alone decides success.
    pub deleted: bool,
    pub sweeps: Vec<Sweep>,
}

impl DeleteReport {
    pub fn failed_sweeps(&self) -> impl Iterator<Item = &Sweep> {
        self.sweeps
            .iter()
            .filter(|sweep| matches!(sweep.outcome, SweepOutcome::Failed { .. }))
    }
}
