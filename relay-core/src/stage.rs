//! Status label → stage identifier table.
//!
//! The table is hand-authored; it is not derived from either system's
//! schema. A label missing from the table is "unmapped": callers skip the
//! item and warn, they never fail.

use serde::{Deserialize, Serialize};

use crate::types::StageId;

/// Labels of the default table, in stage order (stage 1 first).
pub const DEFAULT_STAGE_LABELS: [&str; 6] = [
    "New",
    "Initial Qualification",
    "First Interview",
    "Second interview",
    "Contract Proposal",
    "Contract Signed",
];

/// A single `label → stage` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    pub status: String,
    pub stage: StageId,
}

/// Ordered mapping from free-text board status to CRM stage.
///
/// Lookups are exact and case-sensitive. When a label appears twice the
/// later row wins, as if the rows were inserted into a map in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageTable(Vec<StageEntry>);

impl StageTable {
    pub fn new(entries: Vec<StageEntry>) -> Self {
        Self(entries)
    }

    /// Assign stages `1..=n` to `labels` in order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            labels
                .into_iter()
                .zip(1..)
                .map(|(status, stage)| StageEntry {
                    status: status.into(),
                    stage: StageId(stage),
                })
                .collect(),
        )
    }

    pub fn stage_for(&self, status: &str) -> Option<StageId> {
        self.0.iter().rev().find(|e| e.status == status).map(|e| e.stage)
    }

    pub fn entries(&self) -> &[StageEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::from_labels(DEFAULT_STAGE_LABELS)
    }
}
