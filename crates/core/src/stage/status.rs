//! Stage lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a construction stage.
///
/// `Deleted` is a soft-delete marker: the row is never physically removed,
/// it only transitions to this status.
///
/// Variants map to the `stage_status` Postgres enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "stage_status", rename_all = "UPPERCASE")]
pub enum StageStatus {
    New,
    Planned,
    Deleted,
}

impl StageStatus {
    /// The wire/storage spelling of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::New => "NEW",
            StageStatus::Planned => "PLANNED",
            StageStatus::Deleted => "DELETED",
        }
    }
}
