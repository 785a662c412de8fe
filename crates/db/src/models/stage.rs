//! Construction stage entity model and DTOs.
//!
//! Payload field names at the HTTP boundary are camelCase (`startDate`,
//! `durationUnit`, ...). A caller-supplied `duration` is ignored: the DTOs
//! simply carry no such field, so serde drops it on the floor and the
//! service always derives the stored value itself.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use sitework_core::stage::{DurationUnit, StageStatus};
use sitework_core::types::{DbId, Timestamp};

/// A row from the `construction_stages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: DbId,
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    /// Derived from `(start_date, end_date, duration_unit)`; `None` iff
    /// `end_date` is `None`.
    pub duration: Option<f64>,
    pub duration_unit: DurationUnit,
    pub color: Option<String>,
    pub external_id: Option<String>,
    pub status: StageStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new stage. Dates and enums arrive as raw strings and
/// are parsed by the field validators before anything touches the database.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStage {
    pub name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    /// Defaults to DAYS if omitted.
    pub duration_unit: Option<String>,
    pub color: Option<String>,
    pub external_id: Option<String>,
    /// Defaults to NEW if omitted.
    pub status: Option<String>,
}

/// DTO for partially updating a stage.
///
/// Nullable fields are tri-state: an absent key leaves the stored value
/// unchanged, an explicit `null` clears it, and a value replaces it. The
/// `double_option` deserializer keeps `null` distinguishable from absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStage {
    pub name: Option<String>,
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
    pub duration_unit: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub external_id: Option<Option<String>>,
    pub status: Option<String>,
}

/// A fully validated stage ready for insertion, duration already derived.
#[derive(Debug, Clone)]
pub struct NewStage {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub duration: Option<f64>,
    pub duration_unit: DurationUnit,
    pub color: Option<String>,
    pub external_id: Option<String>,
    pub status: StageStatus,
}

/// The field-to-value mapping actually sent to persistence for an update.
///
/// Built from exactly the fields present in the patch payload, plus the
/// conditional derived `duration` entry. Outer `None` means "not part of
/// this write"; for nullable columns the inner `None` writes SQL NULL.
#[derive(Debug, Clone, Default)]
pub struct StageWriteSet {
    pub name: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Option<Timestamp>>,
    pub duration: Option<Option<f64>>,
    pub duration_unit: Option<DurationUnit>,
    pub color: Option<Option<String>>,
    pub external_id: Option<Option<String>>,
    pub status: Option<StageStatus>,
}

impl StageWriteSet {
    /// True when no assignment would be sent to the database.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.duration.is_none()
            && self.duration_unit.is_none()
            && self.color.is_none()
            && self.external_id.is_none()
            && self.status.is_none()
    }
}

/// Deserialize `Option<Option<T>>` so that an explicitly-null JSON value maps
/// to `Some(None)` instead of collapsing into the field default. Combined
/// with `#[serde(default)]`, an absent key stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent() {
        let absent: UpdateStage = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(absent.end_date, None);

        let null: UpdateStage = serde_json::from_str(r#"{"endDate":null}"#).unwrap();
        assert_eq!(null.end_date, Some(None));

        let value: UpdateStage =
            serde_json::from_str(r#"{"endDate":"2024-01-03T14:00:00Z"}"#).unwrap();
        assert_eq!(value.end_date, Some(Some("2024-01-03T14:00:00Z".into())));
    }

    #[test]
    fn update_ignores_caller_supplied_duration() {
        let patch: UpdateStage =
            serde_json::from_str(r#"{"duration":99.5,"name":"B"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("B"));
    }

    #[test]
    fn empty_write_set_reports_empty() {
        assert!(StageWriteSet::default().is_empty());
        let ws = StageWriteSet {
            duration: Some(None),
            ..Default::default()
        };
        assert!(!ws.is_empty());
    }
}
