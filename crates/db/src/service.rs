//! Stage service: orchestrates validation, derived-duration recomputation,
//! and partial-update write-set construction over the repository.

use sqlx::PgPool;

use sitework_core::error::CoreError;
use sitework_core::stage::{compute_duration, validate, DurationUnit, StageStatus};
use sitework_core::types::DbId;

use crate::models::stage::{CreateStage, NewStage, Stage, StageWriteSet, UpdateStage};
use crate::repositories::StageRepo;

/// Error type for service operations.
///
/// Domain conditions (`CoreError`) are caller-recoverable; database errors
/// are infrastructure failures and propagate unmodified.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Service for construction-stage operations.
///
/// Holds an explicit pool handed in at construction; nothing here reaches
/// for ambient state.
#[derive(Clone)]
pub struct StageService {
    pool: PgPool,
}

impl StageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all stages.
    pub async fn list(&self) -> Result<Vec<Stage>, StageError> {
        Ok(StageRepo::list(&self.pool).await?)
    }

    /// Fetch a single stage by ID.
    pub async fn get(&self, id: DbId) -> Result<Stage, StageError> {
        StageRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Stage", id }.into())
    }

    /// Create a stage.
    ///
    /// Applies defaults (`durationUnit` DAYS, `status` NEW), validates every
    /// field, derives `duration`, and inserts. Any validation failure aborts
    /// before any persistence call; the returned record is the freshly
    /// persisted row.
    pub async fn create(&self, input: CreateStage) -> Result<Stage, StageError> {
        validate::name(&input.name)?;
        let start_date = validate::start_date(&input.start_date)?;
        let end_date = match &input.end_date {
            Some(raw) => Some(validate::end_date(raw, start_date)?),
            None => None,
        };
        let duration_unit = match &input.duration_unit {
            Some(raw) => validate::duration_unit(raw)?,
            None => DurationUnit::Days,
        };
        if let Some(raw) = &input.color {
            validate::color(raw)?;
        }
        if let Some(raw) = &input.external_id {
            validate::external_id(raw)?;
        }
        let status = match &input.status {
            Some(raw) => validate::status(raw)?,
            None => StageStatus::New,
        };

        let record = NewStage {
            duration: compute_duration(start_date, end_date, duration_unit),
            name: input.name,
            start_date,
            end_date,
            duration_unit,
            color: input.color,
            external_id: input.external_id,
            status,
        };

        let stage = StageRepo::insert(&self.pool, &record).await?;
        tracing::debug!(id = stage.id, "created construction stage");
        Ok(stage)
    }

    /// Partially update a stage.
    ///
    /// Runs read-decide-write in a single transaction with a row lock, so
    /// concurrent patches against the same id cannot produce lost updates
    /// on the derived duration. Only fields present in the payload are
    /// validated and written; `endDate`, `color`, and `externalId` honor the
    /// tri-state absent / null / value semantics.
    pub async fn patch(&self, id: DbId, input: UpdateStage) -> Result<Stage, StageError> {
        let mut tx = self.pool.begin().await?;

        let current = StageRepo::find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Stage", id })?;

        let mut write_set = StageWriteSet::default();

        if let Some(name) = &input.name {
            validate::name(name)?;
            write_set.name = Some(name.clone());
        }
        if let Some(raw) = &input.start_date {
            write_set.start_date = Some(validate::start_date(raw)?);
        }
        // Companion for the endDate ordering rule: the new start if supplied,
        // else the stored one.
        let effective_start = write_set.start_date.unwrap_or(current.start_date);

        if let Some(supplied_end) = &input.end_date {
            write_set.end_date = Some(match supplied_end {
                Some(raw) => Some(validate::end_date(raw, effective_start)?),
                None => None,
            });
        }
        if let Some(raw) = &input.duration_unit {
            write_set.duration_unit = Some(validate::duration_unit(raw)?);
        }
        if let Some(supplied_color) = &input.color {
            if let Some(raw) = supplied_color {
                validate::color(raw)?;
            }
            write_set.color = Some(supplied_color.clone());
        }
        if let Some(supplied_external) = &input.external_id {
            if let Some(raw) = supplied_external {
                validate::external_id(raw)?;
            }
            write_set.external_id = Some(supplied_external.clone());
        }
        if let Some(raw) = &input.status {
            write_set.status = Some(validate::status(raw)?);
        }

        // Effective (start, end, unit) triple for duration recomputation.
        let end = match write_set.end_date {
            Some(end) => end,
            None => current.end_date,
        };
        let unit = write_set.duration_unit.unwrap_or(current.duration_unit);
        let new_duration = compute_duration(effective_start, end, unit);
        write_set.duration = duration_write(new_duration, current.duration);

        if write_set.is_empty() {
            return Err(CoreError::NoFieldsToUpdate.into());
        }

        let updated = StageRepo::update_fields(&mut *tx, id, &write_set)
            .await?
            .ok_or(CoreError::NotFound { entity: "Stage", id })?;
        tx.commit().await?;

        tracing::debug!(id, "patched construction stage");
        Ok(updated)
    }

    /// Soft-delete a stage: a single-field transition to DELETED. The row is
    /// never physically removed, and no duration recomputation happens.
    pub async fn delete(&self, id: DbId) -> Result<Stage, StageError> {
        let write_set = StageWriteSet {
            status: Some(StageStatus::Deleted),
            ..Default::default()
        };

        let mut conn = self.pool.acquire().await?;
        let stage = StageRepo::update_fields(&mut *conn, id, &write_set)
            .await?
            .ok_or(CoreError::NotFound { entity: "Stage", id })?;

        tracing::debug!(id, "soft-deleted construction stage");
        Ok(stage)
    }
}

/// Decide whether the recomputed duration belongs in the write set.
///
/// A changed non-null value is always written. NULL is written only when a
/// non-null stored duration must be cleared (the end boundary went away);
/// writing NULL over NULL would be a redundant write and would turn an empty
/// patch into a spurious update.
fn duration_write(new_duration: Option<f64>, stored_duration: Option<f64>) -> Option<Option<f64>> {
    match new_duration {
        Some(value) if stored_duration != Some(value) => Some(Some(value)),
        None if stored_duration.is_some() => Some(None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_duration_is_written() {
        assert_eq!(duration_write(Some(52.0), Some(2.0)), Some(Some(52.0)));
        assert_eq!(duration_write(Some(52.0), None), Some(Some(52.0)));
    }

    #[test]
    fn unchanged_duration_is_not_written() {
        assert_eq!(duration_write(Some(2.5), Some(2.5)), None);
    }

    #[test]
    fn cleared_end_boundary_nulls_a_stored_duration() {
        assert_eq!(duration_write(None, Some(2.5)), Some(None));
    }

    #[test]
    fn null_over_null_is_not_written() {
        assert_eq!(duration_write(None, None), None);
    }
}
