//! Repository for the `construction_stages` table.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use sitework_core::types::DbId;

use crate::models::stage::{NewStage, Stage, StageWriteSet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, start_date, end_date, duration, duration_unit, \
    color, external_id, status, created_at, updated_at";

/// Provides CRUD operations for construction stages.
pub struct StageRepo;

impl StageRepo {
    /// List all stages, oldest first. Soft-deleted stages stay visible:
    /// DELETED is a status value, not a filter.
    pub async fn list(pool: &PgPool) -> Result<Vec<Stage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_stages ORDER BY id");
        sqlx::query_as::<_, Stage>(&query).fetch_all(pool).await
    }

    /// Find a stage by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_stages WHERE id = $1");
        sqlx::query_as::<_, Stage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a stage by ID with a row lock, for use inside the patch
    /// transaction. Serializes concurrent read-decide-write sequences
    /// against the same id.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Stage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_stages WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Stage>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new stage, returning the freshly persisted row.
    pub async fn insert(pool: &PgPool, record: &NewStage) -> Result<Stage, sqlx::Error> {
        let query = format!(
            "INSERT INTO construction_stages
                (name, start_date, end_date, duration, duration_unit,
                 color, external_id, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stage>(&query)
            .bind(&record.name)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(record.duration)
            .bind(record.duration_unit)
            .bind(&record.color)
            .bind(&record.external_id)
            .bind(record.status)
            .fetch_one(pool)
            .await
    }

    /// Apply a write set as a single dynamic `UPDATE`, returning the updated
    /// row, or `None` if no row with the given `id` exists.
    ///
    /// Only the entries present in the write set become assignments; inner
    /// `None`s on nullable columns write SQL NULL. `updated_at` is always
    /// bumped. Callers must not pass an empty write set.
    pub async fn update_fields(
        conn: &mut PgConnection,
        id: DbId,
        write_set: &StageWriteSet,
    ) -> Result<Option<Stage>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE construction_stages SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(name) = &write_set.name {
                assignments
                    .push("name = ")
                    .push_bind_unseparated(name.clone());
            }
            if let Some(start_date) = write_set.start_date {
                assignments
                    .push("start_date = ")
                    .push_bind_unseparated(start_date);
            }
            if let Some(end_date) = write_set.end_date {
                assignments
                    .push("end_date = ")
                    .push_bind_unseparated(end_date);
            }
            if let Some(duration) = write_set.duration {
                assignments
                    .push("duration = ")
                    .push_bind_unseparated(duration);
            }
            if let Some(duration_unit) = write_set.duration_unit {
                assignments
                    .push("duration_unit = ")
                    .push_bind_unseparated(duration_unit);
            }
            if let Some(color) = &write_set.color {
                assignments
                    .push("color = ")
                    .push_bind_unseparated(color.clone());
            }
            if let Some(external_id) = &write_set.external_id {
                assignments
                    .push("external_id = ")
                    .push_bind_unseparated(external_id.clone());
            }
            if let Some(status) = write_set.status {
                assignments
                    .push("status = ")
                    .push_bind_unseparated(status);
            }
            assignments.push("updated_at = NOW()");
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(format!(" RETURNING {COLUMNS}"));

        builder
            .build_query_as::<Stage>()
            .fetch_optional(&mut *conn)
            .await
    }
}
