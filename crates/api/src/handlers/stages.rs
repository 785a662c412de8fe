//! Handlers for the `/stages` resource.
//!
//! All decision logic (validation, duration derivation, write-set
//! construction) lives in [`sitework_db::StageService`]; these handlers only
//! translate between HTTP and the service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use sitework_core::types::DbId;
use sitework_db::models::stage::{CreateStage, UpdateStage};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stages
///
/// List all stages, soft-deleted ones included.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stages = state.stages.list().await?;
    Ok(Json(DataResponse { data: stages }))
}

/// POST /api/v1/stages
///
/// Create a stage. A caller-supplied `duration` is ignored; the stored value
/// is always derived from `(startDate, endDate, durationUnit)`.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStage>,
) -> AppResult<impl IntoResponse> {
    let stage = state.stages.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: stage })))
}

/// GET /api/v1/stages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stage = state.stages.get(id).await?;
    Ok(Json(DataResponse { data: stage }))
}

/// PATCH /api/v1/stages/{id}
///
/// Partial update: only the fields present in the payload change. An
/// explicit `"endDate": null` clears the end boundary (and the derived
/// duration with it), which is different from omitting the key.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStage>,
) -> AppResult<impl IntoResponse> {
    let stage = state.stages.patch(id, input).await?;
    Ok(Json(DataResponse { data: stage }))
}

/// DELETE /api/v1/stages/{id}
///
/// Soft delete: transitions `status` to DELETED and returns the stage. The
/// row is never physically removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stage = state.stages.delete(id).await?;
    Ok(Json(DataResponse { data: stage }))
}
