//! Integration tests for partial-update reconciliation.
//!
//! The interesting part of the service: merging a patch against the stored
//! record without corrupting unspecified fields, the endDate tri-state
//! (absent = keep, null = clear, value = replace), and the derived-duration
//! recomputation whenever any of its three inputs moves.

use assert_matches::assert_matches;
use sqlx::PgPool;

use sitework_core::error::CoreError;
use sitework_core::stage::DurationUnit;
use sitework_db::models::stage::{CreateStage, UpdateStage};
use sitework_db::{StageError, StageService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_stage(name: &str) -> CreateStage {
    CreateStage {
        name: name.to_string(),
        start_date: "2024-01-01T10:00:00Z".to_string(),
        end_date: Some("2024-01-03T14:00:00Z".to_string()),
        duration_unit: Some("HOURS".to_string()),
        color: Some("#336699".to_string()),
        external_id: None,
        status: Some("PLANNED".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Test: patching a single field leaves everything else alone
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_single_field_keeps_the_rest(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Plumbing")).await.unwrap();

    let patch = UpdateStage {
        color: Some(Some("#AB12CD".to_string())),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.color.as_deref(), Some("#AB12CD"));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.start_date, created.start_date);
    assert_eq!(updated.end_date, created.end_date);
    assert_eq!(updated.duration, created.duration);
    assert_eq!(updated.status, created.status);
}

// ---------------------------------------------------------------------------
// Test: endDate tri-state
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_explicit_null_clears_end_date_and_duration(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Wiring")).await.unwrap();
    assert_eq!(created.duration, Some(52.0));

    let patch = UpdateStage {
        end_date: Some(None),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.end_date, None);
    assert_eq!(updated.duration, None);
}

#[sqlx::test]
async fn test_patch_absent_end_date_is_kept(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Painting")).await.unwrap();

    let patch = UpdateStage {
        name: Some("Painting & finishing".to_string()),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.end_date, created.end_date);
    assert_eq!(updated.duration, Some(52.0));
}

#[sqlx::test]
async fn test_patch_new_end_date_recomputes_duration(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Flooring")).await.unwrap();

    let patch = UpdateStage {
        end_date: Some(Some("2024-01-02T10:00:00Z".to_string())),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.duration, Some(24.0));
}

#[sqlx::test]
async fn test_patch_sets_end_date_on_open_ended_stage(pool: PgPool) {
    let service = StageService::new(pool);
    let mut input = new_stage("Inspection");
    input.end_date = None;
    let created = service.create(input).await.unwrap();
    assert_eq!(created.duration, None);

    let patch = UpdateStage {
        end_date: Some(Some("2024-01-01T16:00:00Z".to_string())),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.duration, Some(6.0));
}

// ---------------------------------------------------------------------------
// Test: duration recomputation follows unit and start changes
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_unit_only_recomputes_duration(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Sitework")).await.unwrap();
    assert_eq!(created.duration, Some(52.0));

    let patch = UpdateStage {
        duration_unit: Some("DAYS".to_string()),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.duration_unit, DurationUnit::Days);
    assert_eq!(updated.duration, Some(2.0 + 4.0 / 24.0));
}

#[sqlx::test]
async fn test_patch_start_date_recomputes_duration(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Excavation")).await.unwrap();

    let patch = UpdateStage {
        start_date: Some("2024-01-02T10:00:00Z".to_string()),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    // One day shorter than the original 52 hours.
    assert_eq!(updated.duration, Some(28.0));
}

// ---------------------------------------------------------------------------
// Test: endDate ordering is validated against the effective start
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_end_date_checked_against_new_start(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Scheduling")).await.unwrap();

    // Both supplied: the new start is the companion, and the window is
    // reversed.
    let patch = UpdateStage {
        start_date: Some("2024-02-01T00:00:00Z".to_string()),
        end_date: Some(Some("2024-01-15T00:00:00Z".to_string())),
        ..Default::default()
    };
    assert_matches!(
        service.patch(created.id, patch).await.unwrap_err(),
        StageError::Core(CoreError::Validation {
            field: "endDate",
            ..
        })
    );
}

#[sqlx::test]
async fn test_patch_end_date_checked_against_stored_start(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Surveying")).await.unwrap();

    // Only endDate supplied: the stored start (2024-01-01) is the companion.
    let patch = UpdateStage {
        end_date: Some(Some("2023-12-31T00:00:00Z".to_string())),
        ..Default::default()
    };
    assert_matches!(
        service.patch(created.id, patch).await.unwrap_err(),
        StageError::Core(CoreError::Validation {
            field: "endDate",
            ..
        })
    );
}

// ---------------------------------------------------------------------------
// Test: validation failure aborts the whole patch
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_failing_field_aborts_all_fields(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Masonry")).await.unwrap();

    let patch = UpdateStage {
        name: Some("Masonry phase 2".to_string()),
        color: Some(Some("not-a-color".to_string())),
        ..Default::default()
    };
    assert_matches!(
        service.patch(created.id, patch).await.unwrap_err(),
        StageError::Core(CoreError::Validation { field: "color", .. })
    );

    // The valid name change must not have been applied.
    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "Masonry");
}

// ---------------------------------------------------------------------------
// Test: idempotent patch writes nothing surprising
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_identical_payload_changes_nothing(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Landscaping")).await.unwrap();

    let patch = UpdateStage {
        name: Some(created.name.clone()),
        start_date: Some("2024-01-01T10:00:00Z".to_string()),
        end_date: Some(Some("2024-01-03T14:00:00Z".to_string())),
        duration_unit: Some("HOURS".to_string()),
        color: Some(created.color.clone()),
        external_id: None,
        status: Some("PLANNED".to_string()),
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.name, created.name);
    assert_eq!(updated.start_date, created.start_date);
    assert_eq!(updated.end_date, created.end_date);
    assert_eq!(updated.duration, created.duration);
    assert_eq!(updated.duration_unit, created.duration_unit);
    assert_eq!(updated.status, created.status);
}

// ---------------------------------------------------------------------------
// Test: empty payload and missing id
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_empty_payload_is_rejected(pool: PgPool) {
    let service = StageService::new(pool);
    let created = service.create(new_stage("Paving")).await.unwrap();

    assert_matches!(
        service
            .patch(created.id, UpdateStage::default())
            .await
            .unwrap_err(),
        StageError::Core(CoreError::NoFieldsToUpdate)
    );
}

#[sqlx::test]
async fn test_patch_missing_id_is_not_found(pool: PgPool) {
    let service = StageService::new(pool);

    let patch = UpdateStage {
        name: Some("anything".to_string()),
        ..Default::default()
    };
    assert_matches!(
        service.patch(7, patch).await.unwrap_err(),
        StageError::Core(CoreError::NotFound { id: 7, .. })
    );
}

// ---------------------------------------------------------------------------
// Test: clearing the other nullable fields via explicit null
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_patch_clears_color_and_external_id(pool: PgPool) {
    let service = StageService::new(pool);
    let mut input = new_stage("Cleanup");
    input.external_id = Some("EXT-9".to_string());
    let created = service.create(input).await.unwrap();

    let patch = UpdateStage {
        color: Some(None),
        external_id: Some(None),
        ..Default::default()
    };
    let updated = service.patch(created.id, patch).await.unwrap();

    assert_eq!(updated.color, None);
    assert_eq!(updated.external_id, None);
}
