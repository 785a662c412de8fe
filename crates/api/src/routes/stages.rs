//! Route definitions for construction stages.

use axum::routing::get;
use axum::Router;

use crate::handlers::stages;
use crate::state::AppState;

/// Routes mounted at `/stages`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stages::list).post(stages::create))
        .route(
            "/{id}",
            get(stages::get_by_id)
                .patch(stages::update)
                .delete(stages::delete),
        )
}
