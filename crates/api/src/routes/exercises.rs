use axum::routing::get;
use axum::Router;

use crate::handlers::exercises;
use crate::state::AppState;

/// Exercise routes mounted at `/exercises`.
///
/// ```text
/// GET    /        -> list_exercises
/// POST   /        -> create_exercise
/// GET    /{id}    -> get_exercise
/// PUT    /{id}    -> update_exercise
/// DELETE /{id}    -> delete_exercise
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(exercises::list_exercises).post(exercises::create_exercise),
        )
        .route(
            "/{id}",
            get(exercises::get_exercise)
                .put(exercises::update_exercise)
                .delete(exercises::delete_exercise),
        )
}
