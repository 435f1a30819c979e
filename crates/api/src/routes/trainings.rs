use axum::routing::get;
use axum::Router;

use crate::handlers::trainings;
use crate::state::AppState;

/// Training routes mounted at `/trainings`.
///
/// ```text
/// GET    /                      -> list_trainings
/// POST   /                      -> create_training
/// GET    /shared/{share_id}     -> get_shared_training (public)
/// GET    /{id}                  -> get_training
/// PUT    /{id}                  -> update_training
/// DELETE /{id}                  -> delete_training
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(trainings::list_trainings).post(trainings::create_training),
        )
        .route("/shared/{share_id}", get(trainings::get_shared_training))
        .route(
            "/{id}",
            get(trainings::get_training)
                .put(trainings::update_training)
                .delete(trainings::delete_training),
        )
}
