pub mod auth;
pub mod categories;
pub mod exercises;
pub mod health;
pub mod trainings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
///
/// /users                          list, create (admin only)
/// /users/{id}                     update (admin only)
///
/// /categories                     list, create (trainer)
/// /categories/{id}                get, update, delete (trainer)
///
/// /exercises                      list, create (trainer)
/// /exercises/{id}                 get, update, delete (trainer)
///
/// /trainings                      list own, create (trainer)
/// /trainings/{id}                 get, update, delete (creator only)
/// /trainings/shared/{share_id}    public read-only view
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/categories", categories::router())
        .nest("/exercises", exercises::router())
        .nest("/trainings", trainings::router())
}
