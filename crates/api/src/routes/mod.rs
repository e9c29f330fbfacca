pub mod auth;
pub mod health;
pub mod news;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                          service health (public)
///
/// /news                            home feed (public)
/// /news/{id}                       detail (public), post comment (auth)
/// /news/comments/{id}/edit         edit comment (author)
/// /news/comments/{id}/delete       delete comment (author)
///
/// /notes                           landing (public)
/// /notes/list                      own notes (auth)
/// /notes/add                       create note (auth)
/// /notes/done                      success page (auth)
/// /notes/note/{slug}               note detail (author)
/// /notes/edit/{slug}               edit note (author)
/// /notes/delete/{slug}             delete note (author)
///
/// /auth/signup                     create account (public)
/// /auth/login                      obtain a token (public)
/// /auth/logout                     discard token (public)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/news", news::router())
        .nest("/notes", notes::router())
        .nest("/auth", auth::router())
}
