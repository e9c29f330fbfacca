//! Route definitions for the `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET  /                       -> home
/// GET  /{id}                   -> detail
/// POST /{id}                   -> create_comment (requires auth)
/// GET  /comments/{id}/edit     -> edit_comment_page (author)
/// POST /comments/{id}/edit     -> edit_comment (author)
/// GET  /comments/{id}/delete   -> delete_comment_page (author)
/// POST /comments/{id}/delete   -> delete_comment (author)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::home))
        .route("/{id}", get(news::detail).post(news::create_comment))
        .route(
            "/comments/{id}/edit",
            get(news::edit_comment_page).post(news::edit_comment),
        )
        .route(
            "/comments/{id}/delete",
            get(news::delete_comment_page).post(news::delete_comment),
        )
}
