//! Route definitions for the `/notes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET              /                -> landing (public)
/// GET              /list            -> list (requires auth)
/// GET, POST        /add             -> add_page, add (requires auth)
/// GET              /done            -> done (requires auth)
/// GET              /note/{slug}     -> detail (author)
/// GET, POST        /edit/{slug}     -> edit_page, edit (author)
/// GET, POST|DELETE /delete/{slug}   -> delete_page, delete (author)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::landing))
        .route("/list", get(notes::list))
        .route("/add", get(notes::add_page).post(notes::add))
        .route("/done", get(notes::done))
        .route("/note/{slug}", get(notes::detail))
        .route("/edit/{slug}", get(notes::edit_page).post(notes::edit))
        .route(
            "/delete/{slug}",
            get(notes::delete_page)
                .post(notes::delete)
                .delete(notes::delete),
        )
}
