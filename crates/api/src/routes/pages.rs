//! Page routes: the public page detail and admin page management.

use axum::routing::get;
use axum::Router;

use crate::handlers::{block, content_block, page};
use crate::state::AppState;

/// Public page routes, registered as `/pages`.
///
/// ```text
/// GET    /{slug}                    get_published
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/{slug}", get(page::get_published))
}

/// Admin page routes, registered as `/admin/pages`.
///
/// ```text
/// GET    /                          list
/// POST   /                          create
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      delete
/// GET    /{id}/blocks               block::list_for_page
/// POST   /{id}/blocks               block::create
/// GET    /{id}/content-blocks       content_block::list_for_page
/// POST   /{id}/content-blocks       content_block::create
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::list).post(page::create))
        .route(
            "/{id}",
            get(page::get_by_id).put(page::update).delete(page::delete),
        )
        .route(
            "/{id}/blocks",
            get(block::list_for_page).post(block::create),
        )
        .route(
            "/{id}/content-blocks",
            get(content_block::list_for_page).post(content_block::create),
        )
}
