//! Admin routes for generic and typed blocks addressed by their own id.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{block, block_kind, content_block};
use crate::state::AppState;

/// Generic block routes, registered as `/admin/blocks`.
///
/// ```text
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      delete
/// ```
pub fn block_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(block::get_by_id)
            .put(block::update)
            .delete(block::delete),
    )
}

/// Typed block routes, registered as `/admin/content-blocks`.
///
/// ```text
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      delete
/// GET    /{id}/style                get_style
/// PUT    /{id}/style                update_style
/// GET    /{id}/items                list_items
/// POST   /{id}/items                create_item
/// ```
pub fn content_block_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(content_block::get_by_id)
                .put(content_block::update)
                .delete(content_block::delete),
        )
        .route(
            "/{id}/style",
            get(content_block::get_style).put(content_block::update_style),
        )
        .route(
            "/{id}/items",
            get(content_block::list_items).post(content_block::create_item),
        )
}

/// Typed block item routes, registered as `/admin/content-block-items`.
///
/// ```text
/// PUT    /{id}                      update_item
/// DELETE /{id}                      delete_item
/// ```
pub fn item_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(content_block::update_item).delete(content_block::delete_item),
    )
}

/// Block kind registry, registered as `/admin/block-kinds`.
///
/// ```text
/// GET    /                          list
/// ```
pub fn kind_router() -> Router<AppState> {
    Router::new().route("/", get(block_kind::list))
}
