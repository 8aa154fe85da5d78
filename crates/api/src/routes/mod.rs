pub mod block_types;
pub mod blocks;
pub mod health;
pub mod menu;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages/{slug}                                    published page detail (public)
/// /menu                                            navigation menu (public)
///
/// /admin/pages                                     list, create
/// /admin/pages/{id}                                get, update, delete
/// /admin/pages/{id}/blocks                         list, create generic blocks
/// /admin/pages/{id}/content-blocks                 list, create typed blocks
///
/// /admin/blocks/{id}                               get, update, delete
///
/// /admin/content-blocks/{id}                       get, update, delete
/// /admin/content-blocks/{id}/style                 get, update
/// /admin/content-blocks/{id}/items                 list, create
/// /admin/content-block-items/{id}                  update, delete
///
/// /admin/block-types                               list, create
/// /admin/block-types/{id}                          get, update, delete
/// /admin/block-kinds                               list
///
/// /admin/menu-items                                list, create
/// /admin/menu-items/parent-choices                 parent choices for a new item
/// /admin/menu-items/{id}                           get, update, delete
/// /admin/menu-items/{id}/parent-choices            parent choices
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .nest("/pages", pages::admin_router())
        .nest("/blocks", blocks::block_router())
        .nest("/content-blocks", blocks::content_block_router())
        .nest("/content-block-items", blocks::item_router())
        .nest("/block-kinds", blocks::kind_router())
        .nest("/block-types", block_types::router())
        .nest("/menu-items", menu::admin_router());

    Router::new()
        .nest("/pages", pages::public_router())
        .nest("/menu", menu::public_router())
        .nest("/admin", admin)
}
