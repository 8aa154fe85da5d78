//! Navigation menu routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::menu;
use crate::state::AppState;

/// Public menu, registered as `/menu`.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(menu::get_menu))
}

/// Menu item management, registered as `/admin/menu-items`.
///
/// ```text
/// GET    /                          list
/// POST   /                          create
/// GET    /parent-choices            parent_choices_for_new
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      delete
/// GET    /{id}/parent-choices       parent_choices
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::list).post(menu::create))
        .route("/parent-choices", get(menu::parent_choices_for_new))
        .route(
            "/{id}",
            get(menu::get_by_id).put(menu::update).delete(menu::delete),
        )
        .route("/{id}/parent-choices", get(menu::parent_choices))
}
