use axum::routing::get;
use axum::Router;

use crate::handlers::block_type;
use crate::state::AppState;

/// Block type routes, registered as `/admin/block-types`.
///
/// ```text
/// GET    /                          list
/// POST   /                          create
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(block_type::list).post(block_type::create))
        .route(
            "/{id}",
            get(block_type::get_by_id)
                .put(block_type::update)
                .delete(block_type::delete),
        )
}
