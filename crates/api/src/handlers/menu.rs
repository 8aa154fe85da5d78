//! Handlers for the navigation menu.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::error::CoreError;
use clubsite_core::menu::{build_menu, valid_parent_choices, validate_reparent, MenuEntry};
use clubsite_core::page::{
    validate_max_len, validate_sort_order, validate_title, MENU_SLUG_MAX, MENU_TITLE_MAX,
    MENU_URL_MAX,
};
use clubsite_core::types::DbId;
use clubsite_db::models::menu_item::{CreateMenuItem, MenuItem, ParentChoice, UpdateMenuItem};
use clubsite_db::repositories::{MenuItemRepo, PageRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MenuItem",
        id,
    })
}

fn validate_fields(
    slug: Option<&str>,
    url: Option<&str>,
    sort_order: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(slug) = slug {
        validate_max_len("slug", slug, MENU_SLUG_MAX)?;
    }
    if let Some(url) = url {
        validate_max_len("url", url, MENU_URL_MAX)?;
    }
    if let Some(order) = sort_order {
        validate_sort_order(order)?;
    }
    Ok(())
}

/// Referenced rows must exist; the database would only say "constraint".
async fn check_links(
    pool: &sqlx::PgPool,
    parent_id: Option<DbId>,
    page_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(parent_id) = parent_id {
        MenuItemRepo::find_by_id(pool, parent_id)
            .await?
            .ok_or_else(|| not_found(parent_id))?;
    }
    if let Some(page_id) = page_id {
        PageRepo::find_by_id(pool, page_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Page",
                    id: page_id,
                })
            })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/menu
///
/// Active top-level items with their active children.
pub async fn get_menu(State(state): State<AppState>) -> AppResult<Json<Vec<MenuEntry>>> {
    let nodes = MenuItemRepo::list_all(&state.pool).await?;
    Ok(Json(build_menu(&nodes)))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/menu-items
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = MenuItemRepo::list(&state.pool).await?;
    Ok(Json(items))
}

/// POST /api/v1/admin/menu-items
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    validate_title("title", &input.title, MENU_TITLE_MAX)?;
    validate_fields(input.slug.as_deref(), input.url.as_deref(), input.sort_order)?;
    check_links(&state.pool, input.parent_id, input.page_id).await?;
    if input.parent_id.is_some() {
        let nodes = MenuItemRepo::list_all(&state.pool).await?;
        validate_reparent(&nodes, None, input.parent_id)?;
    }

    let item = MenuItemRepo::create(&state.pool, &input).await?;
    tracing::info!(menu_item_id = item.id, parent_id = ?item.parent_id, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/admin/menu-items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MenuItem>> {
    let item = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// PUT /api/v1/admin/menu-items/{id}
///
/// Moving an item under itself, one of its descendants or an inactive item
/// is rejected.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<Json<MenuItem>> {
    if let Some(ref title) = input.title {
        validate_title("title", title, MENU_TITLE_MAX)?;
    }
    validate_fields(input.slug.as_deref(), input.url.as_deref(), input.sort_order)?;

    // Parent changes are checked and written under the tree lock.
    let mut tx = state.pool.begin().await?;
    if let Some(new_parent) = input.parent_id {
        MenuItemRepo::lock_tree(&mut *tx).await?;
        let nodes = MenuItemRepo::list_all(&mut *tx).await?;
        if !nodes.iter().any(|n| n.id == id) {
            return Err(not_found(id));
        }
        validate_reparent(&nodes, Some(id), new_parent)?;
    }
    check_links(
        &state.pool,
        input.parent_id.flatten(),
        input.page_id.flatten(),
    )
    .await?;

    let item = MenuItemRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;
    tracing::info!(menu_item_id = item.id, parent_id = ?item.parent_id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/v1/admin/menu-items/{id}
///
/// Children are deleted with their parent.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MenuItemRepo::delete(&state.pool, id).await? {
        tracing::info!(menu_item_id = id, "Menu item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/admin/menu-items/{id}/parent-choices
///
/// Active items that may become this item's parent: everything except the
/// item itself and its descendants, ordered by `(order, title)`.
pub async fn parent_choices(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ParentChoice>>> {
    let nodes = MenuItemRepo::list_all(&state.pool).await?;
    if !nodes.iter().any(|n| n.id == id) {
        return Err(not_found(id));
    }
    let choices = valid_parent_choices(&nodes, Some(id))
        .into_iter()
        .map(|n| ParentChoice {
            id: n.id,
            title: n.title.clone(),
        })
        .collect();
    Ok(Json(choices))
}

/// GET /api/v1/admin/menu-items/parent-choices
///
/// Parent choices for an item not yet created: every active item.
pub async fn parent_choices_for_new(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ParentChoice>>> {
    let nodes = MenuItemRepo::list_all(&state.pool).await?;
    let choices = valid_parent_choices(&nodes, None)
        .into_iter()
        .map(|n| ParentChoice {
            id: n.id,
            title: n.title.clone(),
        })
        .collect();
    Ok(Json(choices))
}
