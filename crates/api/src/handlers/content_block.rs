//! Handlers for typed content blocks, their styling and child items.
//!
//! Payloads are parsed against the block's kind before they are stored, so
//! the JSON columns only ever hold shapes the render layer knows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::blocks::{BlockPayload, ItemPayload};
use clubsite_core::error::CoreError;
use clubsite_core::page::validate_sort_order;
use clubsite_core::style::ResolvedStyle;
use clubsite_core::types::DbId;
use clubsite_db::models::content_block::{
    ContentBlock, ContentBlockItem, CreateContentBlock, CreateContentBlockItem,
    UpdateContentBlock, UpdateContentBlockItem,
};
use clubsite_db::models::style_options::{StyleOptionsRow, UpdateStyleOptions};
use clubsite_db::repositories::{ContentBlockItemRepo, ContentBlockRepo, StyleOptionsRepo};
use serde::Serialize;

use super::page::ensure_page_exists;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A block's stored style options alongside their resolved form.
#[derive(Debug, Serialize)]
pub struct StyleResponse {
    #[serde(flatten)]
    pub options: StyleOptionsRow,
    pub resolved: ResolvedStyle,
}

impl From<StyleOptionsRow> for StyleResponse {
    fn from(options: StyleOptionsRow) -> Self {
        let resolved = options.options().resolve();
        Self { options, resolved }
    }
}

fn block_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ContentBlock",
        id,
    })
}

fn item_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ContentBlockItem",
        id,
    })
}

async fn ensure_block(pool: &sqlx::PgPool, id: DbId) -> AppResult<ContentBlock> {
    ContentBlockRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| block_not_found(id))
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/pages/{id}/content-blocks
pub async fn list_for_page(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<ContentBlock>>> {
    ensure_page_exists(&state.pool, page_id).await?;
    let blocks = ContentBlockRepo::list_for_page(&state.pool, page_id).await?;
    Ok(Json(blocks))
}

/// POST /api/v1/admin/pages/{id}/content-blocks
///
/// Creates the block and its style options together.
pub async fn create(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateContentBlock>,
) -> AppResult<(StatusCode, Json<ContentBlock>)> {
    if let Some(order) = input.sort_order {
        validate_sort_order(order)?;
    }
    if let Some(ref style) = input.style {
        style.validate()?;
    }
    let payload =
        BlockPayload::parse_valid(input.kind, input.payload.clone().unwrap_or_default())?.to_json()?;
    ensure_page_exists(&state.pool, page_id).await?;

    let block = ContentBlockRepo::create(&state.pool, page_id, &input, &payload).await?;
    tracing::info!(
        block_id = block.id,
        page_id,
        kind = %block.kind,
        "Content block created",
    );
    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/v1/admin/content-blocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContentBlock>> {
    Ok(Json(ensure_block(&state.pool, id).await?))
}

/// PUT /api/v1/admin/content-blocks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentBlock>,
) -> AppResult<Json<ContentBlock>> {
    if let Some(order) = input.sort_order {
        validate_sort_order(order)?;
    }
    let existing = ensure_block(&state.pool, id).await?;
    let payload = match input.payload.clone() {
        Some(value) => Some(BlockPayload::parse_valid(existing.kind, value)?.to_json()?),
        None => None,
    };

    let block = ContentBlockRepo::update(&state.pool, id, &input, payload.as_ref())
        .await?
        .ok_or_else(|| block_not_found(id))?;
    tracing::info!(block_id = block.id, "Content block updated");
    Ok(Json(block))
}

/// DELETE /api/v1/admin/content-blocks/{id}
///
/// Removes the block's items and style options with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ContentBlockRepo::delete(&state.pool, id).await? {
        tracing::info!(block_id = id, "Content block deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(block_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/content-blocks/{id}/style
pub async fn get_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StyleResponse>> {
    let row = ContentBlockRepo::ensure_style(&state.pool, id)
        .await?
        .ok_or_else(|| block_not_found(id))?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/admin/content-blocks/{id}/style
///
/// Partial update; omitted fields keep their stored value.
pub async fn update_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStyleOptions>,
) -> AppResult<Json<StyleResponse>> {
    let current = ContentBlockRepo::ensure_style(&state.pool, id)
        .await?
        .ok_or_else(|| block_not_found(id))?;

    let options = input.apply_to(current.options());
    options.validate()?;

    let row = StyleOptionsRepo::update(&state.pool, current.id, &options)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Style options {} vanished during update",
                current.id
            ))
        })?;
    tracing::info!(block_id = id, style_options_id = row.id, "Block style updated");
    Ok(Json(row.into()))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/content-blocks/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ContentBlockItem>>> {
    ensure_block(&state.pool, id).await?;
    let items = ContentBlockItemRepo::list_for_block(&state.pool, id).await?;
    Ok(Json(items))
}

/// POST /api/v1/admin/content-blocks/{id}/items
///
/// Only kinds with a child collection accept items.
pub async fn create_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateContentBlockItem>,
) -> AppResult<(StatusCode, Json<ContentBlockItem>)> {
    if let Some(order) = input.sort_order {
        validate_sort_order(order)?;
    }
    let block = ensure_block(&state.pool, id).await?;
    let payload = ItemPayload::parse_valid(block.kind, input.payload)?.to_json()?;

    let item = ContentBlockItemRepo::create(&state.pool, block.id, input.sort_order, &payload).await?;
    tracing::info!(item_id = item.id, block_id = block.id, "Content block item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/admin/content-block-items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentBlockItem>,
) -> AppResult<Json<ContentBlockItem>> {
    if let Some(order) = input.sort_order {
        validate_sort_order(order)?;
    }
    let existing = ContentBlockItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| item_not_found(id))?;

    let payload = match input.payload {
        Some(value) => {
            let block = ensure_block(&state.pool, existing.block_id).await?;
            Some(ItemPayload::parse_valid(block.kind, value)?.to_json()?)
        }
        None => None,
    };

    let item = ContentBlockItemRepo::update(&state.pool, id, input.sort_order, payload.as_ref())
        .await?
        .ok_or_else(|| item_not_found(id))?;
    tracing::info!(item_id = item.id, "Content block item updated");
    Ok(Json(item))
}

/// DELETE /api/v1/admin/content-block-items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContentBlockItemRepo::delete(&state.pool, id).await? {
        tracing::info!(item_id = id, "Content block item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(item_not_found(id))
    }
}
