//! Handlers for generic (free-form) blocks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::error::CoreError;
use clubsite_core::page::{validate_max_len, validate_sort_order, BLOCK_TITLE_MAX};
use clubsite_core::types::DbId;
use clubsite_db::models::block::{Block, CreateBlock, UpdateBlock};
use clubsite_db::repositories::{BlockRepo, BlockTypeRepo};

use super::page::ensure_page_exists;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Block", id })
}

async fn ensure_block_type_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    BlockTypeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlockType",
            id,
        }))?;
    Ok(())
}

fn validate_fields(title: Option<&str>, sort_order: Option<i32>) -> Result<(), CoreError> {
    if let Some(title) = title {
        validate_max_len("title", title, BLOCK_TITLE_MAX)?;
    }
    if let Some(order) = sort_order {
        validate_sort_order(order)?;
    }
    Ok(())
}

/// GET /api/v1/admin/pages/{id}/blocks
pub async fn list_for_page(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<Block>>> {
    ensure_page_exists(&state.pool, page_id).await?;
    let blocks = BlockRepo::list_for_page(&state.pool, page_id).await?;
    Ok(Json(blocks))
}

/// POST /api/v1/admin/pages/{id}/blocks
pub async fn create(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateBlock>,
) -> AppResult<(StatusCode, Json<Block>)> {
    validate_fields(input.title.as_deref(), input.sort_order)?;
    ensure_page_exists(&state.pool, page_id).await?;
    ensure_block_type_exists(&state.pool, input.block_type_id).await?;

    let block = BlockRepo::create(&state.pool, page_id, &input).await?;
    tracing::info!(block_id = block.id, page_id, "Block created");
    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/v1/admin/blocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Block>> {
    let block = BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(block))
}

/// PUT /api/v1/admin/blocks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlock>,
) -> AppResult<Json<Block>> {
    validate_fields(input.title.as_deref(), input.sort_order)?;
    if let Some(block_type_id) = input.block_type_id {
        ensure_block_type_exists(&state.pool, block_type_id).await?;
    }

    let block = BlockRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(block_id = block.id, "Block updated");
    Ok(Json(block))
}

/// DELETE /api/v1/admin/blocks/{id}
///
/// Compulsory blocks may be deleted; the page regains one on its next save.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BlockRepo::delete(&state.pool, id).await? {
        tracing::info!(block_id = id, "Block deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
