//! Handlers for the block type registry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::error::CoreError;
use clubsite_core::page::{validate_title, BLOCK_TYPE_NAME_MAX, BLOCK_TYPE_SLUG_MAX};
use clubsite_core::slug::explicit_or_derived;
use clubsite_core::types::DbId;
use clubsite_db::models::block_type::{BlockType, CreateBlockType, UpdateBlockType};
use clubsite_db::repositories::BlockTypeRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BlockType",
        id,
    })
}

/// GET /api/v1/admin/block-types
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<BlockType>>> {
    let block_types = BlockTypeRepo::list(&state.pool).await?;
    Ok(Json(block_types))
}

/// POST /api/v1/admin/block-types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBlockType>,
) -> AppResult<(StatusCode, Json<BlockType>)> {
    validate_title("name", &input.name, BLOCK_TYPE_NAME_MAX)?;
    let slug = explicit_or_derived(input.slug.as_deref(), &input.name, BLOCK_TYPE_SLUG_MAX)?;

    let block_type = BlockTypeRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(
        block_type_id = block_type.id,
        slug = %block_type.slug,
        is_compulsory = block_type.is_compulsory,
        "Block type created",
    );
    Ok((StatusCode::CREATED, Json(block_type)))
}

/// GET /api/v1/admin/block-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlockType>> {
    let block_type = BlockTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(block_type))
}

/// PUT /api/v1/admin/block-types/{id}
///
/// A blank `slug` re-derives it from the (new or stored) name.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlockType>,
) -> AppResult<Json<BlockType>> {
    if let Some(ref name) = input.name {
        validate_title("name", name, BLOCK_TYPE_NAME_MAX)?;
    }
    let slug = match input.slug.as_deref() {
        None => None,
        Some(slug) => {
            let name = match input.name {
                Some(ref name) => name.clone(),
                None => {
                    BlockTypeRepo::find_by_id(&state.pool, id)
                        .await?
                        .ok_or_else(|| not_found(id))?
                        .name
                }
            };
            Some(explicit_or_derived(Some(slug), &name, BLOCK_TYPE_SLUG_MAX)?)
        }
    };

    let block_type = BlockTypeRepo::update(&state.pool, id, &input, slug.as_deref())
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(block_type_id = block_type.id, "Block type updated");
    Ok(Json(block_type))
}

/// DELETE /api/v1/admin/block-types/{id}
///
/// Rejected with 400 while any generic block still uses the type.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BlockTypeRepo::delete(&state.pool, id).await? {
        tracing::info!(block_type_id = id, "Block type deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
