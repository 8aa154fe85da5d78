//! Repository for the `blocks` table (generic, free-form blocks).

use clubsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::block::{Block, CreateBlock, UpdateBlock};

/// Column list for blocks queries.
const COLUMNS: &str = "id, page_id, block_type_id, title, content, sort_order, is_active, \
    created_at, updated_at";

/// Provides CRUD operations for generic blocks.
pub struct BlockRepo;

impl BlockRepo {
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        input: &CreateBlock,
    ) -> Result<Block, sqlx::Error> {
        let query = format!(
            "INSERT INTO blocks (page_id, block_type_id, title, content, sort_order, is_active)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, 0), COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(page_id)
            .bind(input.block_type_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Block>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blocks WHERE id = $1");
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All generic blocks of a page, active or not, in render order.
    pub async fn list_for_page(pool: &PgPool, page_id: DbId) -> Result<Vec<Block>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocks WHERE page_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_active_for_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<Block>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocks
             WHERE page_id = $1 AND is_active = true
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Number of generic blocks of `block_type_id` on a page.
    pub async fn count_for_page_and_type(
        pool: &PgPool,
        page_id: DbId,
        block_type_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM blocks WHERE page_id = $1 AND block_type_id = $2",
        )
        .bind(page_id)
        .bind(block_type_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlock,
    ) -> Result<Option<Block>, sqlx::Error> {
        let query = format!(
            "UPDATE blocks SET
                block_type_id = COALESCE($2, block_type_id),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                sort_order = COALESCE($5, sort_order),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .bind(input.block_type_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blocks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
