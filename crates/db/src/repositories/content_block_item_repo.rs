//! Repository for the `content_block_items` table.
//!
//! Items are always read in `(sort_order, id)` order.

use clubsite_core::types::{DbId, SortOrder};
use sqlx::PgPool;

use crate::models::content_block::ContentBlockItem;

/// Column list for content_block_items queries.
const COLUMNS: &str = "id, block_id, sort_order, payload, created_at, updated_at";

/// Provides CRUD operations for the child rows of typed blocks.
pub struct ContentBlockItemRepo;

impl ContentBlockItemRepo {
    /// Insert an item. `payload` must already be validated against the
    /// parent block's kind.
    pub async fn create(
        pool: &PgPool,
        block_id: DbId,
        sort_order: Option<SortOrder>,
        payload: &serde_json::Value,
    ) -> Result<ContentBlockItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_block_items (block_id, sort_order, payload)
             VALUES ($1, COALESCE($2, 0), $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentBlockItem>(&query)
            .bind(block_id)
            .bind(sort_order)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContentBlockItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_block_items WHERE id = $1");
        sqlx::query_as::<_, ContentBlockItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_block(
        pool: &PgPool,
        block_id: DbId,
    ) -> Result<Vec<ContentBlockItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_block_items
             WHERE block_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ContentBlockItem>(&query)
            .bind(block_id)
            .fetch_all(pool)
            .await
    }

    /// Items of several blocks in one query, grouped by block.
    pub async fn list_for_blocks(
        pool: &PgPool,
        block_ids: &[DbId],
    ) -> Result<Vec<ContentBlockItem>, sqlx::Error> {
        if block_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM content_block_items
             WHERE block_id = ANY($1)
             ORDER BY block_id ASC, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ContentBlockItem>(&query)
            .bind(block_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        sort_order: Option<SortOrder>,
        payload: Option<&serde_json::Value>,
    ) -> Result<Option<ContentBlockItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_block_items SET
                sort_order = COALESCE($2, sort_order),
                payload = COALESCE($3, payload)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentBlockItem>(&query)
            .bind(id)
            .bind(sort_order)
            .bind(payload)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_block_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
