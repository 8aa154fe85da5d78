//! Repository for the `content_blocks` table (typed blocks).
//!
//! Every typed block owns exactly one `style_options` row. The row is
//! created in the same transaction as the block and removed with it.

use clubsite_core::style::StyleOptions;
use clubsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::content_block::{ContentBlock, CreateContentBlock, UpdateContentBlock};
use crate::models::style_options::StyleOptionsRow;
use crate::repositories::StyleOptionsRepo;

/// Column list for content_blocks queries.
const COLUMNS: &str = "id, page_id, kind, sort_order, is_active, style_options_id, payload, \
    created_at, updated_at";

/// Provides CRUD operations for typed blocks and their style ownership.
pub struct ContentBlockRepo;

impl ContentBlockRepo {
    /// Create a typed block with its style options row in one transaction.
    ///
    /// `payload` is the validated, normalized payload for `input.kind`;
    /// styling comes from `input.style` or the defaults.
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        input: &CreateContentBlock,
        payload: &serde_json::Value,
    ) -> Result<ContentBlock, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let style = input.style.clone().unwrap_or_default();
        let style_row = StyleOptionsRepo::create(&mut *tx, &style).await?;

        let query = format!(
            "INSERT INTO content_blocks (page_id, kind, sort_order, is_active, style_options_id, payload)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, true), $5, $6)
             RETURNING {COLUMNS}"
        );
        let block = sqlx::query_as::<_, ContentBlock>(&query)
            .bind(page_id)
            .bind(input.kind.as_str())
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(style_row.id)
            .bind(payload)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(block)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentBlock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_blocks WHERE id = $1");
        sqlx::query_as::<_, ContentBlock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All typed blocks of a page, active or not, in render order.
    pub async fn list_for_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<ContentBlock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_blocks WHERE page_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ContentBlock>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_active_for_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<ContentBlock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_blocks
             WHERE page_id = $1 AND is_active = true
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ContentBlock>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Update a typed block. `payload`, when given, must already be
    /// validated against the block's kind.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContentBlock,
        payload: Option<&serde_json::Value>,
    ) -> Result<Option<ContentBlock>, sqlx::Error> {
        let query = format!(
            "UPDATE content_blocks SET
                sort_order = COALESCE($2, sort_order),
                is_active = COALESCE($3, is_active),
                payload = COALESCE($4, payload)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentBlock>(&query)
            .bind(id)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(payload)
            .fetch_optional(pool)
            .await
    }

    /// Delete a typed block, its items (by cascade) and its style options
    /// row, in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(Option<DbId>,)> = sqlx::query_as(
            "DELETE FROM content_blocks WHERE id = $1 RETURNING style_options_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((style_options_id,)) = deleted else {
            return Ok(false);
        };
        if let Some(style_id) = style_options_id {
            StyleOptionsRepo::delete(&mut *tx, style_id).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// The style options of a block, creating a default row if the block
    /// has lost its own. Returns `None` if the block does not exist.
    pub async fn ensure_style(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StyleOptionsRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(Option<DbId>,)> = sqlx::query_as(
            "SELECT style_options_id FROM content_blocks WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((style_options_id,)) = current else {
            return Ok(None);
        };

        let row = match style_options_id {
            Some(style_id) => StyleOptionsRepo::load(&mut *tx, style_id).await?,
            None => {
                let row = StyleOptionsRepo::create(&mut *tx, &StyleOptions::default()).await?;
                sqlx::query("UPDATE content_blocks SET style_options_id = $2 WHERE id = $1")
                    .bind(id)
                    .bind(row.id)
                    .execute(&mut *tx)
                    .await?;
                row
            }
        };

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Style options rows referenced by a set of blocks.
    pub async fn styles_for(
        pool: &PgPool,
        blocks: &[ContentBlock],
    ) -> Result<Vec<StyleOptionsRow>, sqlx::Error> {
        let ids: Vec<DbId> = blocks.iter().filter_map(|b| b.style_options_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        StyleOptionsRepo::find_many(pool, &ids).await
    }
}
