//! Repository for the `block_types` table.

use clubsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::block_type::{BlockType, CreateBlockType, UpdateBlockType};

/// Column list for block_types queries.
const COLUMNS: &str = "id, name, slug, description, is_compulsory, created_at, updated_at";

/// Provides CRUD operations for block types.
///
/// Slugs are resolved by the caller; `input.slug` is ignored here.
pub struct BlockTypeRepo;

impl BlockTypeRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlockType,
        slug: &str,
    ) -> Result<BlockType, sqlx::Error> {
        let query = format!(
            "INSERT INTO block_types (name, slug, description, is_compulsory)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockType>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(input.is_compulsory)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlockType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block_types WHERE id = $1");
        sqlx::query_as::<_, BlockType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all block types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<BlockType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block_types ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, BlockType>(&query).fetch_all(pool).await
    }

    /// Block types every page must carry at least one generic block of.
    pub async fn list_compulsory(pool: &PgPool) -> Result<Vec<BlockType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM block_types WHERE is_compulsory = true ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, BlockType>(&query).fetch_all(pool).await
    }

    /// Update a block type. `slug` of `None` keeps the stored one.
    ///
    /// Turning `is_compulsory` off leaves existing blocks in place; turning
    /// it on affects each page on its next save.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlockType,
        slug: Option<&str>,
    ) -> Result<Option<BlockType>, sqlx::Error> {
        let query = format!(
            "UPDATE block_types SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                is_compulsory = COALESCE($5, is_compulsory)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(input.is_compulsory)
            .fetch_optional(pool)
            .await
    }

    /// Delete a block type. Fails with a foreign-key violation while any
    /// generic block still uses it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM block_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
