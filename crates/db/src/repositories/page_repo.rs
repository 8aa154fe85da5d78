//! Repository for the `pages` table.
//!
//! Saving a page is a two-step operation: the page row is written first,
//! then one generic block per compulsory block type is provisioned. The two
//! steps are separate statements; provisioning is idempotent, so a page
//! missing a compulsory block is repaired by its next save.

use std::collections::HashSet;

use clubsite_core::slug::{base_slug_for, resolve_unique_slug};
use clubsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, Page, UpdatePage};

/// Column list for pages queries.
const COLUMNS: &str = "id, title, slug, intro, content, is_published, template_name, \
    created_at, updated_at";

/// Escape LIKE wildcards so a slug base matches literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Provides CRUD operations and the save lifecycle for pages.
pub struct PageRepo;

impl PageRepo {
    // -----------------------------------------------------------------------
    // Slugs
    // -----------------------------------------------------------------------

    /// Existing slugs that could collide with `base` or `base-N`, ignoring
    /// the row `exclude_id` (the page being updated).
    pub async fn taken_slugs(
        pool: &PgPool,
        base: &str,
        exclude_id: Option<DbId>,
    ) -> Result<HashSet<String>, sqlx::Error> {
        let pattern = format!("{}-%", escape_like(base));
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT slug FROM pages
             WHERE (slug = $1 OR slug LIKE $2)
               AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(base)
        .bind(&pattern)
        .bind(exclude_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }

    /// Whether `slug` is used by a page other than `exclude_id`.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM pages WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Derive a free slug from `title`: `base`, `base-1`, `base-2`, ...
    pub async fn unique_slug(
        pool: &PgPool,
        title: &str,
        exclude_id: Option<DbId>,
    ) -> Result<String, sqlx::Error> {
        let base = base_slug_for(title);
        let taken = Self::taken_slugs(pool, &base, exclude_id).await?;
        Ok(resolve_unique_slug(&base, |candidate| taken.contains(candidate)))
    }

    // -----------------------------------------------------------------------
    // Save lifecycle
    // -----------------------------------------------------------------------

    /// Create a page, deriving its slug when none is given, then provision
    /// its compulsory blocks.
    pub async fn save_new(pool: &PgPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let slug = match input.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => Self::unique_slug(pool, &input.title, None).await?,
        };
        let page = Self::create(pool, input, &slug).await?;
        Self::provision_after_save(pool, page.id).await;
        Ok(page)
    }

    /// Update a page, re-deriving the slug when it is set to blank, then
    /// provision its compulsory blocks. Returns `None` if the page is missing.
    pub async fn save_existing(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let slug = match input.slug.as_deref().map(str::trim) {
            None => None,
            Some("") => {
                let title = input.title.as_deref().unwrap_or(&existing.title);
                Some(Self::unique_slug(pool, title, Some(id)).await?)
            }
            Some(slug) => Some(slug.to_string()),
        };

        let page = Self::update(pool, id, input, slug.as_deref()).await?;
        if let Some(ref page) = page {
            Self::provision_after_save(pool, page.id).await;
        }
        Ok(page)
    }

    /// The page row is already committed here; a provisioning failure is
    /// logged and left for the next save to repair.
    async fn provision_after_save(pool: &PgPool, page_id: DbId) {
        match Self::provision_compulsory_blocks(pool, page_id).await {
            Ok(0) => {}
            Ok(created) => {
                tracing::debug!(page_id, created, "Provisioned compulsory blocks");
            }
            Err(e) => {
                tracing::warn!(page_id, error = %e, "Compulsory block provisioning failed");
            }
        }
    }

    /// Ensure one generic block exists per compulsory block type for this
    /// page. Never deletes, never duplicates. Returns the number created.
    pub async fn provision_compulsory_blocks(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO blocks (page_id, block_type_id, content)
             SELECT $1, bt.id, ''
             FROM block_types bt
             WHERE bt.is_compulsory = true
               AND NOT EXISTS (
                   SELECT 1 FROM blocks b
                   WHERE b.page_id = $1 AND b.block_type_id = bt.id
               )",
        )
        .bind(page_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a page row with an already-resolved slug.
    pub async fn create(pool: &PgPool, input: &CreatePage, slug: &str) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (title, slug, intro, content, is_published, template_name)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, true), COALESCE($6, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.intro)
            .bind(&input.content)
            .bind(input.is_published)
            .bind(&input.template_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by slug only if it is published.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, Page>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List pages ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages ORDER BY title ASC, id ASC");
        sqlx::query_as::<_, Page>(&query).fetch_all(pool).await
    }

    /// Update a page. `slug` is the resolved replacement, if any.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
        slug: Option<&str>,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                intro = COALESCE($4, intro),
                content = COALESCE($5, content),
                is_published = COALESCE($6, is_published),
                template_name = COALESCE($7, template_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.intro)
            .bind(&input.content)
            .bind(input.is_published)
            .bind(&input.template_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a page; its blocks cascade. Returns `true` if a row was removed.
    ///
    /// Style options rows of the page's typed blocks are detached by the
    /// cascade and removed here in the same transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let style_ids: Vec<(Option<DbId>,)> =
            sqlx::query_as("SELECT style_options_id FROM content_blocks WHERE page_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let style_ids: Vec<DbId> = style_ids.into_iter().filter_map(|(id,)| id).collect();
        if !style_ids.is_empty() {
            sqlx::query("DELETE FROM style_options WHERE id = ANY($1)")
                .bind(&style_ids)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("team_a"), "team\\_a");
        assert_eq!(escape_like("50%-off"), "50\\%-off");
    }
}
