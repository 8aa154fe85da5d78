//! Repository for the `menu_items` table.

use clubsite_core::menu::MenuNode;
use clubsite_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::menu_item::{CreateMenuItem, MenuItem, MenuNodeRow, UpdateMenuItem};

/// Column list for menu_items queries.
const COLUMNS: &str = "id, title, slug, parent_id, page_id, url, sort_order, is_active, \
    created_at, updated_at";

/// Provides CRUD operations for navigation menu items.
pub struct MenuItemRepo;

impl MenuItemRepo {
    pub async fn create(pool: &PgPool, input: &CreateMenuItem) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items (title, slug, parent_id, page_id, url, sort_order, is_active)
             VALUES ($1, COALESCE($2, ''), $3, $4, COALESCE($5, ''), COALESCE($6, 0), COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(input.parent_id)
            .bind(input.page_id)
            .bind(&input.url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all menu items ordered by `(sort_order, title)`.
    pub async fn list(pool: &PgPool) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items ORDER BY sort_order ASC, title ASC, id ASC"
        );
        sqlx::query_as::<_, MenuItem>(&query).fetch_all(pool).await
    }

    /// Serialize tree changes until the caller's transaction ends. Reads
    /// are not blocked.
    pub async fn lock_tree(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("LOCK TABLE menu_items IN SHARE ROW EXCLUSIVE MODE")
            .execute(conn)
            .await?;
        Ok(())
    }

    /// The whole menu as a flat arena, each row carrying its linked page's
    /// slug.
    pub async fn list_all<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<MenuNode>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MenuNodeRow>(
            "SELECT m.id, m.parent_id, m.title, p.slug AS page_slug, m.url,
                    m.sort_order, m.is_active
             FROM menu_items m
             LEFT JOIN pages p ON p.id = m.page_id
             ORDER BY m.sort_order ASC, m.title ASC, m.id ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(MenuNode::from).collect())
    }

    /// Update a menu item. `parent_id` / `page_id` of `Some(None)` clear
    /// the link; `None` leaves it unchanged.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END,
                page_id = CASE WHEN $6 THEN $7 ELSE page_id END,
                url = COALESCE($8, url),
                sort_order = COALESCE($9, sort_order),
                is_active = COALESCE($10, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .bind(input.page_id.is_some())
            .bind(input.page_id.flatten())
            .bind(&input.url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(executor)
            .await
    }

    /// Delete a menu item; its children cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
