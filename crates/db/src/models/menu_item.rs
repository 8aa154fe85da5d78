//! Navigation menu models.

use clubsite_core::menu::MenuNode;
use clubsite_core::types::{DbId, SortOrder, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub page_id: Option<DbId>,
    pub url: String,
    pub sort_order: SortOrder,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A menu row joined with its linked page's slug, used to build the tree.
#[derive(Debug, Clone, FromRow)]
pub struct MenuNodeRow {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub page_slug: Option<String>,
    pub url: String,
    pub sort_order: SortOrder,
    pub is_active: bool,
}

impl From<MenuNodeRow> for MenuNode {
    fn from(row: MenuNodeRow) -> Self {
        MenuNode {
            id: row.id,
            parent_id: row.parent_id,
            title: row.title,
            page_slug: row.page_slug,
            url: row.url,
            order: row.sort_order,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItem {
    pub title: String,
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    pub page_id: Option<DbId>,
    pub url: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub is_active: Option<bool>,
}

/// DTO for updating a menu item. `parent_id` / `page_id` set to `null`
/// detach the item; omitting them leaves the link unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItem {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub page_id: Option<Option<DbId>>,
    pub url: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub is_active: Option<bool>,
}

/// An entry in the parent picker for a menu item.
#[derive(Debug, Clone, Serialize)]
pub struct ParentChoice {
    pub id: DbId,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent() {
        let absent: UpdateMenuItem = serde_json::from_str(r#"{"title": "News"}"#).unwrap();
        assert_eq!(absent.parent_id, None);

        let cleared: UpdateMenuItem = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        assert_eq!(cleared.parent_id, Some(None));

        let set: UpdateMenuItem = serde_json::from_str(r#"{"parent_id": 4}"#).unwrap();
        assert_eq!(set.parent_id, Some(Some(4)));
    }
}
