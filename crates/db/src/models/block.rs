//! Generic (free-form) block models.

use clubsite_core::assembly::RenderBlock;
use clubsite_core::blocks::GENERIC_TEMPLATE_KEY;
use clubsite_core::types::{DbId, SortOrder, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blocks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Block {
    pub id: DbId,
    pub page_id: DbId,
    pub block_type_id: DbId,
    pub title: String,
    pub content: String,
    pub sort_order: SortOrder,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RenderBlock for Block {
    fn id(&self) -> DbId {
        self.id
    }

    fn order(&self) -> SortOrder {
        self.sort_order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn template_key(&self) -> &'static str {
        GENERIC_TEMPLATE_KEY
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlock {
    pub block_type_id: DbId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlock {
    pub block_type_id: Option<DbId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub is_active: Option<bool>,
}
