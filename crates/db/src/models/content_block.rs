//! Typed content blocks and their child items.

use clubsite_core::assembly::RenderBlock;
use clubsite_core::blocks::BlockKind;
use clubsite_core::style::StyleOptions;
use clubsite_core::types::{DbId, SortOrder, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `content_blocks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentBlock {
    pub id: DbId,
    pub page_id: DbId,
    #[sqlx(try_from = "String")]
    pub kind: BlockKind,
    pub sort_order: SortOrder,
    pub is_active: bool,
    pub style_options_id: Option<DbId>,
    /// Kind-specific fields; schema owned by `clubsite_core::blocks`.
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RenderBlock for ContentBlock {
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
        self.kind.template_key()
    }
}

/// DTO for creating a typed block. The style options row is created in the
/// same call, from `style` or from defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentBlock {
    pub kind: BlockKind,
    pub sort_order: Option<SortOrder>,
    pub is_active: Option<bool>,
    pub payload: Option<serde_json::Value>,
    pub style: Option<StyleOptions>,
}

/// DTO for updating a typed block. The kind is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentBlock {
    pub sort_order: Option<SortOrder>,
    pub is_active: Option<bool>,
    pub payload: Option<serde_json::Value>,
}

/// A row from the `content_block_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentBlockItem {
    pub id: DbId,
    pub block_id: DbId,
    pub sort_order: SortOrder,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentBlockItem {
    pub sort_order: Option<SortOrder>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentBlockItem {
    pub sort_order: Option<SortOrder>,
    pub payload: Option<serde_json::Value>,
}
