//! Block type registry models.

use clubsite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `block_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlockType {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Every page gets one generic block of this type when it is saved.
    pub is_compulsory: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlockType {
    pub name: String,
    /// Derived from the name when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_compulsory: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlockType {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_compulsory: Option<bool>,
}
