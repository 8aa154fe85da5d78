//! Page models and DTOs.

use clubsite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub intro: String,
    pub content: String,
    pub is_published: bool,
    /// Empty when the default page template applies.
    pub template_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub title: String,
    /// Derived from the title when absent or blank.
    pub slug: Option<String>,
    pub intro: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
    pub template_name: Option<String>,
}

/// DTO for updating a page. A blank `slug` re-derives it from the title.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub intro: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
    pub template_name: Option<String>,
}
