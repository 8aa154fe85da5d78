//! Handler listing the typed block kinds.

use axum::Json;
use clubsite_core::blocks::{registry, BlockKindInfo};

/// GET /api/v1/admin/block-kinds
pub async fn list() -> Json<Vec<BlockKindInfo>> {
    Json(registry())
}
