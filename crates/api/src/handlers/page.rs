//! Handlers for pages: the public page detail and admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::error::CoreError;
use clubsite_core::menu::build_menu;
use clubsite_core::page::{validate_template_name, validate_title, PAGE_TITLE_MAX};
use clubsite_core::slug::{validate_slug, PAGE_SLUG_MAX};
use clubsite_core::types::DbId;
use clubsite_db::models::page::{CreatePage, Page, UpdatePage};
use clubsite_db::repositories::{
    BlockRepo, BlockTypeRepo, ContentBlockItemRepo, ContentBlockRepo, MenuItemRepo, PageRepo,
};

use crate::error::{AppError, AppResult};
use crate::render::{describe_blocks, PageContent, PageDetail};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Page", id })
}

/// Check an explicit slug's format and that no other page uses it.
async fn check_explicit_slug(
    pool: &sqlx::PgPool,
    slug: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    validate_slug(slug, PAGE_SLUG_MAX)?;
    if PageRepo::slug_exists(pool, slug, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A page with slug '{slug}' already exists"
        ))));
    }
    Ok(())
}

fn explicit_slug(slug: &Option<String>) -> Option<&str> {
    slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/pages/{slug}
///
/// A published page with its assembled blocks and the navigation menu.
/// Missing and unpublished pages are both 404.
pub async fn get_published(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PageDetail>> {
    let page = PageRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "Page",
                slug: slug.clone(),
            })
        })?;

    let typed = ContentBlockRepo::list_active_for_page(&state.pool, page.id).await?;
    let generic = BlockRepo::list_active_for_page(&state.pool, page.id).await?;
    let styles = ContentBlockRepo::styles_for(&state.pool, &typed).await?;
    let typed_ids: Vec<DbId> = typed.iter().map(|b| b.id).collect();
    let items = ContentBlockItemRepo::list_for_blocks(&state.pool, &typed_ids).await?;
    let block_types = BlockTypeRepo::list(&state.pool).await?;
    let menu_nodes = MenuItemRepo::list_all(&state.pool).await?;

    let blocks = describe_blocks(PageContent {
        typed,
        generic,
        styles,
        items,
        block_types,
    });
    tracing::debug!(page_id = page.id, block_count = blocks.len(), "Page assembled");

    Ok(Json(PageDetail {
        page: page.into(),
        blocks,
        menu: build_menu(&menu_nodes),
    }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/pages
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Page>>> {
    let pages = PageRepo::list(&state.pool).await?;
    Ok(Json(pages))
}

/// POST /api/v1/admin/pages
///
/// Derives the slug from the title when none is given, then provisions the
/// page's compulsory blocks.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<Page>)> {
    validate_title("title", &input.title, PAGE_TITLE_MAX)?;
    if let Some(ref template_name) = input.template_name {
        validate_template_name(template_name)?;
    }
    if let Some(slug) = explicit_slug(&input.slug) {
        check_explicit_slug(&state.pool, slug, None).await?;
    }

    let page = PageRepo::save_new(&state.pool, &input).await?;
    tracing::info!(page_id = page.id, slug = %page.slug, "Page created");
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/v1/admin/pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Page>> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(page))
}

/// PUT /api/v1/admin/pages/{id}
///
/// A blank `slug` re-derives it from the (possibly new) title.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<Page>> {
    if let Some(ref title) = input.title {
        validate_title("title", title, PAGE_TITLE_MAX)?;
    }
    if let Some(ref template_name) = input.template_name {
        validate_template_name(template_name)?;
    }
    if let Some(slug) = explicit_slug(&input.slug) {
        check_explicit_slug(&state.pool, slug, Some(id)).await?;
    }

    let page = PageRepo::save_existing(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(page_id = page.id, slug = %page.slug, "Page updated");
    Ok(Json(page))
}

/// DELETE /api/v1/admin/pages/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PageRepo::delete(&state.pool, id).await? {
        tracing::info!(page_id = id, "Page deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Fetch a page by id or return 404.
pub(crate) async fn ensure_page_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Page> {
    PageRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}
