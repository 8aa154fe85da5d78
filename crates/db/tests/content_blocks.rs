//! Integration tests for typed content blocks, their style options and
//! child items.

use clubsite_core::blocks::{BlockKind, BlockPayload, ItemPayload};
use clubsite_core::style::{HoverEffect, StyleOptions};
use clubsite_db::models::content_block::{CreateContentBlock, UpdateContentBlock};
use clubsite_db::models::page::CreatePage;
use clubsite_db::repositories::{
    ContentBlockItemRepo, ContentBlockRepo, PageRepo, StyleOptionsRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_page(pool: &PgPool, title: &str) -> i64 {
    let input = CreatePage {
        title: title.to_string(),
        slug: None,
        intro: None,
        content: None,
        is_published: None,
        template_name: None,
    };
    PageRepo::save_new(pool, &input).await.unwrap().id
}

fn new_block(kind: BlockKind, sort_order: i32) -> CreateContentBlock {
    CreateContentBlock {
        kind,
        sort_order: Some(sort_order),
        is_active: None,
        payload: None,
        style: None,
    }
}

async fn create_block(pool: &PgPool, page_id: i64, input: &CreateContentBlock) -> i64 {
    let payload = BlockPayload::parse_valid(input.kind, input.payload.clone().unwrap_or_default())
        .unwrap()
        .to_json()
        .unwrap();
    ContentBlockRepo::create(pool, page_id, input, &payload)
        .await
        .unwrap()
        .id
}

async fn style_row_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM style_options")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Style ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_attaches_default_style(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let id = create_block(&pool, page_id, &new_block(BlockKind::Faq, 0)).await;

    let block = ContentBlockRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(block.kind, BlockKind::Faq);
    let style_id = block.style_options_id.expect("style row attached");

    let style = StyleOptionsRepo::find_by_id(&pool, style_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(style.options(), StyleOptions::default());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_uses_given_style(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let mut input = new_block(BlockKind::Gallery, 0);
    input.style = Some(StyleOptions {
        hover_effect: HoverEffect::Zoom,
        shadow: true,
        ..StyleOptions::default()
    });
    let id = create_block(&pool, page_id, &input).await;

    let style = ContentBlockRepo::ensure_style(&pool, id).await.unwrap().unwrap();
    assert_eq!(style.hover_effect, HoverEffect::Zoom);
    assert!(style.shadow);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_create_leaves_no_style_row(pool: PgPool) {
    // Unknown page: the block insert fails and the style row rolls back.
    let payload = json!({});
    let result =
        ContentBlockRepo::create(&pool, 999_999, &new_block(BlockKind::Faq, 0), &payload).await;
    assert!(result.is_err());
    assert_eq!(style_row_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ensure_style_reattaches_missing_row(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let id = create_block(&pool, page_id, &new_block(BlockKind::Timeline, 0)).await;
    let block = ContentBlockRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    // Removing the style row nulls the reference.
    sqlx::query("DELETE FROM style_options WHERE id = $1")
        .bind(block.style_options_id)
        .execute(&pool)
        .await
        .unwrap();

    let style = ContentBlockRepo::ensure_style(&pool, id).await.unwrap().unwrap();
    let block = ContentBlockRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(block.style_options_id, Some(style.id));

    assert!(ContentBlockRepo::ensure_style(&pool, 999_999)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_style_row(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let id = create_block(&pool, page_id, &new_block(BlockKind::CounterStats, 0)).await;
    assert_eq!(style_row_count(&pool).await, 1);

    assert!(ContentBlockRepo::delete(&pool, id).await.unwrap());
    assert_eq!(style_row_count(&pool).await, 0);
    assert!(!ContentBlockRepo::delete(&pool, id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_delete_removes_style_rows(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    create_block(&pool, page_id, &new_block(BlockKind::Faq, 0)).await;
    create_block(&pool, page_id, &new_block(BlockKind::Gallery, 1)).await;

    PageRepo::delete(&pool, page_id).await.unwrap();
    assert_eq!(style_row_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_active_excludes_inactive(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let shown = create_block(&pool, page_id, &new_block(BlockKind::Faq, 1)).await;
    let mut hidden = new_block(BlockKind::Gallery, 0);
    hidden.is_active = Some(false);
    create_block(&pool, page_id, &hidden).await;

    let all = ContentBlockRepo::list_for_page(&pool, page_id).await.unwrap();
    assert_eq!(all.len(), 2);

    let active = ContentBlockRepo::list_active_for_page(&pool, page_id)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, shown);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_changes_only_given_fields(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let mut input = new_block(BlockKind::CallToAction, 2);
    input.payload = Some(json!({"heading": "Join the club"}));
    let id = create_block(&pool, page_id, &input).await;

    let update = UpdateContentBlock {
        is_active: Some(false),
        ..Default::default()
    };
    let block = ContentBlockRepo::update(&pool, id, &update, None)
        .await
        .unwrap()
        .unwrap();
    assert!(!block.is_active);
    assert_eq!(block.sort_order, 2);
    assert_eq!(block.payload["heading"], "Join the club");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_kind_is_rejected_by_schema(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let result = sqlx::query("INSERT INTO content_blocks (page_id, kind) VALUES ($1, 'carousel')")
        .bind(page_id)
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

fn faq(question: &str) -> serde_json::Value {
    ItemPayload::parse_valid(BlockKind::Faq, json!({"question": question, "answer": "Yes"}))
        .unwrap()
        .to_json()
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_items_are_ordered_by_order_then_id(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let block_id = create_block(&pool, page_id, &new_block(BlockKind::Faq, 0)).await;

    let late = ContentBlockItemRepo::create(&pool, block_id, Some(2), &faq("Late"))
        .await
        .unwrap();
    let first = ContentBlockItemRepo::create(&pool, block_id, Some(1), &faq("First"))
        .await
        .unwrap();
    let second = ContentBlockItemRepo::create(&pool, block_id, Some(1), &faq("Second"))
        .await
        .unwrap();

    let ids: Vec<i64> = ContentBlockItemRepo::list_for_block(&pool, block_id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id, late.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_items_for_several_blocks_are_grouped(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let a = create_block(&pool, page_id, &new_block(BlockKind::Faq, 0)).await;
    let b = create_block(&pool, page_id, &new_block(BlockKind::Faq, 1)).await;

    ContentBlockItemRepo::create(&pool, b, Some(0), &faq("B1")).await.unwrap();
    ContentBlockItemRepo::create(&pool, a, Some(0), &faq("A1")).await.unwrap();

    let items = ContentBlockItemRepo::list_for_blocks(&pool, &[a, b]).await.unwrap();
    let owners: Vec<i64> = items.iter().map(|i| i.block_id).collect();
    assert_eq!(owners, vec![a, b]);

    assert!(ContentBlockItemRepo::list_for_blocks(&pool, &[])
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_block_cascades_items(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let block_id = create_block(&pool, page_id, &new_block(BlockKind::Faq, 0)).await;
    let item = ContentBlockItemRepo::create(&pool, block_id, None, &faq("Q"))
        .await
        .unwrap();

    ContentBlockRepo::delete(&pool, block_id).await.unwrap();
    assert!(ContentBlockItemRepo::find_by_id(&pool, item.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_update_and_delete(pool: PgPool) {
    let page_id = new_page(&pool, "Home").await;
    let block_id = create_block(&pool, page_id, &new_block(BlockKind::Faq, 0)).await;
    let item = ContentBlockItemRepo::create(&pool, block_id, None, &faq("Q"))
        .await
        .unwrap();
    assert_eq!(item.sort_order, 0);

    let updated = ContentBlockItemRepo::update(&pool, item.id, Some(4), Some(&faq("Q2")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.sort_order, 4);
    assert_eq!(updated.payload["question"], "Q2");

    assert!(ContentBlockItemRepo::delete(&pool, item.id).await.unwrap());
    assert!(!ContentBlockItemRepo::delete(&pool, item.id).await.unwrap());
}
