//! HTTP-level tests for page management and the public page detail.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_page_derives_slug(pool: PgPool) {
    let first = create(&pool, "/api/v1/admin/pages", json!({"title": "Club News"})).await;
    let second = create(&pool, "/api/v1/admin/pages", json!({"title": "Club News"})).await;

    assert_eq!(first["slug"], "club-news");
    assert_eq!(second["slug"], "club-news-1");
    assert_eq!(first["is_published"], true);
    assert_eq!(first["template_name"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_page_with_taken_slug_returns_409(pool: PgPool) {
    create(&pool, "/api/v1/admin/pages", json!({"title": "A", "slug": "shop"})).await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/admin/pages",
        json!({"title": "B", "slug": "shop"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_page_rejects_bad_input(pool: PgPool) {
    for body in [
        json!({"title": "   "}),
        json!({"title": "Ok", "slug": "Not A Slug"}),
        json!({"title": "Ok", "template_name": "../escape.html"}),
    ] {
        let response = post_json(build_test_app(pool.clone()), "/api/v1/admin/pages", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_crud_round_trip(pool: PgPool) {
    let page = create(&pool, "/api/v1/admin/pages", json!({"title": "Juniors"})).await;
    let id = page["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/pages/{id}"),
        json!({"intro": "Under 12s", "is_published": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["intro"], "Under 12s");
    assert_eq!(json["slug"], "juniors");

    let response = get(build_test_app(pool.clone()), "/api/v1/admin/pages").await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/admin/pages/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/admin/pages/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_saving_page_provisions_compulsory_blocks(pool: PgPool) {
    create(
        &pool,
        "/api/v1/admin/block-types",
        json!({"name": "Sponsor strip", "is_compulsory": true}),
    )
    .await;
    let page = create(&pool, "/api/v1/admin/pages", json!({"title": "Home"})).await;
    let id = page["id"].as_i64().unwrap();

    for _ in 0..3 {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/admin/pages/{id}"),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/admin/pages/{id}/blocks"),
    )
    .await;
    let blocks = body_json(response).await;
    assert_eq!(blocks.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_type_in_use_cannot_be_deleted(pool: PgPool) {
    let block_type = create(
        &pool,
        "/api/v1/admin/block-types",
        json!({"name": "Header", "is_compulsory": true}),
    )
    .await;
    assert_eq!(block_type["slug"], "header");
    create(&pool, "/api/v1/admin/pages", json!({"title": "Home"})).await;

    let id = block_type["id"].as_i64().unwrap();
    let response = delete(
        build_test_app(pool),
        &format!("/api/v1/admin/block-types/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_type_slug_is_transliterated_from_name(pool: PgPool) {
    let block_type = create(
        &pool,
        "/api/v1/admin/block-types",
        json!({"name": "Équipe Sponsors"}),
    )
    .await;
    assert_eq!(block_type["slug"], "equipe-sponsors");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_type_name_without_slug_characters_needs_slug(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/admin/block-types",
        json!({"name": "!!!"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let block_type = create(
        &pool,
        "/api/v1/admin/block-types",
        json!({"name": "!!!", "slug": "alert"}),
    )
    .await;
    let id = block_type["id"].as_i64().unwrap();

    // Re-deriving from the stored name is rejected the same way.
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/admin/block-types/{id}"),
        json!({"slug": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Public detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_page_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/pages/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unpublished_page_returns_404(pool: PgPool) {
    create(
        &pool,
        "/api/v1/admin/pages",
        json!({"title": "Draft", "is_published": false}),
    )
    .await;
    let response = get(build_test_app(pool), "/api/v1/pages/draft").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_detail_orders_typed_and_generic_blocks(pool: PgPool) {
    let block_type = create(&pool, "/api/v1/admin/block-types", json!({"name": "Notice"})).await;
    let page = create(&pool, "/api/v1/admin/pages", json!({"title": "Fixtures"})).await;
    let id = page["id"].as_i64().unwrap();

    let faq = create(
        &pool,
        &format!("/api/v1/admin/pages/{id}/content-blocks"),
        json!({"kind": "faq", "sort_order": 2, "payload": {"heading": "Questions"}}),
    )
    .await;
    let notice = create(
        &pool,
        &format!("/api/v1/admin/pages/{id}/blocks"),
        json!({"block_type_id": block_type["id"], "content": "<p>Kick-off moved</p>", "sort_order": 1}),
    )
    .await;
    create(
        &pool,
        &format!("/api/v1/admin/pages/{id}/content-blocks"),
        json!({"kind": "gallery", "sort_order": 0, "is_active": false}),
    )
    .await;

    let faq_id = faq["id"].as_i64().unwrap();
    create(
        &pool,
        &format!("/api/v1/admin/content-blocks/{faq_id}/items"),
        json!({"payload": {"question": "Parking?", "answer": "Behind the stand"}}),
    )
    .await;

    let response = get(build_test_app(pool), "/api/v1/pages/fixtures").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["page"]["title"], "Fixtures");
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);

    assert_eq!(blocks[0]["source"], "generic");
    assert_eq!(blocks[0]["id"], notice["id"]);
    assert_eq!(blocks[0]["kind"], "notice");
    assert_eq!(blocks[0]["template"], "blocks/rich_text.html");
    assert!(blocks[0]["style"].is_null());

    assert_eq!(blocks[1]["source"], "typed");
    assert_eq!(blocks[1]["kind"], "faq");
    assert_eq!(blocks[1]["template"], "blocks/faqblock.html");
    assert_eq!(blocks[1]["payload"]["heading"], "Questions");
    assert_eq!(
        blocks[1]["style"]["inline"],
        "background-color: #FFFFFF; color: #212529; text-align: left"
    );
    assert_eq!(blocks[1]["items"][0]["payload"]["question"], "Parking?");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_detail_includes_menu(pool: PgPool) {
    let page = create(&pool, "/api/v1/admin/pages", json!({"title": "About"})).await;
    create(
        &pool,
        "/api/v1/admin/menu-items",
        json!({"title": "About us", "page_id": page["id"]}),
    )
    .await;

    let response = get(build_test_app(pool), "/api/v1/pages/about").await;
    let json = body_json(response).await;
    assert!(json["blocks"].as_array().unwrap().is_empty());
    assert_eq!(json["menu"][0]["title"], "About us");
    assert_eq!(json["menu"][0]["url"], "/pages/about/");
}
