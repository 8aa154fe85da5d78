//! HTTP-level tests for typed blocks, their style and their items.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn new_page(pool: &PgPool) -> i64 {
    let page = create(pool, "/api/v1/admin/pages", json!({"title": "Home"})).await;
    page["id"].as_i64().unwrap()
}

async fn new_block(pool: &PgPool, page_id: i64, body: serde_json::Value) -> i64 {
    let block = create(
        pool,
        &format!("/api/v1/admin/pages/{page_id}/content-blocks"),
        body,
    )
    .await;
    block["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_payload_of_wrong_shape(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/admin/pages/{page_id}/content-blocks"),
        json!({"kind": "faq", "payload": {"embed_url": "https://video.test/1"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_unknown_kind(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/admin/pages/{page_id}/content-blocks"),
        json!({"kind": "carousel"}),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_on_missing_page_returns_404(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/admin/pages/999999/content-blocks",
        json!({"kind": "faq"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_validates_payload_against_kind(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(
        &pool,
        page_id,
        json!({"kind": "call_to_action", "payload": {"heading": "Join"}}),
    )
    .await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/content-blocks/{id}"),
        json!({"payload": {"heading": ""}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/admin/content-blocks/{id}"),
        json!({"payload": {"heading": "Join today", "button_url": "https://club.test/join"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["payload"]["heading"], "Join today");
    assert_eq!(json["kind"], "call_to_action");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_block_returns_204_then_404(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(&pool, page_id, json!({"kind": "contact_form"})).await;

    let uri = format!("/api/v1/admin/content-blocks/{id}");
    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_style_defaults_and_update(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(&pool, page_id, json!({"kind": "testimonial"})).await;
    let uri = format!("/api/v1/admin/content-blocks/{id}/style");

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["border_radius"], 0);
    assert_eq!(json["resolved"]["classes"], json!(["container"]));

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({
            "container_width": "full",
            "shadow": true,
            "hover_effect": "lift",
            "padding_top": "large",
            "border_radius": 8,
            "custom_class": "club-highlight"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["resolved"]["classes"],
        json!(["container-fluid", "shadow-lg", "hover-lift", "club-highlight"])
    );
    assert_eq!(
        json["resolved"]["inline"],
        "background-color: #FFFFFF; color: #212529; text-align: left; \
         padding-top: 80px; border-radius: 8px"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_style_update_rejects_out_of_range_values(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(&pool, page_id, json!({"kind": "faq"})).await;
    let uri = format!("/api/v1/admin/content-blocks/{id}/style");

    for body in [
        json!({"border_radius": 51}),
        json!({"background_image_opacity": 1.5}),
        json!({"text_color": "red"}),
    ] {
        let response = put_json(build_test_app(pool.clone()), &uri, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_style_of_missing_block_returns_404(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        "/api/v1/admin/content-blocks/999999/style",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_items_listed_by_order_then_id(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(&pool, page_id, json!({"kind": "counter_stats"})).await;
    let uri = format!("/api/v1/admin/content-blocks/{id}/items");

    for (order, label) in [(1, "Trophies"), (0, "Members"), (1, "Teams")] {
        create(
            &pool,
            &uri,
            json!({"sort_order": order, "payload": {"number": "12", "label": label}}),
        )
        .await;
    }

    let response = get(build_test_app(pool), &uri).await;
    let items = body_json(response).await;
    let labels: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["payload"]["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Members", "Trophies", "Teams"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_items_rejected_for_kind_without_children(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(
        &pool,
        page_id,
        json!({"kind": "video_embed", "payload": {"embed_url": "https://video.test/1"}}),
    )
    .await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/admin/content-blocks/{id}/items"),
        json!({"payload": {"question": "?", "answer": "!"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_update_and_delete(pool: PgPool) {
    let page_id = new_page(&pool).await;
    let id = new_block(&pool, page_id, json!({"kind": "timeline"})).await;
    let item = create(
        &pool,
        &format!("/api/v1/admin/content-blocks/{id}/items"),
        json!({"payload": {"title": "Founded"}}),
    )
    .await;
    let item_uri = format!("/api/v1/admin/content-block-items/{}", item["id"]);

    let response = put_json(
        build_test_app(pool.clone()),
        &item_uri,
        json!({"sort_order": 3, "payload": {"title": "Founded", "detail": "1898"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sort_order"], 3);
    assert_eq!(json["payload"]["detail"], "1898");

    let response = delete(build_test_app(pool.clone()), &item_uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete(build_test_app(pool), &item_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_kinds_lists_registry(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/admin/block-kinds").await;
    assert_eq!(response.status(), StatusCode::OK);
    let kinds = body_json(response).await;
    let kinds = kinds.as_array().unwrap();
    assert_eq!(kinds.len(), 16);

    let hero = kinds.iter().find(|k| k["kind"] == "hero_banner").unwrap();
    assert_eq!(hero["template"], "blocks/herobannerblock.html");
    assert_eq!(hero["accepts_items"], true);
}
