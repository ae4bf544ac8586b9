//! HTTP-level integration tests for `GET /estadisticas`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, token_for_role};
use sqlx::PgPool;

#[sqlx::test(migrations = false)]
async fn test_statistics_top_five_by_price_and_counts(pool: PgPool) {
    let app = common::setup(&pool).await;
    let admin = token_for_role(&pool, &app, "admin").await;
    let viewer = token_for_role(&pool, &app, "user").await;

    let response = post_json(
        &app,
        "/categorias",
        serde_json::json!({ "nombre": "Gadgets" }),
        Some(&admin),
    )
    .await;
    let gadgets = body_json(response).await["data"]["id"].as_i64().unwrap();
    post_json(
        &app,
        "/categorias",
        serde_json::json!({ "nombre": "Empty" }),
        Some(&admin),
    )
    .await;

    // Insert in an order unrelated to price.
    for (name, price) in [
        ("P3", 30.0),
        ("P7", 70.0),
        ("P1", 10.0),
        ("P5", 50.0),
        ("P2", 20.0),
        ("P6", 60.0),
        ("P4", 40.0),
    ] {
        let response = post_json(
            &app,
            "/productos",
            serde_json::json!({ "nombre": name, "precio": price, "categoria_id": gadgets }),
            Some(&admin),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/estadisticas", Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await["data"].clone();

    let expensive: Vec<&str> = stats["productos_caros"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(expensive, vec!["P7", "P6", "P5", "P4", "P3"]);

    let recent: Vec<&str> = stats["productos_recientes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["P4", "P6", "P2", "P5", "P1"]);

    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    let category_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(stats["total_usuarios"], user_count);
    assert_eq!(stats["total_categorias"], category_count);
    assert_eq!(stats["total_productos"], 7);
    assert_eq!(stats["total_contenido"], 0);

    let popular = stats["categorias_populares"].as_array().unwrap();
    assert_eq!(popular[0]["nombre"], "Gadgets");
    assert_eq!(popular[0]["total_productos"], 7);
    assert_eq!(popular[1]["nombre"], "Empty");
}

#[sqlx::test(migrations = false)]
async fn test_statistics_on_empty_store(pool: PgPool) {
    let app = common::setup(&pool).await;
    let viewer = token_for_role(&pool, &app, "user").await;

    let response = get(&app, "/estadisticas", Some(&viewer)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await["data"].clone();
    assert_eq!(stats["total_usuarios"], 1);
    assert_eq!(stats["total_productos"], 0);
    assert_eq!(stats["productos_caros"], serde_json::json!([]));
    assert_eq!(stats["categorias_populares"], serde_json::json!([]));
}
