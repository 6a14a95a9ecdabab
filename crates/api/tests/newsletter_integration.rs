//! Integration tests for newsletter subscriptions.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL environment variable to run these tests.

mod common;

use axum::http::{header, StatusCode};
use common::{
    admin_token, create_test_app, create_test_pool, delete_request_with_auth, get_request,
    json_request, parse_response_body, response_bytes, run_migrations, test_config,
    unique_test_email, user_token,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn subscription_count(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscriptions WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ===== Subscribe Tests =====

#[tokio::test]
async fn test_subscribe_normalizes_email() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let email = unique_test_email("reader");
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/newsletter/subscribe",
            json!({ "email": email.to_uppercase() }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["status"], "active");
    assert_eq!(subscription_count(&pool, &email).await, 1);
}

#[tokio::test]
async fn test_subscribe_duplicate_conflicts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let email = unique_test_email("twice");
    let request = || {
        json_request(
            "POST",
            "/api/v1/newsletter/subscribe",
            json!({ "email": email }),
            None,
        )
    };

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Email is already subscribed");

    assert_eq!(subscription_count(&pool, &email).await, 1);
}

#[tokio::test]
async fn test_subscribe_invalid_email() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/newsletter/subscribe",
            json!({ "email": "no-at-sign" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ===== Admin Tests =====

#[tokio::test]
async fn test_admin_manages_subscriptions() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let token = admin_token(&pool, &config).await;
    let app = create_test_app(config, pool.clone());

    let email = unique_test_email("managed");
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/newsletter/subscribe",
            json!({ "email": email }),
            None,
        ))
        .await
        .unwrap();
    let id = parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/admin/newsletter/{}/status", id),
            json!({ "status": "unsubscribed" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "unsubscribed");

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/v1/admin/newsletter?status=unsubscribed&perPage=100",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["status"] == "unsubscribed"));

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/newsletter/export", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let bytes = response_bytes(response).await;
    assert_eq!(&bytes[..2], b"PK");

    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/admin/newsletter/{}", id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(subscription_count(&pool, &email).await, 0);

    let response = app
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/admin/newsletter/{}", id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_listing_requires_admin() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let token = user_token(&pool, &config).await;
    let app = create_test_app(config, pool);

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/newsletter", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get_request("/api/v1/admin/newsletter", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
