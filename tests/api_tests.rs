//! HTTP-level tests driving the full router with `tower::ServiceExt::oneshot`.

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use roster::error::TRACE_ID_HEADER;
use roster::models::company;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use tower::ServiceExt;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_app;

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn user_lifecycle_scenario() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (status, created) = send(
        &app,
        Method::POST,
        "/users",
        Some(r#"{"name":"Ann","email":"ann@x.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().expect("id assigned");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());
    assert_eq!(created["deleted_at"], Value::Null);

    let (status, fetched) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(r#"{"email":"ann2@x.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ann");
    assert_eq!(updated["email"], "ann2@x.com");

    let (status, deleted) = send(&app, Method::DELETE, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "User deleted" }));

    let (status, missing) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({ "error": "User not found" }));
    Ok(())
}

#[tokio::test]
async fn company_fields_round_trip() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (status, created) = send(
        &app,
        Method::POST,
        "/companies",
        Some(r#"{"name":"Acme","email":"billing@acme.test","address":"1 Main St","bank":"First Bank"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/companies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Acme");
    assert_eq!(fetched["email"], "billing@acme.test");
    assert_eq!(fetched["address"], "1 Main St");
    assert_eq!(fetched["bank"], "First Bank");
    Ok(())
}

#[tokio::test]
async fn malformed_create_body_is_bad_request() -> Result<()> {
    let (app, db) = setup_test_app().await?;

    let (status, body) = send(&app, Method::POST, "/companies", Some(r#"{"name": "#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(company::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn wrongly_typed_field_is_bad_request() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (status, body) = send(&app, Method::POST, "/users", Some(r#"{"name": 42}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn put_to_unknown_company_is_not_found_and_writes_nothing() -> Result<()> {
    let (app, db) = setup_test_app().await?;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/companies/99",
        Some(r#"{"name":"Ghost"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Company not found" }));
    assert_eq!(company::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn existence_is_checked_before_body_decoding() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (status, body) = send(&app, Method::PUT, "/users/7", Some("not json")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));
    Ok(())
}

#[tokio::test]
async fn malformed_update_body_on_existing_user_is_bad_request() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (_, created) = send(&app, Method::POST, "/users", Some(r#"{"name":"Ann"}"#)).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::PUT, &format!("/users/{id}"), Some("{")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_not_found() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (status, body) = send(&app, Method::GET, "/users/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));

    let (status, _) = send(&app, Method::DELETE, "/companies/99999999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_twice_is_not_found() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (_, created) = send(&app, Method::POST, "/companies", Some("{}")).await;
    let id = created["id"].as_i64().unwrap();

    let (first, body) = send(&app, Method::DELETE, &format!("/companies/{id}"), None).await;
    let (second, _) = send(&app, Method::DELETE, &format!("/companies/{id}"), None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Company deleted" }));
    assert_eq!(second, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn responses_carry_trace_id() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let request = Request::builder()
        .uri("/users/1")
        .header(TRACE_ID_HEADER, "trace-from-client")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(TRACE_ID_HEADER).unwrap(),
        "trace-from-client"
    );
    Ok(())
}

#[tokio::test]
async fn probes_and_service_info() -> Result<()> {
    let (app, _db) = setup_test_app().await?;

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ready" }));

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "roster");

    let (status, body) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users/{id}"].is_object());
    Ok(())
}
