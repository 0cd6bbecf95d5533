use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use course_admin::api::router;
use course_admin::state::AppState;
use course_admin::store::SqliteDocumentStore;

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    router(AppState {
        db: pool.clone(),
        store: Arc::new(SqliteDocumentStore::new(pool)),
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build failed")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request build failed")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read failed");
    serde_json::from_slice(&bytes).expect("body was not JSON")
}

fn course_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "An instructor-led course",
        "features": "Live classes\n\nProjects",
        "price": 149.0,
        "duration": "10 weeks",
        "level": "Beginner"
    })
}

#[tokio::test]
async fn create_and_list_courses_over_http() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/courses", &course_body("Rust Fundamentals")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_json(response).await;
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["features"], json!(["Live classes", "Projects"]));
    assert_eq!(created["batches"], json!([]));
    assert_eq!(created["imageId"], json!("000000000000000000000000"));

    let response = app.oneshot(empty_request("GET", "/courses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], json!("Rust Fundamentals"));
}

#[tokio::test]
async fn invalid_input_and_missing_ids_map_to_400_and_404() {
    let app = test_app().await;

    let mut blank_title = course_body("");
    blank_title["title"] = json!("   ");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/courses", &blank_title))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["message"], json!("title is required"));

    let mut update = course_body("Renamed");
    update["imageId"] = json!("000000000000000000000000");
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/courses/no-such-id", &update))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn batch_endpoints_round_trip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/courses", &course_body("Rust Fundamentals")))
        .await
        .unwrap();
    let course_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let batch = json!({
        "startDate": "2026-03-01",
        "endDate": "2026-06-01",
        "seats": 25,
        "status": "upcoming",
        "batchCode": "RUST01"
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", &format!("/courses/{course_id}/batches"), &batch))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["batchCode"], json!("RUST01"));
    assert_eq!(created["enrolledStudents"], json!(0));
    assert_eq!(created["startDate"], json!("2026-03-01T00:00:00Z"));

    let mut inverted = batch.clone();
    inverted["endDate"] = json!("2026-02-01");
    let response = app
        .clone()
        .oneshot(json_request("POST", &format!("/courses/{course_id}/batches"), &inverted))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let update = json!({
        "startDate": "2026-03-01",
        "endDate": "2026-06-01",
        "seats": 25,
        "enrolledStudents": 5,
        "status": "ongoing"
    });
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/courses/{course_id}/batches/5"), &update))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/courses/{course_id}/batches/0")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let removed = body_json(response).await;
    assert_eq!(removed["batchCode"], json!("RUST01"));

    let response = app.oneshot(empty_request("GET", "/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let dashboard = body_json(response).await;
    assert_eq!(dashboard["totalCourses"], json!(1));
    assert_eq!(dashboard["totalBatches"], json!(0));
    assert_eq!(dashboard["batchesByStatus"], json!({}));
}

#[tokio::test]
async fn deleting_a_course_twice_returns_no_content_both_times() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/courses", &course_body("Rust Fundamentals")))
        .await
        .unwrap();
    let course_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/courses/{course_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/courses/{course_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
