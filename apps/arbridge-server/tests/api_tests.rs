//! End-to-end tests against the in-process router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use arbridge_server::api::rest::routes::router;
use arbridge_server::bootstrap::build_service;
use arbridge_server::config::AppConfig;

fn app() -> Router {
    router(build_service(&AppConfig::default()).unwrap())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn incident_payload() -> Value {
    json!({
        "summary": "Email service down",
        "description": "Users cannot send email since 09:00",
        "priority": "High",
        "submitter": "helpdesk"
    })
}

async fn create_incident(app: &Router) -> String {
    let (status, body) = send(app, post_json("/api/v1/integration/incident", incident_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["incidentId"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn create_incident_returns_created_with_an_inc_id() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/v1/integration/incident", incident_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("SUCCESS"));
    let id = body["data"]["incidentId"].as_str().unwrap();
    assert!(id.starts_with("INC"));
    assert_eq!(id.len(), 15);
    assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn invalid_create_is_a_bad_request_with_itemized_errors() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/v1/integration/incident", json!({"summary": "only this"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!("ERROR"));
    let errors = body["data"]["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("Description is required")));
    assert!(errors.contains(&json!("Priority is required")));
}

#[tokio::test]
async fn unknown_module_type_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/v1/integration/ghost", json!({"summary": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], json!("ERROR"));
    assert!(body["message"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn created_incidents_are_retrievable() {
    let app = app();
    let id = create_incident(&app).await;

    let (status, body) = send(&app, get(&format!("/api/v1/integration/incident/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("SUCCESS"));

    let incident = &body["data"]["incident"];
    assert_eq!(incident["incidentId"], json!(id));
    assert_eq!(incident["summary"], json!("Email service down"));
    assert_eq!(incident["status"], json!("New"));
}

#[tokio::test]
async fn updates_are_visible_on_the_next_get() {
    let app = app();
    let id = create_incident(&app).await;

    let (status, _) = send(
        &app,
        put_json(
            &format!("/api/v1/integration/incident/{id}"),
            json!({"status": "In Progress"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&format!("/api/v1/integration/incident/{id}"))).await;
    let incident = &body["data"]["incident"];
    assert_eq!(incident["status"], json!("In Progress"));
    assert_eq!(incident["summary"], json!("Email service down"));
}

#[tokio::test]
async fn unknown_entry_id_is_a_failed_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        get("/api/v1/integration/incident/INC999999999999"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], json!("FAILED"));
}

#[tokio::test]
async fn search_filters_on_query_parameters() {
    let app = app();
    create_incident(&app).await;
    let (_, _) = send(
        &app,
        post_json(
            "/api/v1/integration/incident",
            json!({
                "summary": "VPN slow",
                "description": "High latency on the tunnel",
                "priority": "Low",
                "submitter": "helpdesk"
            }),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        get("/api/v1/integration/incident/search?priority=High"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("SUCCESS"));
    assert_eq!(body["data"]["count"], json!(1));
    let hits = body["data"]["incidents"].as_array().unwrap();
    assert_eq!(hits[0]["summary"], json!("Email service down"));

    // No criteria returns everything.
    let (_, body) = send(&app, get("/api/v1/integration/incident/search")).await;
    assert_eq!(body["data"]["count"], json!(2));
}

#[tokio::test]
async fn search_segment_is_never_treated_as_an_entry_id() {
    let app = app();
    create_incident(&app).await;

    // The static segment must route to search, not to a get of "search".
    let (status, body) = send(&app, get("/api/v1/integration/incident/search")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("SUCCESS"));
    assert_eq!(body["data"]["count"], json!(1));
    assert!(body["message"].as_str().unwrap().contains("search"));
}

#[tokio::test]
async fn modules_endpoint_lists_registered_types() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/integration/modules")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    let modules = body["modules"].as_array().unwrap();
    assert!(modules.contains(&json!("incident")));
    assert!(modules.contains(&json!("workorder")));
}

#[tokio::test]
async fn batch_create_reports_per_item_outcomes() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/integration/incident/batch",
            json!([incident_payload(), {"summary": "missing the rest"}]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["succeeded"], json!(1));

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["status"], json!("SUCCESS"));
    assert_eq!(results[1]["status"], json!("ERROR"));
    let errors = results[1]["data"]["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("Description is required")));
}

#[tokio::test]
async fn batch_create_on_an_unknown_module_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        post_json("/api/v1/integration/ghost/batch", json!([{"summary": "x"}])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn work_order_round_trip() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/integration/workorder",
            json!({
                "summary": "Rack new switch",
                "description": "Install in row 7",
                "requester": "netops"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["workOrderId"].as_str().unwrap().to_owned();
    assert!(id.starts_with("WO"));

    let (status, body) = send(&app, get(&format!("/api/v1/integration/workorder/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["workOrder"]["status"], json!("Assigned"));
}
