use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use safetrip::catalog::Catalog;
use safetrip::router::{engine_router, EngineState};

fn router() -> Router {
    let catalog = Catalog::builtin().expect("built-in catalog validates");
    engine_router(EngineState::new(Arc::new(catalog)))
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

async fn get(uri: &str) -> Response {
    router()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .expect("route executes")
}

async fn post(uri: &str, payload: Value) -> Response {
    router()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes")
}

#[tokio::test]
async fn quiz_questions_are_listed_in_order() {
    let response = get("/api/v1/quiz/questions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    let questions = payload.as_array().expect("array of questions");
    assert_eq!(questions.len(), 12);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(questions[3]["weight"], 5);
}

#[tokio::test]
async fn quiz_assessment_returns_score_and_guidance() {
    let response = post(
        "/api/v1/quiz/assess",
        json!({ "answers": { "4": "yes", "6": "yes", "10": "yes", "11": "yes", "1": "no" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 20);
    assert_eq!(payload["max_score"], 49);
    assert_eq!(payload["percentage"], 41);
    assert_eq!(payload["level"], "MODERATE");
    assert!(payload["guidance"]["headline"].is_string());
}

#[tokio::test]
async fn checklist_assessment_reports_completion() {
    let response = post(
        "/api/v1/checklist/assess",
        json!({ "checks": { "1": false, "2": false, "5": false, "3": true } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["critical_issues"], 3);
    assert_eq!(payload["level"], "CRITICAL");
    assert_eq!(payload["completion"]["answered"], 4);
    assert_eq!(payload["completion"]["total"], 18);
    assert_eq!(payload["completion"]["complete"], false);
}

#[tokio::test]
async fn checklist_lists_categories() {
    let payload = read_json_body(get("/api/v1/checklist").await).await;
    let categories = payload.as_array().expect("array of categories");
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[0]["name"], "Pre-Travel Communication");
}

#[tokio::test]
async fn location_lookup_matches_enclosing_zone() {
    let response = post(
        "/api/v1/location/zones",
        json!({ "lat": 36.5054, "lng": -117.0794, "accuracy_meters": 8.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    let zones = payload["zones"].as_array().expect("zone list");
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0]["zone"]["name"], "Death Valley, California");
    assert_eq!(zones[0]["distance_km"], 0.0);
    assert_eq!(payload["point"]["accuracy_meters"], 8.0);
}

#[tokio::test]
async fn location_lookup_rejects_out_of_range_coordinates() {
    let response = post("/api/v1/location/zones", json!({ "lat": 95.0, "lng": 0.0 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn incidents_filter_by_severity_and_type() {
    let payload =
        read_json_body(get("/api/v1/incidents?severity=HIGH&type=Missing%20Person").await).await;
    assert_eq!(payload["shown"], 2);
    assert_eq!(payload["total"], 8);
    assert_eq!(payload["severity"], "HIGH");
    assert_eq!(payload["type"], "Missing Person");

    let all = read_json_body(get("/api/v1/incidents").await).await;
    assert_eq!(all["shown"], 8);
    assert_eq!(all["incidents"][0]["type"], "Missing Person");
    assert_eq!(all["incidents"][0]["date"], "2023-08-15");
}

#[tokio::test]
async fn incidents_reject_unknown_severity() {
    let response = get("/api/v1/incidents?severity=EXTREME").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incident_types_are_distinct() {
    let payload = read_json_body(get("/api/v1/incidents/types").await).await;
    let types = payload["types"].as_array().expect("type list");
    assert_eq!(types.len(), 5);
    assert_eq!(types[0], "Missing Person");
}

#[tokio::test]
async fn chat_reply_flags_urgent_messages() {
    let response = post(
        "/api/v1/chat/reply",
        json!({ "message": "I am afraid of what he might do" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["urgent"], true);
}

#[tokio::test]
async fn chat_reply_rejects_blank_messages() {
    let response = post("/api/v1/chat/reply", json!({ "message": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resources_include_regional_hotlines() {
    let national = read_json_body(get("/api/v1/resources").await).await;
    let national_count = national["hotlines"].as_array().expect("hotlines").len();
    assert_eq!(national_count, 5);
    assert_eq!(national["guides"].as_array().expect("guides").len(), 4);

    let texas = read_json_body(get("/api/v1/resources?region=texas").await).await;
    assert!(texas["hotlines"].as_array().expect("hotlines").len() > national_count);
    assert!(texas["regions"]
        .as_array()
        .expect("regions")
        .contains(&json!("Texas")));
}
