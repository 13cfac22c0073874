// ==========================================
// HTTP handler tests
// ==========================================
// Target: axum handlers invoked directly with extracted
// arguments; bodies read back with axum::body::to_bytes
// ==========================================

mod helpers;
mod test_helpers;

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bqc_generator::api::GenerateDocumentRequest;
use bqc_generator::app::http_routes::{
    admin_stats, delete_procurement, generate_document, get_procurement, health_check,
    list_procurements, save_procurement, AuthUser, USER_ID_HEADER,
};
use bqc_generator::app::{build_router, AppState};
use bqc_generator::domain::UserRole;
use helpers::record_builder::RecordBuilder;
use serde_json::Value;
use tower::ServiceExt;

const BODY_LIMIT: usize = 16 * 1024 * 1024;

async fn json_of(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn user(id: &str) -> AuthUser {
    AuthUser::new(id, UserRole::User)
}

async fn save(state: &AppState, user_id: &str, ref_number: &str) -> String {
    let record = RecordBuilder::goods(ref_number)
        .description("Pumps")
        .cec(1.18, 1.0)
        .build();
    let response = save_procurement(State(state.clone()), user(user_id), Ok(Json(record)))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = json_of(health_check().await.into_response()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], bqc_generator::VERSION);
}

#[tokio::test]
async fn test_save_list_get_delete() {
    let (_file, state) = test_helpers::create_test_state().unwrap();

    let id = save(&state, "user-1", "MM/1").await;
    // same reference again updates in place
    assert_eq!(save(&state, "user-1", "MM/1").await, id);
    save(&state, "user-1", "MM/2").await;

    let response = list_procurements(State(state.clone()), user("user-1"))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["refNumber"], "MM/2");

    let response = get_procurement(State(state.clone()), user("user-1"), Path(id.clone()))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["userId"], "user-1");
    assert_eq!(body["cecEstimateInclGst"], 1.18);

    let response = delete_procurement(State(state.clone()), user("user-1"), Path(id.clone()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_procurement(State(state.clone()), user("user-1"), Path(id))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_other_users_submission_is_not_found() {
    let (_file, state) = test_helpers::create_test_state().unwrap();
    let id = save(&state, "alice", "A/1").await;

    let response = get_procurement(State(state.clone()), user("bob"), Path(id.clone()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_procurement(State(state.clone()), user("bob"), Path(id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_save_is_bad_request() {
    let (_file, state) = test_helpers::create_test_state().unwrap();
    let record = RecordBuilder::goods("").cec(1.0, 1.18).build();

    let response = save_procurement(State(state), user("user-1"), Ok(Json(record)))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["violations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_generate_document_response_headers() {
    let (_file, state) = test_helpers::create_test_state().unwrap();
    let request = GenerateDocumentRequest {
        data: RecordBuilder::goods("GDS/42").cec(2.0, 1.7).build(),
        format: "docx".to_string(),
    };

    let response = generate_document(State(state), user("user-1"), Ok(Json(request)))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"BQC_GDS_42_"));
    assert!(disposition.ends_with(".docx\""));

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(
        headers[header::CONTENT_LENGTH].to_str().unwrap(),
        bytes.len().to_string()
    );
    let xml = test_helpers::document_xml(&bytes).unwrap();
    assert!(xml.contains("GDS/42"));
}

#[tokio::test]
async fn test_generate_document_rejects_unknown_format() {
    let (_file, state) = test_helpers::create_test_state().unwrap();
    let request = GenerateDocumentRequest {
        data: RecordBuilder::goods("GDS/42").build(),
        format: "pdf".to_string(),
    };

    let response = generate_document(State(state), user("user-1"), Ok(Json(request)))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
    assert!(body["message"].as_str().unwrap().contains("pdf"));
}

fn generate_request(user_id: Option<&str>) -> Request<Body> {
    let body = serde_json::json!({
        "data": RecordBuilder::goods("GDS/42").cec(2.0, 1.7).build(),
        "format": "docx",
    });
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/generate-document")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_generate_document_route_requires_user() {
    let (_file, config) = test_helpers::create_test_config().unwrap();
    let state = AppState::new(&config).unwrap();
    let router = build_router(state, &config);

    let response = router.clone().oneshot(generate_request(None)).await.unwrap();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let response = router.oneshot(generate_request(Some("user-1"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment"));
}

#[tokio::test]
async fn test_admin_stats_requires_admin() {
    let (_file, state) = test_helpers::create_test_state().unwrap();
    save(&state, "user-1", "S/1").await;

    let response = admin_stats(State(state.clone()), user("user-1"))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let response = admin_stats(State(state), AuthUser::new("root", UserRole::Admin))
        .await
        .into_response();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSubmissions"], 1);
    assert_eq!(body["totalUsers"], 1);
}
