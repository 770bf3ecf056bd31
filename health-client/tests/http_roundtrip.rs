// health-client/tests/http_roundtrip.rs
// Exercises the reqwest transport against an in-process axum backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use health_client::api::{PARENTS_PATH, STAFF_PATH, USERS_PATH};
use health_client::error::RETRY_MESSAGE;
use health_client::http::{UploadFile, XLSX_MIME};
use health_client::list::{FetchOutcome, ListController};
use health_client::{ClientConfig, ClientError, SchoolHealthApi};
use shared::ListQuery;
use shared::models::{Parent, Staff, StaffCreate, StaffRole, UserAccount};

#[derive(Default)]
struct Backend {
    queries: Mutex<Vec<HashMap<String, String>>>,
    creates: AtomicUsize,
}

type Shared = Arc<Backend>;

async fn list_staff(
    State(backend): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.queries.lock().unwrap().push(params);
    Json(json!({
        "success": true,
        "data": [
            {"id": "st-1", "fullName": "Nguyen Van An", "email": "an@school.edu", "role": "Nurse"},
            {"id": "st-2", "fullName": "Tran Thi Anh", "email": "anh@school.edu", "role": "Nurse"}
        ],
        "totalCount": 25,
        "totalPages": 3
    }))
}

async fn create_staff(State(backend): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    backend.creates.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "success": true,
        "message": "Staff created",
        "data": {
            "id": "st-26",
            "fullName": body["fullName"],
            "email": body["email"],
            "phoneNumber": body["phoneNumber"],
            "role": body["role"]
        }
    }))
}

async fn delete_staff(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    match id.as_str() {
        "st-404" => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Staff not found"})),
        ),
        "st-locked" => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Staff has open medication requests"})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Staff deleted"})),
        ),
    }
}

async fn staff_template() -> impl IntoResponse {
    (
        [
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"template.xlsx\"; filename*=UTF-8''M%E1%BA%ABu%20nh%C3%A2n%20vi%C3%AAn.xlsx",
            ),
            (header::CONTENT_TYPE, XLSX_MIME),
        ],
        vec![0x50u8, 0x4b, 0x03, 0x04],
    )
}

async fn staff_export(RawQuery(query): RawQuery) -> Vec<u8> {
    query.unwrap_or_default().into_bytes()
}

async fn import_staff(mut multipart: Multipart) -> Json<Value> {
    let mut received = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            let size = field.bytes().await.unwrap().len();
            received = format!("{} ({} bytes)", name, size);
        }
    }
    Json(json!({
        "success": true,
        "data": {
            "totalRows": 10,
            "successRows": 8,
            "errorRows": 2,
            "invalidData": [{"row": 4}, {"row": 9}],
            "errors": [received, "Row 9: phone is invalid"]
        }
    }))
}

async fn list_users(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer nurse-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Token expired"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [{"id": "u-1", "fullName": "Le Thu", "email": "thu@school.edu", "role": "Nurse", "status": "Active"}],
            "totalCount": 1,
            "totalPages": 1
        })),
    )
}

async fn list_parents() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream unavailable")
}

async fn spawn_backend() -> (String, Shared) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/api/staff", get(list_staff).post(create_staff))
        .route("/api/staff/{id}", delete(delete_staff))
        .route("/api/staff/template", get(staff_template))
        .route("/api/staff/export", get(staff_export))
        .route("/api/staff/import", post(import_staff))
        .route("/api/users", get(list_users))
        .route("/api/parents", get(list_parents))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

fn api(config: &ClientConfig) -> SchoolHealthApi {
    SchoolHealthApi::new(config.build_http_client().unwrap())
}

#[tokio::test]
async fn test_list_query_reaches_backend() {
    let (url, backend) = spawn_backend().await;
    let config = ClientConfig::new(url);
    let api = api(&config);

    let mut list: ListController<Staff, _> = ListController::new(
        api.endpoint(STAFF_PATH),
        ListQuery::new(10).ordered_by("fullName"),
        config.search_debounce(),
    );
    list.set_filter("role", "Nurse");
    list.set_search_term("An");
    list.submit_search();

    assert_eq!(list.fetch().await, FetchOutcome::Loaded);
    assert_eq!(list.total_count(), 25);
    assert_eq!(list.total_pages(), 3);
    assert_eq!(list.items()[0].full_name, "Nguyen Van An");
    assert_eq!(list.page_buttons().len(), 3);

    let queries = backend.queries.lock().unwrap();
    let sent = &queries[0];
    assert_eq!(sent["pageIndex"], "1");
    assert_eq!(sent["pageSize"], "10");
    assert_eq!(sent["searchTerm"], "An");
    assert_eq!(sent["orderBy"], "fullName");
    assert_eq!(sent["orderDirection"], "asc");
    assert_eq!(sent["role"], "Nurse");
}

#[tokio::test]
async fn test_empty_search_is_not_sent() {
    let (url, backend) = spawn_backend().await;
    let config = ClientConfig::new(url);
    let page = api(&config).staff(&ListQuery::new(5)).await.unwrap();
    assert!(page.success);

    let queries = backend.queries.lock().unwrap();
    assert!(!queries[0].contains_key("searchTerm"));
    assert!(!queries[0].contains_key("orderBy"));
    assert_eq!(queries[0]["pageSize"], "5");
}

#[tokio::test]
async fn test_template_filename_from_header() {
    let (url, _) = spawn_backend().await;
    let file = api(&ClientConfig::new(url)).staff_template().await.unwrap();
    assert_eq!(file.filename, "Mẫu nhân viên.xlsx");
    assert_eq!(file.content_type.as_deref(), Some(XLSX_MIME));
    assert_eq!(file.bytes, vec![0x50, 0x4b, 0x03, 0x04]);
}

#[tokio::test]
async fn test_export_uses_fallback_name_and_skips_paging() {
    let (url, _) = spawn_backend().await;
    let mut query = ListQuery::new(10).ordered_by("email");
    query.set_search_term("Anh");
    let file = api(&ClientConfig::new(url)).export_staff(&query).await.unwrap();

    assert_eq!(file.filename, "staff_export.xlsx");
    let sent = String::from_utf8(file.bytes).unwrap();
    assert!(sent.contains("searchTerm=Anh"));
    assert!(sent.contains("orderBy=email"));
    assert!(!sent.contains("pageIndex"));
}

#[tokio::test]
async fn test_import_returns_summary() {
    let (url, _) = spawn_backend().await;
    let summary = api(&ClientConfig::new(url))
        .import_staff(UploadFile::spreadsheet("staff.xlsx", vec![1, 2, 3]))
        .await
        .unwrap();

    assert_eq!(summary.total_rows, 10);
    assert_eq!(summary.success_rows, 8);
    assert_eq!(summary.error_rows, 2);
    assert_eq!(summary.invalid_data.len(), 2);
    assert_eq!(summary.errors[0], "staff.xlsx (3 bytes)");
    assert!(summary.has_successes());
}

#[tokio::test]
async fn test_delete_error_mapping() {
    let (url, _) = spawn_backend().await;
    let api = api(&ClientConfig::new(url));

    assert_eq!(
        api.delete_staff("st-1").await.unwrap().as_deref(),
        Some("Staff deleted")
    );

    match api.delete_staff("st-404").await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Staff not found"),
        other => panic!("unexpected: {:?}", other),
    }

    let err = api.delete_staff("st-locked").await.unwrap_err();
    assert!(matches!(err, ClientError::Business(_)));
    assert_eq!(err.user_message(), "Staff has open medication requests");
}

#[tokio::test]
async fn test_invalid_create_sends_nothing() {
    let (url, backend) = spawn_backend().await;
    let api = api(&ClientConfig::new(url));
    let mut payload = StaffCreate {
        full_name: "Pham Quoc Bao".to_string(),
        email: "bao@school.edu".to_string(),
        phone_number: "12ab".to_string(),
        role: StaffRole::Manager,
    };

    let err = api.create_staff(&payload).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(backend.creates.load(Ordering::SeqCst), 0);

    payload.phone_number = "0987654321".to_string();
    let created = api.create_staff(&payload).await.unwrap();
    assert_eq!(created.id, "st-26");
    assert_eq!(created.role, StaffRole::Manager);
    assert_eq!(backend.creates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unauthorized_list_shows_session_message() {
    let (url, _) = spawn_backend().await;
    let config = ClientConfig::new(url);

    let mut anonymous: ListController<UserAccount, _> = ListController::new(
        api(&config).endpoint(USERS_PATH),
        ListQuery::default(),
        config.search_debounce(),
    );
    assert_eq!(
        anonymous.fetch().await,
        FetchOutcome::Failed(Some(ClientError::Unauthorized.user_message()))
    );
    assert!(anonymous.items().is_empty());

    let config = config.with_token("nurse-token");
    let mut signed_in: ListController<UserAccount, _> = ListController::new(
        api(&config).endpoint(USERS_PATH),
        ListQuery::default(),
        config.search_debounce(),
    );
    assert_eq!(signed_in.fetch().await, FetchOutcome::Loaded);
    assert_eq!(signed_in.items()[0].full_name, "Le Thu");
}

#[tokio::test]
async fn test_server_failure_degrades_to_empty_list() {
    let (url, _) = spawn_backend().await;
    let config = ClientConfig::new(url);
    let mut list: ListController<Parent, _> = ListController::new(
        api(&config).endpoint(PARENTS_PATH),
        ListQuery::default(),
        config.search_debounce(),
    );
    assert_eq!(
        list.fetch().await,
        FetchOutcome::Failed(Some(RETRY_MESSAGE.to_string()))
    );
    assert_eq!(list.total_count(), 0);
    assert_eq!(list.message(), Some(RETRY_MESSAGE));
}
