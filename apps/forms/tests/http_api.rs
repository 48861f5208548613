//! Drives the HTTP adapter and the full edit pipeline against an in-process API.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use forms::config::parse_base_url;
use forms::{
    EmployerField, EmployerProfile, EmployerProfileEditor, EntityId, EntityStore, HttpEntityApi,
    MemorySink, MutationError, Resume, ResumeEditor, ResumeField, Severity, SubmitReport,
};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(String, Value, Option<String>)>>>,
}

impl Recorded {
    fn take(&self) -> Vec<(String, Value, Option<String>)> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

fn stored_resume(id: &str) -> Value {
    json!({
        "_id": id,
        "position": "Rust developer",
        "category": "Backend",
        "workExperience": "3 years",
        "relocation": false,
        "createdAt": "2024-01-10T12:00:00Z",
        "updatedAt": "2024-03-01T09:00:00Z"
    })
}

async fn get_resume(Path(id): Path<String>) -> Json<Value> {
    Json(stored_resume(&id))
}

async fn patch_resume(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    recorded
        .requests
        .lock()
        .unwrap()
        .push((id.clone(), body.clone(), auth));

    let mut saved = stored_resume(&id);
    if let (Some(saved), Some(patch)) = (saved.as_object_mut(), body.as_object()) {
        for (key, value) in patch {
            saved.insert(key.clone(), value.clone());
        }
        saved.insert("updatedAt".to_string(), json!("2024-03-01T10:30:00Z"));
    }
    Json(saved)
}

async fn patch_resume_no_content(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    recorded.requests.lock().unwrap().push((id, body, None));
    StatusCode::NO_CONTENT
}

async fn patch_employer_down(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded.requests.lock().unwrap().push((id, body, None));
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "message": "network error" })),
    )
}

async fn patch_employer_plain(Path(_id): Path<String>) -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "companyName is too long")
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn client(base: &str, token: Option<&str>) -> HttpEntityApi {
    HttpEntityApi::new(
        reqwest::Client::new(),
        parse_base_url(base).unwrap(),
        token.map(String::from),
    )
}

fn employer() -> EmployerProfile {
    serde_json::from_value(json!({
        "_id": "e1",
        "firstName": "Olena",
        "lastName": "Koval",
        "email": "olena@acme.io",
        "companyName": "Acme",
        "updatedAt": "2024-02-01T08:00:00Z"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_fetch_then_edit_resume_round_trip() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/resumes/:id", get(get_resume).patch(patch_resume))
        .with_state(recorded.clone());
    let base = spawn(app).await;
    let api = client(&base, Some("secret"));

    let resume: Resume = api.fetch(&EntityId::new("r1")).await.unwrap();
    assert_eq!(resume.position, "Rust developer");

    let store = EntityStore::with_entity(resume);
    let sink = Arc::new(MemorySink::new());
    let mut editor = ResumeEditor::mount(store.clone(), Arc::new(api), sink.clone());

    editor.bind(ResumeField::Position).set_text("Senior Rust developer").unwrap();
    editor.bind(ResumeField::Relocation).set_checked(true).unwrap();
    let report = editor.submit().await;
    assert!(report.is_saved(), "unexpected report: {report:?}");

    let requests = recorded.take();
    assert_eq!(requests.len(), 1);
    let (id, body, auth) = &requests[0];
    assert_eq!(id, "r1");
    assert_eq!(body["position"], "Senior Rust developer");
    assert_eq!(body["relocation"], true);
    assert_eq!(body["workExperience"], "3 years");
    assert_eq!(auth.as_deref(), Some("Bearer secret"));

    let stored = store.entity().unwrap();
    assert_eq!(stored.position, "Senior Rust developer");
    assert_eq!(
        stored.updated_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()
    );
    assert_eq!(
        editor.last_updated().as_deref(),
        Some("Fri, 01 Mar 2024 10:30:00 GMT")
    );

    let shown = sink.notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity, Severity::Success);
    assert_eq!(shown[0].title, "Edit resume");
}

#[tokio::test]
async fn test_employer_update_failure_surfaces_server_message() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/api/users/employer/:id",
            axum::routing::patch(patch_employer_down),
        )
        .with_state(recorded.clone());
    let base = spawn(app).await;

    let original = employer();
    let store = EntityStore::with_entity(original.clone());
    let sink = Arc::new(MemorySink::new());
    let mut editor =
        EmployerProfileEditor::mount(store.clone(), Arc::new(client(&base, None)), sink.clone());

    editor
        .bind(EmployerField::CompanyEmployeesCount)
        .set_text("12")
        .unwrap();
    assert!(editor
        .bind(EmployerField::CompanyEmployeesCount)
        .set_text("abc")
        .is_err());

    match editor.submit().await {
        SubmitReport::Failed(MutationError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "network error");
        }
        other => panic!("expected API failure, got {other:?}"),
    }

    let requests = recorded.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1["companyEmployeesCount"], 12);

    assert_eq!(store.entity(), Some(original));
    assert!(!editor.is_submit_disabled());
    assert_eq!(editor.form().values().company_employees_count, 12);

    let shown = sink.notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity.color(), "red");
    assert_eq!(shown[0].title, "Edit user info");
    assert_eq!(shown[0].message, "network error");
}

#[tokio::test]
async fn test_no_content_update_reloads_entity() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/api/resumes/:id",
            get(get_resume).patch(patch_resume_no_content),
        )
        .with_state(recorded.clone());
    let base = spawn(app).await;

    let store = EntityStore::with_entity(Resume {
        position: "Intern".to_string(),
        ..serde_json::from_value(stored_resume("r1")).unwrap()
    });
    let sink = Arc::new(MemorySink::new());
    let mut editor = ResumeEditor::mount(store.clone(), Arc::new(client(&base, None)), sink.clone());

    editor.bind(ResumeField::City).set_text("Lviv").unwrap();
    assert!(editor.submit().await.is_saved());

    let requests = recorded.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1["city"], "Lviv");
    assert_eq!(store.entity().unwrap().position, "Rust developer");
    assert_eq!(sink.last().unwrap().severity, Severity::Success);
}

#[tokio::test]
async fn test_plain_text_error_body_becomes_message() {
    let app = Router::new().route(
        "/api/users/employer/:id",
        axum::routing::patch(patch_employer_plain),
    );
    let base = spawn(app).await;

    let store = EntityStore::with_entity(employer());
    let sink = Arc::new(MemorySink::new());
    let mut editor =
        EmployerProfileEditor::mount(store, Arc::new(client(&base, None)), sink.clone());

    assert!(matches!(editor.submit().await, SubmitReport::Failed(_)));
    assert_eq!(sink.last().unwrap().message, "companyName is too long");
}

#[tokio::test]
async fn test_unreachable_api_is_a_failure_not_a_panic() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = EntityStore::with_entity(employer());
    let sink = Arc::new(MemorySink::new());
    let api = client(&format!("http://{addr}/api"), None);
    let mut editor = EmployerProfileEditor::mount(store.clone(), Arc::new(api), sink.clone());

    assert!(matches!(
        editor.submit().await,
        SubmitReport::Failed(MutationError::Transport(_))
    ));
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.last().unwrap().severity, Severity::Failure);
    assert!(!store.is_loading());
}
