//! HTTP API against an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use entrance_server::api::build_router;
use entrance_server::{Config, DbService, ServerState};

struct TestApp {
    router: Router,
    _tmp: tempfile::TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path(), 0);
        config.ensure_dirs().unwrap();
        let db = DbService::open_in_memory().await.unwrap();
        let router = build_router(ServerState::new(config, db.pool));
        Self { router, _tmp: tmp }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    async fn create(&self, name: &str, booth: &str, location: &str, staff_type: &str) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/staff",
                Some(json!({
                    "name": name,
                    "booth_id": booth,
                    "location": location,
                    "staff_type": staff_type,
                    "phone_number": "0123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn test_create_continues_location_sequence() {
    let app = TestApp::new().await;
    let vip = app.create("Acme", "A1", "1p", "VIP").await;
    assert_eq!(vip["staff_code"], "1PV01");
    assert_eq!(vip["location"], "1p");
    assert!(vip["qr_code_path"].as_str().unwrap().ends_with("1PV01.png"));

    let staff = app.create("Acme", "A1", "1p", "Sales").await;
    assert_eq!(staff["staff_code"], "1PS02");
    assert_eq!(staff["staff_type"], "Staff");

    let outdoor = app.create("Grill", "Z1", "O", "").await;
    assert_eq!(outdoor["staff_code"], "OS01");

    let (status, body) = app.json(Method::GET, "/api/staff?location=1p", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = TestApp::new().await;
    let (status, _) = app
        .json(Method::POST, "/api/staff", Some(json!({ "name": "  ", "location": "1p" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_resizes_booth() {
    let app = TestApp::new().await;
    let anchor = app.create("Acme", "A1", "1p", "VIP").await;
    let id = anchor["id"].as_i64().unwrap();

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/staff/{id}"),
            Some(json!({ "name": "Acme Bhd", "count": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["group_size"], 3);
    assert_eq!(body["created"].as_array().unwrap().len(), 2);
    assert_eq!(body["anchor"]["name"], "Acme Bhd");

    let (_, body) = app
        .json(Method::PUT, &format!("/api/staff/{id}"), Some(json!({ "count": "1" })))
        .await;
    assert_eq!(body["deleted"].as_array().unwrap().len(), 2);
    assert_eq!(body["anchor"]["id"], id);

    let (_, body) = app
        .json(Method::PUT, &format!("/api/staff/{id}"), Some(json!({ "count": "lots" })))
        .await;
    assert_eq!(body["count_ignored"], true);
    assert_eq!(body["group_size"], 1);
}

#[tokio::test]
async fn test_edit_rejects_unknown_location() {
    let app = TestApp::new().await;
    let anchor = app.create("Acme", "A1", "1p", "VIP").await;
    let id = anchor["id"].as_i64().unwrap();
    let (status, _) = app
        .json(Method::PUT, &format!("/api/staff/{id}"), Some(json!({ "location": "9p" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggles_and_delete() {
    let app = TestApp::new().await;
    let staff = app.create("Acme", "A1", "2p", "Staff").await;
    let id = staff["id"].as_i64().unwrap();

    let (_, body) = app.json(Method::POST, &format!("/api/staff/{id}/printed"), None).await;
    assert_eq!(body["printed"], true);
    let (_, body) = app.json(Method::POST, &format!("/api/staff/{id}/printed"), None).await;
    assert_eq!(body["printed"], false);
    let (_, body) = app.json(Method::POST, &format!("/api/staff/{id}/sold"), None).await;
    assert_eq!(body["sold"], true);

    let (status, _) = app.json(Method::DELETE, &format!("/api/staff/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.json(Method::DELETE, &format!("/api/staff/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.json(Method::GET, &format!("/api/staff/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scan_staff_code() {
    let app = TestApp::new().await;
    app.create("Acme", "A1", "3p", "VIP").await;

    let (status, body) = app.json(Method::GET, "/api/verify/3PV01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "valid");
    assert_eq!(body["kind"], "staff");
    assert_eq!(body["location_label"], "Pavilion 3");

    let (status, body) = app.json(Method::GET, "/api/verify/3PV99", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_found");

    let (status, body) = app.json(Method::GET, "/api/verify/hello", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_found");

    let (status, body) = app.json(Method::GET, "/api/verify/1PV%2001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "invalid");
    assert_eq!(body["payload"], "1PV 01");
}

#[tokio::test]
async fn test_check_in_and_pass_verify() {
    let app = TestApp::new().await;
    let staff = app.create("Acme", "A1", "1p", "VIP").await;
    let id = staff["id"].as_i64().unwrap();

    let (status, pass) = app
        .json(
            Method::POST,
            &format!("/api/staff/{id}/passes"),
            Some(json!({ "day_entered": "2025-03-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{pass}");
    assert_eq!(pass["day_entered"], "2025-03-01");
    assert_eq!(pass["booth_id"], "A1");
    let pass_id = pass["id"].as_i64().unwrap();

    // same day again returns the existing pass
    let (_, again) = app
        .json(
            Method::POST,
            &format!("/api/staff/{id}/passes"),
            Some(json!({ "day_entered": "2025-03-01" })),
        )
        .await;
    assert_eq!(again["id"], pass_id);

    let (status, body) = app.json(Method::GET, &format!("/api/passes/{pass_id}/verify"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "valid");

    let (_, body) = app.json(Method::GET, &format!("/api/verify/pass-{pass_id}"), None).await;
    assert_eq!(body["status"], "valid");
    assert_eq!(body["kind"], "pass");

    let (_, list) = app.json(Method::GET, &format!("/api/staff/{id}/passes"), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = app.json(Method::GET, "/api/passes/999999/verify", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_media_serves_qr() {
    let app = TestApp::new().await;
    app.create("Acme", "A1", "4p", "VIP").await;

    let (status, bytes) = app.send(Method::GET, "/api/media/qr/4PV01.png", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..4], b"\x89PNG");

    let (status, body) = app.json(Method::GET, "/api/media/qr/missing.png", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4002);

    let (status, _) = app.send(Method::GET, "/api/media/qr/..%2Fentrance.db", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
