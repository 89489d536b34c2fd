//! Mock backend tests for the Siradu client.
//!
//! These tests use wiremock to simulate the admin API and exercise the
//! client's behavior (bearer attachment, notification flags, the
//! session-refresh flow) without network access or real credentials.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use siradu_client::{AccessToken, ApiClient, CallOpts, Credentials, ListQuery, RequestSpec};
use siradu_core::traits::{Navigator, Notifier};
use siradu_core::{BaseUrl, Error, SessionStatus, UserIdentity};

// ============================================================================
// Test doubles and helpers
// ============================================================================

#[derive(Default)]
struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct RecordingNavigator {
    on_login: AtomicBool,
    redirects: AtomicUsize,
}

impl Navigator for RecordingNavigator {
    fn on_login_view(&self) -> bool {
        self.on_login.load(Ordering::SeqCst)
    }

    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    client: ApiClient,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

fn harness(server: &MockServer) -> Harness {
    let base = BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(base, notifier.clone(), navigator.clone());
    Harness {
        client,
        notifier,
        navigator,
    }
}

fn identity_json() -> Value {
    json!({"id": "u-1", "name": "Siti", "email": "siti@example.com",
           "roles": [{"id": "r-1", "name": "ADMIN"}]})
}

fn identity() -> UserIdentity {
    serde_json::from_value(identity_json()).unwrap()
}

fn nurse_page() -> Value {
    json!({
        "data": [{"id": "n-1", "name": "Ani"}, {"id": "n-2", "name": "Budi"}],
        "total": 2,
        "page": 1,
        "pageSize": 10
    })
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dashboard/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Signed in",
            "data": {"accessToken": "tok-1", "user": identity_json()}
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let credentials = Credentials::new("admin@example.com", "secret123");
    let user = h.client.login(&credentials).await.unwrap();

    assert_eq!(user.name, "Siti");
    assert_eq!(h.client.store().access_token().unwrap().as_str(), "tok-1");
    assert_eq!(h.client.store().user().unwrap().email, "siti@example.com");
    assert_eq!(h.notifier.successes(), vec!["Signed in".to_string()]);
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dashboard/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "InvalidCredentials",
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let result = h
        .client
        .login(&Credentials::new("admin@example.com", "wrong"))
        .await;

    match result {
        Err(Error::Api(err)) => assert_eq!(err.status, 400),
        other => panic!("expected api error, got {:?}", other.map(|u| u.name)),
    }
    assert!(h.client.store().access_token().is_none());
    assert_eq!(h.notifier.errors(), vec!["InvalidCredentials".to_string()]);
}

#[tokio::test]
async fn test_bearer_token_attached_to_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nurse"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nurse_page()))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client.store().set_access_token(AccessToken::new("tok-1"));

    let page = h
        .client
        .list::<Value>("nurse", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_no_bearer_header_when_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nurse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nurse_page()))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client
        .list::<Value>("nurse", &ListQuery::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

// ============================================================================
// Session Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_single_flight_refresh_replays_all_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nurse"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "TokenExpired"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nurse"))
        .and(header("authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nurse_page()))
        .mount(&server)
        .await;

    // The delay keeps the renewal in flight while the other faulted
    // requests arrive, forcing them onto the waiter queue.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(json!({"accessToken": "tok-2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client.store().set_access_token(AccessToken::new("tok-1"));

    let query = ListQuery::default();
    let (a, b, c) = tokio::join!(
        h.client.list::<Value>("nurse", &query),
        h.client.list::<Value>("nurse", &query),
        h.client.list::<Value>("nurse", &query),
    );

    assert_eq!(a.unwrap().total, 2);
    assert_eq!(b.unwrap().total, 2);
    assert_eq!(c.unwrap().total, 2);
    assert_eq!(h.client.store().access_token().unwrap().as_str(), "tok-2");
    // The expiries were recovered from, so nothing was toasted.
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_retried_request_fails_without_second_refresh() {
    let server = MockServer::start().await;

    // The backend rejects the fresh token too.
    Mock::given(method("GET"))
        .and(path("/nurse"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "TokenExpired"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-2"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client.store().set_access_token(AccessToken::new("tok-1"));

    let result = h.client.list::<Value>("nurse", &ListQuery::default()).await;

    match result {
        Err(Error::Api(err)) => assert_eq!(err.status, 401),
        other => panic!("expected 401 api error, got {:?}", other.map(|p| p.total)),
    }
    // Only the terminal, post-replay 401 was toasted.
    assert_eq!(h.notifier.errors(), vec!["TokenExpired".to_string()]);
}

#[tokio::test]
async fn test_refresh_failure_rejects_all_and_invalidates_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nurse"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "TokenExpired"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_delay(Duration::from_millis(200))
                .set_body_json(json!({"error": "SessionGone"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client.store().set_access_token(AccessToken::new("tok-1"));
    h.client.store().set_user(identity());

    let query = ListQuery::default();
    let (a, b) = tokio::join!(
        h.client.list::<Value>("nurse", &query),
        h.client.list::<Value>("nurse", &query),
    );

    assert!(matches!(a, Err(Error::Auth(_))));
    assert!(matches!(b, Err(Error::Auth(_))));
    assert!(h.client.store().access_token().is_none());
    assert!(h.client.store().user().is_none());
    assert_eq!(h.navigator.redirects.load(Ordering::SeqCst), 1);
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_no_redirect_when_already_on_login_view() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nurse"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "TokenExpired"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.navigator.on_login.store(true, Ordering::SeqCst);
    h.client.store().set_access_token(AccessToken::new("tok-1"));

    let result = h.client.list::<Value>("nurse", &ListQuery::default()).await;

    assert!(matches!(result, Err(Error::Auth(_))));
    assert_eq!(h.navigator.redirects.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Bootstrap Tests
// ============================================================================

#[tokio::test]
async fn test_bootstrap_establishes_session_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok-1",
            "user": identity_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);

    let first = h.client.bootstrap().await;
    let second = h.client.bootstrap().await;

    assert_eq!(first, SessionStatus::Ready);
    assert_eq!(second, SessionStatus::Ready);
    assert_eq!(h.client.store().access_token().unwrap().as_str(), "tok-1");
    assert_eq!(h.client.store().user().unwrap().name, "Siti");
    // Duplicate initialization produced exactly one renewal call.
    assert!(h.notifier.successes().is_empty());
}

#[tokio::test]
async fn test_bootstrap_failure_leaves_session_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "NoCookie"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);

    let first = h.client.bootstrap().await;
    let second = h.client.bootstrap().await;

    assert_eq!(first, SessionStatus::Failed);
    assert_eq!(second, SessionStatus::Failed);
    assert!(h.client.store().user().is_none());
    assert!(h.client.store().access_token().is_none());
    // A failed startup is not a session loss; nobody is redirected.
    assert_eq!(h.navigator.redirects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bootstrap_unauthorized_makes_a_single_renewal_call() {
    let server = MockServer::start().await;

    // No cookie at startup: the renewal itself comes back 401. That is
    // one failed bootstrap, not an expiry to refresh behind.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "NoCookie"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let status = h.client.bootstrap().await;

    assert_eq!(status, SessionStatus::Failed);
    assert!(h.client.store().user().is_none());
    assert_eq!(h.navigator.redirects.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_silent_call_suppresses_notifications_but_still_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patient-histories"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let h = harness(&server);
    let result = h
        .client
        .get::<Value>("/patient-histories", CallOpts::silent())
        .await;

    match result {
        Err(Error::Api(err)) => assert_eq!(err.status, 500),
        other => panic!("expected api error, got {:?}", other),
    }
    assert!(h.notifier.errors().is_empty());
    assert!(h.notifier.successes().is_empty());
}

#[tokio::test]
async fn test_application_error_on_2xx_notifies_but_resolves() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Quota exceeded"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let result = h.client.request(RequestSpec::get("/export")).await;

    assert!(result.is_ok());
    assert_eq!(h.notifier.errors(), vec!["Quota exceeded".to_string()]);
}

#[tokio::test]
async fn test_success_toast_surfaces_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/nurse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Nurse created",
            "data": {"id": "n-3"}
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let created: Value = h
        .client
        .create("nurse", &json!({"name": "Ani"}), CallOpts::success_toast())
        .await
        .unwrap();

    assert_eq!(created["data"]["id"], "n-3");
    assert_eq!(h.notifier.successes(), vec!["Nurse created".to_string()]);
}

#[tokio::test]
async fn test_success_message_override() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/patient/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client
        .remove(
            "patient",
            "p-1",
            CallOpts::default().with_success_message("Patient removed"),
        )
        .await
        .unwrap();

    assert_eq!(h.notifier.successes(), vec!["Patient removed".to_string()]);
}

#[tokio::test]
async fn test_error_message_list_joined_in_notification() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/nurse"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": ["name is required", "email is invalid"]
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let result: siradu_core::Result<Value> = h
        .client
        .create("nurse", &json!({}), CallOpts::default())
        .await;

    assert!(result.is_err());
    assert_eq!(
        h.notifier.errors(),
        vec!["name is required, email is invalid".to_string()]
    );
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_store_despite_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Unreachable"})))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.client.store().set_access_token(AccessToken::new("tok-1"));
    h.client.store().set_user(identity());

    h.client.logout().await;

    assert!(h.client.store().access_token().is_none());
    assert!(h.client.store().user().is_none());
}
