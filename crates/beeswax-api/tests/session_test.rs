// Integration tests for `Session` using wiremock.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use beeswax_api::{
    CredentialProvider, Error, Method, RequestOptions, SecretString, Session, StoredCredentials,
    TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Provider that counts lookups and hands out a fixed pair.
#[derive(Default)]
struct CountingProvider {
    lookups: AtomicUsize,
    stored: StoredCredentials,
}

impl CountingProvider {
    fn with(username: &str, password: &str) -> Self {
        Self {
            lookups: AtomicUsize::new(0),
            stored: StoredCredentials::new(username, password),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CredentialProvider for CountingProvider {
    fn lookup(&self) -> Result<StoredCredentials, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored.clone())
    }

    fn store(&self, _username: &str, _password: &SecretString) -> Result<(), Error> {
        Ok(())
    }
}

fn ok(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "payload": payload }))
}

fn failure(errors: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": false, "errors": errors }))
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

async fn setup(provider: Arc<CountingProvider>) -> (MockServer, Session) {
    let server = MockServer::start().await;
    let session = Session::new(TransportConfig::default()).with_credentials(provider);
    session.configure(format!("{}/", server.uri())).unwrap();
    (server, session)
}

async fn mount_authenticate(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ok(json!({ "user_id": 1 })))
        .expect(times)
        .mount(server)
        .await;
}

// ── Configuration ───────────────────────────────────────────────────

#[tokio::test]
async fn test_call_before_configure_is_configuration_error() {
    let provider = Arc::new(CountingProvider::default());
    let session = Session::default().with_credentials(provider.clone());

    let err = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_configuration(), "got {err:?}");
    assert_eq!(provider.lookups(), 0);
}

// ── Envelope ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_success_returns_payload_verbatim() {
    let (server, session) = setup(Arc::new(CountingProvider::default())).await;
    let payload = json!([{ "account_id": 4, "account_name": "Acme", "active": true }]);

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ok(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let result = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(result, payload);
}

#[tokio::test]
async fn test_raw_call_joins_errors_without_retry() {
    let provider = Arc::new(CountingProvider::default());
    let (server, session) = setup(provider.clone()).await;

    Mock::given(method("GET"))
        .and(path("/campaign"))
        .respond_with(failure(&["error_1", "error_2"]))
        .expect(1)
        .mount(&server)
        .await;
    mount_authenticate(&server, 0).await;

    let err = session
        .raw_call(Method::GET, &["campaign"], &RequestOptions::default())
        .await
        .unwrap_err();
    match err {
        Error::Protocol { message } => assert_eq!(message, "error_1\nerror_2"),
        other => panic!("expected Protocol, got {other:?}"),
    }
    assert_eq!(provider.lookups(), 0);
}

// ── Retry ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fail_then_succeed_reauthenticates_once() {
    let provider = Arc::new(CountingProvider::with("ops@example.com", "hunter2"));
    let (server, session) = setup(provider.clone()).await;

    // Mounted first, so it answers the first request only.
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(failure(&["invalid id"]))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ok(json!([{ "account_id": 4 }])))
        .expect(1)
        .mount(&server)
        .await;
    mount_authenticate(&server, 1).await;

    let result = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(result, json!([{ "account_id": 4 }]));
    assert_eq!(provider.lookups(), 1);
}

#[tokio::test]
async fn test_fail_twice_returns_second_failure() {
    let provider = Arc::new(CountingProvider::with("ops@example.com", "hunter2"));
    let (server, session) = setup(provider.clone()).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(failure(&["invalid id"]))
        .expect(2)
        .mount(&server)
        .await;
    mount_authenticate(&server, 1).await;

    let err = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap_err();

    match err {
        Error::Protocol { message } => assert_eq!(message, "invalid id"),
        other => panic!("expected Protocol, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_reauthentication_propagates() {
    let provider = Arc::new(CountingProvider::with("ops@example.com", "wrong"));
    let (server, session) = setup(provider.clone()).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(failure(&["Not logged in"]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(failure(&["Invalid credentials"]))
        .expect(1)
        .mount(&server)
        .await;

    let err = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap_err();

    match err {
        Error::Protocol { message } => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Protocol, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_gateway_error_is_retried() {
    let (server, session) = setup(Arc::new(CountingProvider::with("a@b.c", "pw"))).await;

    Mock::given(method("GET"))
        .and(path("/strategy"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/strategy"))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;
    mount_authenticate(&server, 1).await;

    let result = session
        .call(Method::GET, &["strategy"], &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!([]));
}

#[tokio::test]
async fn test_malformed_success_body_is_not_retried() {
    let (server, session) = setup(Arc::new(CountingProvider::default())).await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;
    mount_authenticate(&server, 0).await;

    let err = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_transport_error_reauthenticates_then_propagates() {
    // Reserve a port, then free it so nothing listens there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let provider = Arc::new(CountingProvider::with("ops@example.com", "hunter2"));
    let session = Session::default().with_credentials(provider.clone());
    session.configure(format!("http://127.0.0.1:{port}/")).unwrap();

    let err = session
        .call(Method::GET, &["account"], &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
    assert_eq!(provider.lookups(), 1);
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_with_both_credentials_skips_provider() {
    let provider = Arc::new(CountingProvider::with("stored@example.com", "stored"));
    let (server, session) = setup(provider.clone()).await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(query_param("email", "me@example.com"))
        .and(query_param("password", "s3cret"))
        .respond_with(ok(json!({ "user_id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = session
        .authenticate(Some("me@example.com"), Some(&secret("s3cret")))
        .await
        .unwrap();

    assert_eq!(payload, json!({ "user_id": 7 }));
    assert_eq!(provider.lookups(), 0);
}

#[tokio::test]
async fn test_authenticate_without_credentials_uses_provider_once() {
    let provider = Arc::new(CountingProvider::with("stored@example.com", "stored"));
    let (server, session) = setup(provider.clone()).await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(query_param("email", "stored@example.com"))
        .and(query_param("password", "stored"))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    session.authenticate(None, None).await.unwrap();
    assert_eq!(provider.lookups(), 1);
}

#[tokio::test]
async fn test_authenticate_merges_per_field() {
    let provider = Arc::new(CountingProvider::with("stored@example.com", "stored"));
    let (server, session) = setup(provider.clone()).await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(query_param("email", "me@example.com"))
        .and(query_param("password", "stored"))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    session
        .authenticate(Some("me@example.com"), None)
        .await
        .unwrap();
    assert_eq!(provider.lookups(), 1);
}

#[tokio::test]
async fn test_session_cookie_is_reused() {
    let (server, session) = setup(Arc::new(CountingProvider::default())).await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(
            ok(json!({})).insert_header("set-cookie", "beeswax_session=abc123; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user_lookup"))
        .and(header("cookie", "beeswax_session=abc123"))
        .respond_with(ok(json!({ "user_id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    session
        .authenticate(Some("me@example.com"), Some(&secret("pw")))
        .await
        .unwrap();
    let me = session
        .raw_call(Method::GET, &["user_lookup"], &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(me["user_id"], 1);
    assert!(session.is_connected());
}

#[tokio::test]
async fn test_reconfigure_keeps_transport_and_cookies() {
    let (first, session) = setup(Arc::new(CountingProvider::default())).await;
    let second = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(
            ok(json!({})).insert_header("set-cookie", "beeswax_session=abc123; Path=/"),
        )
        .expect(1)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .and(path("/user_lookup"))
        .respond_with(ok(json!({ "user_id": 1 })))
        .expect(0)
        .mount(&first)
        .await;
    // Cookies are scoped to the host, not the port, so the jar built for the
    // first server still answers for the second.
    Mock::given(method("GET"))
        .and(path("/user_lookup"))
        .and(header("cookie", "beeswax_session=abc123"))
        .respond_with(ok(json!({ "user_id": 2 })))
        .expect(1)
        .mount(&second)
        .await;

    session
        .authenticate(Some("me@example.com"), Some(&secret("pw")))
        .await
        .unwrap();
    assert!(session.is_connected());

    let endpoint = format!("{}/", second.uri());
    session.configure(endpoint.clone()).unwrap();
    assert_eq!(session.endpoint(), Some(endpoint));
    assert!(session.is_connected());

    let me = session
        .raw_call(Method::GET, &["user_lookup"], &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(me["user_id"], 2);
}
