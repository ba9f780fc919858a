// Beeswax session
//
// One `Session` owns the base endpoint, the lazily-built cookie-carrying HTTP
// client, and the credential provider used for re-authentication. Every
// accessor shares it through an `Arc` and routes requests through `call`,
// which re-authenticates and retries once when a request fails with a
// transport or protocol error.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

use crate::credentials::{CredentialProvider, NoCredentials, StoredCredentials};
use crate::envelope::Envelope;
use crate::error::Error;
use crate::params::Params;
use crate::transport::TransportConfig;

/// Path segment of the session login endpoint.
pub const AUTHENTICATE_PATH: &str = "authenticate";

// ── Request options ──────────────────────────────────────────────────

/// A file attached to an upload request as multipart form data.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Read an upload from disk; the file name is taken from the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    // Forms are single-use, so one is built per attempt.
    fn to_form(&self) -> Result<Form, Error> {
        let mut part = Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        if let Some(ref mime) = self.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| Error::protocol(format!("invalid upload MIME type '{mime}': {e}")))?;
        }
        Ok(Form::new().part("file", part))
    }
}

/// Everything a request carries besides its method and path.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Sent as the query string.
    pub query: Params,
    /// Sent as a JSON body.
    pub body: Option<Value>,
    /// Sent as a multipart `file` part.
    pub file: Option<UploadFile>,
}

impl RequestOptions {
    pub fn query(query: Params) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn body(body: Params) -> Self {
        Self {
            body: Some(body.into_body()),
            ..Self::default()
        }
    }

    pub fn upload(file: UploadFile) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// Shared connection to the Beeswax API.
///
/// Holds no explicit "logged in" flag: the session cookie lives in the
/// transport's jar, and a stale cookie is detected by the next call failing.
pub struct Session {
    endpoint: RwLock<Option<String>>,
    http: OnceCell<reqwest::Client>,
    transport: TransportConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint())
            .field("connected", &self.is_connected())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Session {
    /// Create an unconfigured session. Nothing touches the network until the
    /// first call; call [`configure`](Self::configure) before that.
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            endpoint: RwLock::new(None),
            http: OnceCell::new(),
            transport,
            credentials: Arc::new(NoCredentials),
        }
    }

    /// Use `provider` whenever authentication lacks explicit credentials.
    pub fn with_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = provider;
        self
    }

    /// Set the base URL every request path is appended to.
    ///
    /// The value is used verbatim as a prefix, so it normally ends with `/`
    /// (e.g. `https://acme.api.beeswax.com/rest/`). An already-built HTTP
    /// client is kept, together with its cookies.
    pub fn configure(&self, endpoint_url: impl Into<String>) -> Result<(), Error> {
        let endpoint_url = endpoint_url.into();
        if endpoint_url.trim().is_empty() {
            return Err(Error::configuration("endpoint URL must not be empty"));
        }
        if self.http.initialized() {
            debug!(endpoint = %endpoint_url, "endpoint changed after first use; keeping transport");
        }
        *self.endpoint.write().unwrap_or_else(PoisonError::into_inner) = Some(endpoint_url);
        Ok(())
    }

    /// The configured base URL, if any.
    pub fn endpoint(&self) -> Option<String> {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The provider consulted by [`authenticate`](Self::authenticate).
    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Whether the HTTP client has been built yet.
    pub fn is_connected(&self) -> bool {
        self.http.initialized()
    }

    // ── URL & transport ──────────────────────────────────────────────

    /// `{endpoint}{segments joined by '/'}`
    pub fn url_for(&self, segments: &[&str]) -> Result<Url, Error> {
        let Some(base) = self.endpoint() else {
            return Err(Error::configuration(
                "no endpoint configured; call Session::configure first",
            ));
        };
        let full = format!("{base}{}", segments.join("/"));
        Url::parse(&full)
            .map_err(|e| Error::configuration(format!("invalid endpoint URL '{full}': {e}")))
    }

    async fn http(&self) -> Result<&reqwest::Client, Error> {
        self.http
            .get_or_try_init(|| async {
                debug!("building HTTP client");
                self.transport.build_client()
            })
            .await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, Error> {
        let http = self.http().await?;

        // Only the path is logged: the query may carry a password.
        debug!(%method, path = url.path(), "sending request");

        let mut request = http.request(method, url);
        let query = options.query.to_query();
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(ref body) = options.body {
            request = request.json(body);
        }
        if let Some(ref file) = options.file {
            request = request.multipart(file.to_form()?);
        }

        request.send().await.map_err(Error::Transport)
    }

    // ── Calls ────────────────────────────────────────────────────────

    /// Issue one request and unwrap the response envelope. No retry.
    pub async fn raw_call(
        &self,
        method: Method,
        segments: &[&str],
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let url = self.url_for(segments)?;
        let resp = self.send(method, url, options).await?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        decode_response(status, &body)
    }

    /// Log in, filling missing credentials from the credential provider.
    ///
    /// Explicit values win field by field; the provider is consulted only
    /// when at least one is missing. Failures propagate unchanged.
    pub async fn authenticate(
        &self,
        username: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<Value, Error> {
        let explicit = StoredCredentials {
            username: username.filter(|u| !u.is_empty()).map(str::to_owned),
            password: password
                .filter(|p| !p.expose_secret().is_empty())
                .cloned(),
        };
        let credentials = if explicit.is_complete() {
            explicit
        } else {
            debug!("credentials incomplete, consulting credential provider");
            explicit.or(self.credentials.lookup()?)
        };

        let query = Params::new()
            .with_opt("email", credentials.username.clone())
            .with_opt(
                "password",
                credentials
                    .password
                    .as_ref()
                    .map(|p| p.expose_secret().to_owned()),
            );

        let payload = self
            .raw_call(
                Method::POST,
                &[AUTHENTICATE_PATH],
                &RequestOptions::query(query),
            )
            .await?;
        info!(user = credentials.username.as_deref().unwrap_or(""), "authenticated");
        Ok(payload)
    }

    /// Issue a request, re-authenticating and retrying once on a transport
    /// or protocol error.
    ///
    /// The retry is a single extra attempt: its outcome, success or failure,
    /// is returned as is. A failed re-authentication is returned instead of
    /// retrying.
    pub async fn call(
        &self,
        method: Method,
        segments: &[&str],
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let first = match self.raw_call(method.clone(), segments, options).await {
            Ok(payload) => return Ok(payload),
            Err(err) if err.is_retryable() => err,
            Err(err) => return Err(err),
        };

        warn!(
            %method,
            path = %segments.join("/"),
            error = %first,
            "request failed, re-authenticating and retrying once"
        );
        self.authenticate(None, None).await?;
        self.raw_call(method, segments, options).await
    }
}

/// Decode a response body into its payload.
///
/// A body that is not an envelope is a protocol error on a non-2xx status
/// (login pages, gateway errors) and a deserialization error otherwise.
fn decode_response(status: StatusCode, body: &str) -> Result<Value, Error> {
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !status.is_success() => {
            Err(Error::protocol(format!("HTTP {status}: {}", body.trim())))
        }
        Err(e) => Err(Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn url_for_concatenates_segments() {
        let session = Session::default();
        session.configure("https://api.example.com/rest/").unwrap();
        let url = session.url_for(&["creative_bulk_upload", "upload", "7"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/rest/creative_bulk_upload/upload/7"
        );
    }

    #[test]
    fn url_for_requires_endpoint() {
        let session = Session::default();
        assert!(session.url_for(&["account"]).unwrap_err().is_configuration());
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let session = Session::default();
        assert!(session.configure("  ").unwrap_err().is_configuration());
        assert_eq!(session.endpoint(), None);
    }

    #[test]
    fn unparseable_endpoint_is_configuration_error() {
        let session = Session::default();
        session.configure("not a url/").unwrap();
        assert!(session.url_for(&["account"]).unwrap_err().is_configuration());
    }

    #[test]
    fn decode_success_envelope() {
        let body = json!({ "success": true, "payload": { "id": 7 } }).to_string();
        assert_eq!(
            decode_response(StatusCode::OK, &body).unwrap(),
            json!({ "id": 7 })
        );
    }

    #[test]
    fn decode_envelope_on_error_status() {
        let body = json!({ "success": false, "message": "Not logged in" }).to_string();
        match decode_response(StatusCode::UNAUTHORIZED, &body) {
            Err(Error::Protocol { message }) => assert_eq!(message, "Not logged in"),
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[test]
    fn decode_non_json_error_status_is_protocol() {
        let err = decode_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn decode_non_json_success_is_deserialization() {
        let err = decode_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn upload_from_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segments.csv");
        std::fs::write(&path, b"user1,1001\n").unwrap();
        let upload = UploadFile::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "segments.csv");
        assert_eq!(upload.bytes, b"user1,1001\n");
    }

    #[test]
    fn transport_is_built_lazily() {
        let session = Session::default();
        session.configure("https://api.example.com/").unwrap();
        assert!(!session.is_connected());
    }
}
