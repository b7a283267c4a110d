//! Login exchange and auth-header construction.
//!
//! The portal issues an opaque bearer token on login, but the response
//! shape is not fully standardized: the token may sit in the body, in a
//! response header, or under an alternate field name. `AuthClient`
//! resolves that, persists the token through an injected [`TokenStore`],
//! and builds the headers every authenticated request carries.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::auth::store::TokenStore;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::models::{LoginRequest, LoginResponse};

/// Login endpoint path
const LOGIN_ENDPOINT: &str = "/api/general/login";

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    /// Server greeting (`mensajeCiudadano`), when present
    pub message: Option<String>,
}

/// Performs the login protocol exchange against the portal.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    store: Arc<dyn TokenStore>,
}

impl AuthClient {
    /// Create an auth client against the given origin, persisting
    /// tokens through `store`.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .build()
            .expect("failed to build HTTP client");
        Self::with_client(client, base_url, store)
    }

    /// Build on an existing HTTP client, sharing its connection pool.
    pub(crate) fn with_client(
        client: Client,
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            store,
        }
    }

    /// Override the request timeout (default 60 seconds).
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Retarget subsequent login calls; in-flight calls are unaffected.
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = normalize_base_url(url.into());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Perform the login exchange and persist the resulting token.
    ///
    /// The token may arrive in the body (`token`), in the response
    /// `Authorization` header, or under `jwt`/`accessToken`; the first
    /// match in that order wins. A 2xx body that claims success
    /// (`estatusEjecucion == 1`) without any token is reported as
    /// [`Error::MissingToken`].
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionData> {
        let url = format!("{}{}", self.base_url, LOGIN_ENDPOINT);
        let body = LoginRequest { username, password };

        debug!(url = %url, "Submitting login request");

        let response = self
            .client
            .post(&url)
            .headers(json_headers())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Login rejected");
            return Err(Error::from_status(status, &text));
        }

        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout))?;
        let parsed: LoginResponse =
            serde_json::from_str(&text).map_err(|e| Error::Parse(e.to_string()))?;

        match extract_token(&parsed, &headers) {
            Some(token) => {
                self.store.save(&token);
                info!("Login succeeded; session token stored");
                Ok(SessionData {
                    token,
                    message: parsed.citizen_message.filter(|m| !m.is_empty()),
                })
            }
            None if parsed.is_success() => {
                warn!("Login response claimed success but carried no token");
                Err(Error::MissingToken)
            }
            None => Err(Error::InvalidCredentials(parsed.rejection_message())),
        }
    }

    /// Headers for an authenticated request: JSON content headers plus
    /// a bearer `Authorization` when a token is stored. Never fails —
    /// with no token the caller proceeds unauthenticated and the server
    /// answers 401 if auth was required.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = json_headers();
        if let Some(token) = self.store.get().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(e) => {
                    warn!(error = %e, "Stored token is not a valid header value; sending unauthenticated");
                }
            }
        }
        headers
    }

    /// Whether a session token is stored. No server-side check is made;
    /// a stale token reads as authenticated until a request returns 401.
    pub fn is_authenticated(&self) -> bool {
        self.store.get().map(|t| !t.is_empty()).unwrap_or(false)
    }

    /// End the session locally. This API has no server-side
    /// invalidation call; clearing the stored token is the whole
    /// operation.
    pub fn logout(&self) {
        self.store.clear();
        info!("Session token cleared");
    }
}

/// Baseline headers for every portal request.
pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Resolve the session token from a login response. The order is part
/// of the external contract: body `token` field, then the
/// `Authorization: Bearer` response header, then the `jwt` and
/// `accessToken` alternates. First match wins.
fn extract_token(body: &LoginResponse, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = non_empty(&body.token) {
        return Some(token);
    }
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(text) = value.to_str() {
            if let Some(token) = text.strip_prefix("Bearer ") {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    non_empty(&body.jwt).or_else(|| non_empty(&body.access_token))
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|t| !t.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryTokenStore;

    fn bearer_header(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_prefers_body_token() {
        let body = LoginResponse {
            token: Some("body-token".into()),
            jwt: Some("jwt-token".into()),
            ..Default::default()
        };
        let headers = bearer_header("Bearer header-token");
        assert_eq!(extract_token(&body, &headers).as_deref(), Some("body-token"));
    }

    #[test]
    fn test_extract_header_before_alternates() {
        let body = LoginResponse {
            jwt: Some("jwt-token".into()),
            access_token: Some("access-token".into()),
            ..Default::default()
        };
        let headers = bearer_header("Bearer header-token");
        assert_eq!(
            extract_token(&body, &headers).as_deref(),
            Some("header-token")
        );
    }

    #[test]
    fn test_extract_alternate_field_order() {
        let body = LoginResponse {
            jwt: Some("jwt-token".into()),
            access_token: Some("access-token".into()),
            ..Default::default()
        };
        assert_eq!(
            extract_token(&body, &HeaderMap::new()).as_deref(),
            Some("jwt-token")
        );

        let body = LoginResponse {
            access_token: Some("access-token".into()),
            ..Default::default()
        };
        assert_eq!(
            extract_token(&body, &HeaderMap::new()).as_deref(),
            Some("access-token")
        );
    }

    #[test]
    fn test_extract_skips_empty_candidates() {
        // An empty body token must not shadow the header token
        let body = LoginResponse {
            token: Some(String::new()),
            ..Default::default()
        };
        let headers = bearer_header("Bearer header-token");
        assert_eq!(
            extract_token(&body, &headers).as_deref(),
            Some("header-token")
        );
    }

    #[test]
    fn test_extract_requires_bearer_prefix() {
        let body = LoginResponse::default();
        let headers = bearer_header("Token abc");
        assert_eq!(extract_token(&body, &headers), None);
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(extract_token(&LoginResponse::default(), &HeaderMap::new()), None);
    }

    #[test]
    fn test_auth_headers_without_token() {
        let auth = AuthClient::new("http://localhost", Arc::new(MemoryTokenStore::new()));
        let headers = auth.auth_headers();
        assert!(headers.get(header::AUTHORIZATION).is_none());
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_auth_headers_with_token() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc.def.ghi");
        let auth = AuthClient::new("http://localhost", store);
        let headers = auth.auth_headers();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer abc.def.ghi"
        );
    }

    #[test]
    fn test_is_authenticated_tracks_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let auth = AuthClient::new("http://localhost", store.clone());
        assert!(!auth.is_authenticated());

        store.save("tok");
        assert!(auth.is_authenticated());

        auth.logout();
        assert!(!auth.is_authenticated());
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_empty_token_reads_as_unauthenticated() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("");
        let auth = AuthClient::new("http://localhost", store);
        assert!(!auth.is_authenticated());
        assert!(auth.auth_headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut auth = AuthClient::new(
            "http://localhost:44306/",
            Arc::new(MemoryTokenStore::new()),
        );
        assert_eq!(auth.base_url(), "http://localhost:44306");

        auth.set_base_url("https://portal.example.gob.mx///");
        assert_eq!(auth.base_url(), "https://portal.example.gob.mx");
    }
}
