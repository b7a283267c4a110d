//! Authenticated resource access for the portal endpoints.
//!
//! `ApiClient` layers on [`AuthClient`]: every request picks up the
//! stored bearer token (unless opted out), carries its own timeout, and
//! funnels every failure through the crate's error taxonomy. The typed
//! endpoint methods are thin wrappers over the generic request path and
//! add no logic of their own.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::client::json_headers;
use crate::auth::AuthClient;
use crate::error::{Error, Result};
use crate::models::{normalize_rfc, ExecutionReport, TaxpayerRecord};

// ============================================================================
// Constants
// ============================================================================

/// Payroll availability endpoint
const PAYROLL_ENDPOINT: &str = "/api/general/nomina";

/// Lodging availability endpoint
const LODGING_ENDPOINT: &str = "/api/general/hospedaje";

/// Taxpayer (RFC) lookup endpoint
const RFC_LOOKUP_ENDPOINT: &str = "/api/general/consultarfc";

/// Per-request options for [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Attach the stored bearer token. On by default; turned off the
    /// request goes out with plain JSON headers.
    pub requires_auth: bool,
    /// Caller header overrides, merged on top of the computed headers.
    /// The caller wins on key collision.
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            requires_auth: true,
            headers: HeaderMap::new(),
        }
    }
}

/// API client for the portal's resource endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    auth: AuthClient,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Wrap an auth client, sharing its HTTP connection pool, origin,
    /// and timeout.
    pub fn new(auth: AuthClient) -> Self {
        Self {
            client: auth.http().clone(),
            base_url: auth.base_url().to_string(),
            timeout: auth.timeout(),
            auth,
        }
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Override the per-request timeout (default 60 seconds), for the
    /// login path as well.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
        self.auth.set_timeout(timeout);
    }

    /// Replace the target origin for all subsequent calls, login
    /// included. In-flight calls are unaffected.
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.auth.set_base_url(url);
        self.base_url = self.auth.base_url().to_string();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request against an endpoint path and decode the JSON
    /// response. The request carries its own timeout, and dropping the
    /// returned future aborts the call — one request timing out or
    /// being abandoned never affects another.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(url = %url, "Dispatching portal request");

        let response = builder
            .headers(self.request_headers(options))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout))?;

        if !status.is_success() {
            debug!(status = %status, url = %url, "Portal request failed");
            return Err(Error::from_status(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Computed headers for one request: auth headers (or plain JSON
    /// headers), then caller overrides.
    fn request_headers(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = if options.requires_auth {
            self.auth.auth_headers()
        } else {
            json_headers()
        };
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, None::<&()>, &RequestOptions::default())
            .await
    }

    // ===== Resource endpoints =====

    /// Fetch the payroll availability report.
    pub async fn fetch_payroll(&self) -> Result<ExecutionReport> {
        self.get(PAYROLL_ENDPOINT).await
    }

    /// Fetch the lodging availability report.
    pub async fn fetch_lodging(&self) -> Result<ExecutionReport> {
        self.get(LODGING_ENDPOINT).await
    }

    /// Look up taxpayer registrations by RFC. The input is trimmed and
    /// uppercased before dispatch; an RFC with no registrations yields
    /// an empty list, not an error.
    pub async fn lookup_rfc(&self, rfc: &str) -> Result<Vec<TaxpayerRecord>> {
        let rfc = normalize_rfc(rfc);
        let endpoint = format!("{}?rfc={}", RFC_LOOKUP_ENDPOINT, rfc);
        self.request(Method::POST, &endpoint, None::<&()>, &RequestOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::{MemoryTokenStore, TokenStore};
    use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
    use std::sync::Arc;

    fn client_with_token(token: Option<&str>) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::new());
        if let Some(token) = token {
            store.save(token);
        }
        ApiClient::new(AuthClient::new("http://localhost:44306", store))
    }

    #[test]
    fn test_request_headers_attach_bearer() {
        let client = client_with_token(Some("abc.def.ghi"));
        let headers = client.request_headers(&RequestOptions::default());
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc.def.ghi");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_request_headers_without_auth() {
        let client = client_with_token(Some("abc.def.ghi"));
        let options = RequestOptions {
            requires_auth: false,
            ..Default::default()
        };
        let headers = client.request_headers(&options);
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_caller_overrides_win_on_collision() {
        let client = client_with_token(Some("abc.def.ghi"));
        let mut overrides = HeaderMap::new();
        overrides.insert(ACCEPT, HeaderValue::from_static("application/vnd.portal+json"));
        overrides.insert("x-trace-id", HeaderValue::from_static("req-42"));

        let options = RequestOptions {
            headers: overrides,
            ..Default::default()
        };
        let headers = client.request_headers(&options);
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.portal+json");
        assert_eq!(headers.get("x-trace-id").unwrap(), "req-42");
        // Untouched computed headers survive the merge
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc.def.ghi");
    }

    #[test]
    fn test_set_base_url_retargets_auth_too() {
        let mut client = client_with_token(None);
        client.set_base_url("https://portal.example.gob.mx/");
        assert_eq!(client.base_url(), "https://portal.example.gob.mx");
        assert_eq!(client.auth().base_url(), "https://portal.example.gob.mx");
    }
}
