//! Fetch client with timeout and bounded retry.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::request::{Method, Request};
use crate::response::Response;
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;
use crate::transport::{Transport, UreqTransport};
use crate::FetchError;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Same timeout, never retried.
    pub fn without_retry(&self) -> Self {
        Self {
            timeout: self.timeout,
            retry: RetryPolicy::none(),
        }
    }
}

/// HTTP client bound to one backend base URL.
#[derive(Clone)]
pub struct FetchClient {
    base_url: String,
    token: Option<String>,
    policy: FetchPolicy,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    /// Create a client using a `ureq` transport sized to `policy`.
    pub fn new(base_url: impl Into<String>, policy: FetchPolicy) -> Self {
        let transport = UreqTransport::new(policy.timeout.connect, policy.timeout.total);
        Self::with_transport(base_url, policy, Arc::new(transport))
    }

    /// Create a client over any transport.
    pub fn with_transport(
        base_url: impl Into<String>,
        policy: FetchPolicy,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            policy,
            transport,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Build a request for `path` carrying the client's default headers.
    pub fn request(&self, method: Method, path: &str) -> Request {
        let request = Request::new(method, self.url(path)).header("Accept", "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET a path and return the raw successful response.
    pub async fn get(&self, path: &str) -> Result<Response, FetchError> {
        let request = self.request(Method::Get, path);
        self.execute(request, &self.policy).await
    }

    /// Send a JSON body and return the raw successful response.
    ///
    /// Only idempotent methods use the client's retry policy; POSTs are sent
    /// exactly once.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, FetchError> {
        let policy = if method.is_idempotent() {
            self.policy.clone()
        } else {
            self.policy.without_retry()
        };
        self.send_json_with_policy(method, path, body, &policy).await
    }

    /// Send a JSON body with an explicit policy.
    pub async fn send_json_with_policy<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        policy: &FetchPolicy,
    ) -> Result<Response, FetchError> {
        let request = self.request(method, path).json(body)?;
        self.execute(request, policy).await
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        self.get(path).await?.json()
    }

    /// Run a request under `policy`, retrying what the policy allows.
    ///
    /// Every attempt is bounded by the policy's total timeout. Non-2xx
    /// responses are turned into [`FetchError::Server`].
    pub async fn execute(
        &self,
        request: Request,
        policy: &FetchPolicy,
    ) -> Result<Response, FetchError> {
        let mut attempt = 0u32;
        loop {
            let outcome = self.attempt(request.clone(), policy).await;
            match outcome {
                Ok(response) => {
                    debug!(
                        method = request.method.as_str(),
                        url = %request.url,
                        status = response.status,
                        attempt,
                        "Request completed"
                    );
                    return Ok(response);
                }
                Err(error) if policy.retry.should_retry(&error, attempt) => {
                    let delay = policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        method = request.method.as_str(),
                        url = %request.url,
                        attempt = attempt + 1,
                        max_retries = policy.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying request"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn attempt(
        &self,
        request: Request,
        policy: &FetchPolicy,
    ) -> Result<Response, FetchError> {
        let total = policy.timeout.total;
        match tokio::time::timeout(total, self.transport.send(request)).await {
            Ok(result) => result?.error_for_status(),
            Err(_) => Err(FetchError::Timeout(total)),
        }
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::BackoffStrategy;
    use crate::transport::mock::MockTransport;
    use std::time::Duration;

    fn client(transport: Arc<MockTransport>, max_retries: u32) -> FetchClient {
        let policy = FetchPolicy::new(
            TimeoutConfig::from_millis(200),
            RetryPolicy::new(max_retries).with_backoff(BackoffStrategy::None),
        );
        FetchClient::with_transport("http://shop.test/", policy, transport)
    }

    #[test]
    fn test_url_joining() {
        let c = client(Arc::new(MockTransport::new()), 0);
        assert_eq!(c.url("/api/orders"), "http://shop.test/api/orders");
        assert_eq!(c.url("api/orders"), "http://shop.test/api/orders");
        assert_eq!(c.url("https://other.test/x"), "https://other.test/x");
    }

    #[test]
    fn test_token_header() {
        let c = client(Arc::new(MockTransport::new()), 0).with_token("secret");
        let req = c.request(Method::Get, "/api/x");
        assert_eq!(req.header_value("Authorization"), Some("Bearer secret"));

        let c = client(Arc::new(MockTransport::new()), 0).with_token("  ");
        assert_eq!(c.request(Method::Get, "/").header_value("Authorization"), None);
        assert!(!format!("{c:?}").contains("secret"));
    }

    #[tokio::test]
    async fn test_server_error_then_success_is_retried() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(503, r#"{"error": "busy"}"#)
                .respond(200, r#"{"ok": true}"#),
        );
        let c = client(transport.clone(), 2);

        let value: serde_json::Value = c.get_json("/api/thing").await.unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(500, "")
                .respond(500, "")
                .respond(500, "")
                .respond(200, "{}"),
        );
        let c = client(transport.clone(), 2);

        let err = c.get("/api/thing").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(422, r#"{"error": "quantity must be positive"}"#)
                .respond(200, "{}"),
        );
        let c = client(transport.clone(), 2);

        let err = c.get("/api/thing").await.unwrap_err();
        assert_eq!(err.to_string(), "quantity must be positive");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_post_is_sent_once() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(502, "Bad Gateway")
                .respond(200, "{}"),
        );
        let c = client(transport.clone(), 2);

        let err = c
            .send_json(Method::Post, "/api/orders", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.last_request().method, Method::Post);
    }

    #[tokio::test]
    async fn test_put_uses_retry_policy() {
        let transport = Arc::new(
            MockTransport::new()
                .fail(FetchError::Connection("reset".into()))
                .respond(200, "{}"),
        );
        let c = client(transport.clone(), 1);

        assert!(c
            .send_json(Method::Put, "/api/sets/1/visibility", &serde_json::json!({}))
            .await
            .is_ok());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(200, "{}")
                .with_delay(Duration::from_secs(5)),
        );
        let c = client(transport.clone(), 0);

        let err = c.get("/api/slow").await.unwrap_err();
        assert_eq!(err, FetchError::Timeout(Duration::from_millis(200)));
    }
}
