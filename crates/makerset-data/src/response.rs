//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// An HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: Vec<(String, String)>,
    /// The response body.
    pub body: Vec<u8>,
}

/// The `{success, data, error}` wrapper most endpoints answer with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response was a server error (5xx status).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Parse an enveloped body and return its `data`.
    ///
    /// An envelope with `success: false` or an `error` field is reported as a
    /// server error even on a 2xx status.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let envelope: Envelope<T> = self.json()?;
        if envelope.success == Some(false) || envelope.error.is_some() {
            return Err(FetchError::Server {
                status: self.status,
                message: envelope
                    .error
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            });
        }
        envelope
            .data
            .ok_or_else(|| FetchError::Parse("response has no data".to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The message is taken from a JSON `error` (or `message`) field when the
    /// body has one, then from the raw body text.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .or_else(|| {
                self.text()
                    .ok()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or_else(|| format!("HTTP {}", self.status));
        Err(FetchError::Server {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, Vec::new(), body.to_vec())
    }

    #[test]
    fn test_response_status_classes() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(make_response(503, b"").is_server_error());
        assert!(!make_response(404, b"").is_server_error());
    }

    #[test]
    fn test_error_field_becomes_message() {
        let err = make_response(400, br#"{"error": "Set 4 is not published"}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Server {
                status: 400,
                message: "Set 4 is not published".to_string()
            }
        );
    }

    #[test]
    fn test_plain_text_and_empty_error_bodies() {
        let err = make_response(502, b"Bad Gateway\n").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");

        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_envelope_data() {
        let resp = make_response(200, br#"{"success": true, "data": {"id": 5}}"#);
        let data: serde_json::Value = resp.envelope().unwrap();
        assert_eq!(data["id"], 5);
    }

    #[test]
    fn test_envelope_failure_on_2xx() {
        let resp = make_response(200, br#"{"success": false, "error": "Out of stock"}"#);
        let err = resp.envelope::<serde_json::Value>().unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.to_string(), "Out of stock");
    }

    #[test]
    fn test_envelope_without_data() {
        let resp = make_response(200, br#"{"success": true}"#);
        assert!(matches!(
            resp.envelope::<serde_json::Value>(),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_header_case_insensitive() {
        let resp = Response::new(
            200,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            Vec::new(),
        );
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }
}
