use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

/// Error returned by every [`WalrusClient`](crate::WalrusClient) operation.
///
/// Precondition failures (`FileNotFound`) are raised before any network
/// call; everything the publisher or aggregator answers with, and every
/// transport failure, is normalized into [`WalrusApiError`].
#[derive(Debug, thiserror::Error)]
pub enum WalrusClientError {
    /// Upload source path does not reference an existing regular file.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Upload source file existed but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination file of a blob download could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The service answered 2xx but the body was not valid JSON.
    #[error("{context}: failed to decode response body: {source}")]
    Decode {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failure reported by the publisher or aggregator, or a transport
    /// failure normalized into the same shape.
    #[error(transparent)]
    Api(#[from] WalrusApiError),
}

/// Structured error for a failed HTTP exchange with the Walrus API.
///
/// Carries the fields of the service's JSON error envelope
/// (`{"error": {"code", "status", "message", "details"}}`) when one was
/// returned, and a synthesized equivalent otherwise.
#[derive(Debug, Clone)]
pub struct WalrusApiError {
    /// Numeric error code; the HTTP status code unless the body overrode it.
    pub code: u16,
    /// Machine-readable status such as `NOT_FOUND` or `REQUEST_FAILED`.
    pub status: String,
    /// Human-readable message from the service, possibly empty.
    pub message: String,
    /// Additional structured details, forwarded verbatim.
    pub details: Vec<Value>,
    context: String,
}

impl WalrusApiError {
    /// The operation (and ID, where applicable) that produced this error.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Normalizes a non-2xx response, preferring the service's JSON error
    /// envelope over the bare HTTP status.
    ///
    /// An empty body, a non-JSON body, or JSON without the expected
    /// `"error"` object all fall back to the status code and its canonical
    /// reason phrase.
    pub(crate) async fn from_response(context: String, response: reqwest::Response) -> Self {
        let status_code = response.status();
        let reason = status_code.canonical_reason().unwrap_or("UNKNOWN");
        let body = response.bytes().await.unwrap_or_default();

        if !body.is_empty() {
            if let Ok(Value::Object(envelope)) = serde_json::from_slice::<Value>(&body) {
                if let Some(Value::Object(error)) = envelope.get("error") {
                    return Self {
                        code: error
                            .get("code")
                            .and_then(Value::as_u64)
                            .and_then(|code| u16::try_from(code).ok())
                            .unwrap_or(status_code.as_u16()),
                        status: error.get("status").and_then(Value::as_str).unwrap_or("UNKNOWN").to_string(),
                        message: error.get("message").and_then(Value::as_str).unwrap_or_default().to_string(),
                        details: error.get("details").and_then(Value::as_array).cloned().unwrap_or_default(),
                        context,
                    };
                }
            }
        }

        Self {
            code: status_code.as_u16(),
            status: reason.to_string(),
            message: format!("HTTP {}: {}", status_code.as_u16(), reason),
            details: Vec::new(),
            context,
        }
    }

    /// Normalizes a failure where no response was received at all
    /// (connection refused, timeout, DNS).
    pub(crate) fn from_transport(context: String, source: reqwest::Error) -> Self {
        Self {
            code: 500,
            status: "REQUEST_FAILED".to_string(),
            message: source.to_string(),
            details: Vec::new(),
            context,
        }
    }
}

impl fmt::Display for WalrusApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: HTTP {} - {}: {}", self.context, self.code, self.status, self.message)?;
        if !self.details.is_empty() {
            write!(f, " (Details: {})", Value::Array(self.details.clone()))?;
        }
        Ok(())
    }
}

impl std::error::Error for WalrusApiError {}
