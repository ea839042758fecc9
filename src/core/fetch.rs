//! Read-with-fallback: every backend read resolves to data, and says whether
//! that data is live or came from a mock table.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::errors::FetchError;
use crate::core::transport::Transport;

/// Longest slice of a non-JSON error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Fallback { data: T, cause: FetchError },
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }

    pub fn cause(&self) -> Option<&FetchError> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { cause, .. } => Some(cause),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Live(data) => Fetched::Live(f(data)),
            Fetched::Fallback { data, cause } => Fetched::Fallback { data: f(data), cause },
        }
    }
}

/// Error body shape of the Spring backend. Every field is optional so that
/// any JSON object is accepted.
#[derive(Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn error_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<BackendErrorBody>(body) {
        if let Some(msg) = parsed.message.or(parsed.error) {
            return msg;
        }
    }
    String::from_utf8_lossy(body).chars().take(MAX_ERROR_BODY).collect()
}

/// GET `path` and decode a 2xx JSON body into `T`.
pub async fn fetch_json<T, X>(transport: &X, path: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    tracing::debug!(path, "fetching");
    let response = transport.get(path).await?;
    tracing::info!(path, status = response.status, "backend responded");

    let status = http::StatusCode::from_u16(response.status)
        .map_err(|e| FetchError::payload(path, e))?;
    if !status.is_success() {
        return Err(FetchError::Status {
            path: path.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            message: error_message(&response.body),
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| FetchError::payload(path, e))
}

/// Like [`fetch_json`], but any failure is logged and replaced by `mock()`.
pub async fn fetch_or_fallback<T, X, F>(transport: &X, path: &str, what: &str, mock: F) -> Fetched<T>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
    F: FnOnce() -> T,
{
    match fetch_json(transport, path).await {
        Ok(data) => Fetched::Live(data),
        Err(cause) => {
            tracing::warn!(error = %cause, "error fetching {}, falling back to mock data", what);
            Fetched::Fallback { data: mock(), cause }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_backend_message() {
        let body = br#"{"status":404,"error":"Not Found","message":"User not found with username : 'x'"}"#;
        assert_eq!(error_message(body), "User not found with username : 'x'");
    }

    #[test]
    fn error_message_keeps_plain_text_bounded() {
        let body = "x".repeat(1000);
        assert_eq!(error_message(body.as_bytes()).len(), MAX_ERROR_BODY);
        assert_eq!(error_message(b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn map_keeps_provenance() {
        let cause = FetchError::not_found("user", "ghost");
        let fetched = Fetched::Fallback { data: 2, cause: cause.clone() }.map(|n| n * 10);
        assert_eq!(fetched.data(), &20);
        assert_eq!(fetched.cause(), Some(&cause));
        assert!(!Fetched::Live(1).is_fallback());
    }
}
