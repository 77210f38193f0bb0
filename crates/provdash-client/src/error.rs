use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a backend call, classified so call sites can tell a
/// rate limit apart from everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, DNS, TLS, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 429 from the backend.
    #[error("rate limited by backend (HTTP 429)")]
    RateLimited,

    /// Any other non-success status.
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// Success status, but the body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Three-way failure taxonomy the UI picks its messages from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkFailure,
    RateLimited,
    ServerError,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Network(_) => FailureKind::NetworkFailure,
            ApiError::RateLimited => FailureKind::RateLimited,
            // An unusable body is the server's fault as far as the UI is concerned.
            ApiError::Server { .. } | ApiError::Decode(_) => FailureKind::ServerError,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RateLimited => Some(429),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if status == 429 {
            ApiError::RateLimited
        } else {
            ApiError::Server {
                status,
                body: summarize_body(&body),
            }
        }
    }
}

/// Error bodies end up in one-line notices: collapse whitespace and cap
/// the length so an HTML error page does not flood the status bar.
fn summarize_body(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_BODY_CHARS {
        return flat;
    }
    let mut short: String = flat.chars().take(MAX_BODY_CHARS).collect();
    short.push_str("...");
    short
}

const MAX_BODY_CHARS: usize = 120;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network(format!("request timed out: {err}"))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::from_status(429, String::new()), ApiError::RateLimited);
        assert_eq!(
            ApiError::from_status(503, "busy".into()).kind(),
            FailureKind::ServerError
        );
        assert_eq!(
            ApiError::from_status(404, String::new()).status(),
            Some(404)
        );
    }

    #[test]
    fn test_server_body_is_flattened_and_capped() {
        let page = format!("<html>\n  <body>{}</body>\n</html>", "x".repeat(500));
        let ApiError::Server { status, body } = ApiError::from_status(502, page) else {
            panic!("expected a server error");
        };
        assert_eq!(status, 502);
        assert!(!body.contains('\n'));
        assert!(body.starts_with("<html> <body>xxx"));
        assert!(body.ends_with("..."));
        assert_eq!(body.chars().count(), MAX_BODY_CHARS + 3);

        assert_eq!(
            ApiError::from_status(500, "  db locked\n".to_string()),
            ApiError::Server {
                status: 500,
                body: "db locked".to_string()
            }
        );
    }

    #[test]
    fn test_decode_counts_as_server_error() {
        assert_eq!(
            ApiError::Decode("eof".into()).kind(),
            FailureKind::ServerError
        );
        assert_eq!(
            ApiError::Network("refused".into()).kind(),
            FailureKind::NetworkFailure
        );
    }
}
