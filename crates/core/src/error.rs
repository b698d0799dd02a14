use serde::Serialize;
use thiserror::Error;

/// Failure while loading a content document.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Transport failure or non-success HTTP status.
    #[error("unable to load data: {0}")]
    Fetch(String),

    /// The body was not valid JSON.
    #[error("malformed content document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Unified API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Upstream(String),

    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Upstream(_) => "content_unavailable",
            Self::Unavailable(_) => "loading",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Upstream(_) => 502,
            Self::Unavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_code_and_message() {
        let err = ApiError::Upstream("Could not load content data.".into());
        let envelope = serde_json::to_value(ErrorEnvelope::from(&err)).unwrap();
        assert_eq!(envelope["error"]["code"], "content_unavailable");
        assert_eq!(envelope["error"]["message"], "Could not load content data.");
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("unknown kind".into());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.code(), "bad_request");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: ContentError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ContentError::Parse(_)));
    }
}
