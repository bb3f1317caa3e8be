//! API Errors
//!
//! Every failure a page can show. Pages render `user_message()` inline or in an
//! alert; nothing is retried here.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body shapes the backend sends
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Map a non-2xx status and its body to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            _ => {
                let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
                let message = parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .or(parsed.error.filter(|m| !m.trim().is_empty()))
                    .unwrap_or_else(|| default_status_message(status).to_string());
                ApiError::Server { status, message }
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "서버에 연결할 수 없습니다. 네트워크 상태를 확인해주세요.".to_string(),
            ApiError::Timeout => "요청 시간이 초과되었습니다.".to_string(),
            ApiError::Unauthorized => "로그인이 필요합니다.".to_string(),
            ApiError::Forbidden => "접근 권한이 없습니다.".to_string(),
            ApiError::NotFound => "요청한 정보를 찾을 수 없습니다.".to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Decode(_) => "서버 응답을 처리하지 못했습니다.".to_string(),
            ApiError::Storage(_) => "브라우저 저장소에 접근할 수 없습니다.".to_string(),
            ApiError::Validation(message) => message.clone(),
        }
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "잘못된 요청입니다.",
        409 => "이미 처리된 요청입니다.",
        500..=599 => "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        _ => "요청을 처리하지 못했습니다.",
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_timeout() {
            ApiError::Timeout
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
    fn test_auth_statuses() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "{}"), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, "not json"), ApiError::NotFound);
    }

    #[test]
    fn test_message_from_body() {
        let err = ApiError::from_status(400, r#"{"success":false,"message":"이미 사용 중인 이메일입니다."}"#);
        assert_eq!(
            err,
            ApiError::Server { status: 400, message: "이미 사용 중인 이메일입니다.".to_string() }
        );
        assert_eq!(err.user_message(), "이미 사용 중인 이메일입니다.");
    }

    #[test]
    fn test_error_field_fallback() {
        let err = ApiError::from_status(400, r#"{"error":"amount must be positive","type":"IllegalArgumentException"}"#);
        assert_eq!(err.user_message(), "amount must be positive");
    }

    #[test]
    fn test_default_message_when_body_unusable() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.status(), Some(502));
        assert!(err.user_message().contains("서버 오류"));

        let blank = ApiError::from_status(400, r#"{"message":"  "}"#);
        assert_eq!(blank.user_message(), "잘못된 요청입니다.");
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = ApiError::Validation("기부 금액을 입력해주세요.".to_string());
        assert_eq!(err.to_string(), "기부 금액을 입력해주세요.");
        assert_eq!(err.status(), None);
    }
}
