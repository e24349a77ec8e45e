use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::analysis::AnalysisError;
use crate::session::ProviderError;
use crate::web::auth::PermissionError;

#[derive(Debug)]
pub enum ApiError {
    Permission(PermissionError),
    Validation(String),
    NotFound(&'static str, String),
    Internal(String),
}

impl From<PermissionError> for ApiError {
    fn from(e: PermissionError) -> Self {
        ApiError::Permission(e)
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        AnalysisError::from(e).into()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        let message = e.to_string();
        match e {
            AnalysisError::Provider(ProviderError::NotFound(_)) => {
                ApiError::NotFound("session_not_found", message)
            }
            AnalysisError::Provider(ProviderError::InvalidKey(_)) => ApiError::Validation(message),
            AnalysisError::Provider(_) => ApiError::Internal(message),
            AnalysisError::UnknownDriver { .. } => ApiError::NotFound("driver_not_found", message),
            AnalysisError::Lap(_) => ApiError::NotFound("lap_not_found", message),
            AnalysisError::Align(_) => ApiError::Validation(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Permission(e) => e.into_response(),
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(reason, msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message(reason, &msg)),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                log::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::with_message("session_error", &msg)),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Permission;
    use crate::laps::LapError;
    use crate::telemetry::AlignError;

    fn status(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status(ProviderError::NotFound("2024 Spain Q".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AnalysisError::Lap(LapError::NoLapFound {
                driver: "VER".into(),
                lap: Some(3)
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AnalysisError::Align(AlignError::EmptyTrace {
                driver: "VER".into()
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ProviderError::InvalidKey("2024 ../etc Q".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ProviderError::Io(std::io::Error::other("disk"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status(PermissionError(Permission::Compare)), StatusCode::FORBIDDEN);
    }
}
