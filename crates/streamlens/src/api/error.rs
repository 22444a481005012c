//! API error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kameo::error::SendError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use streamlens_catalog::CatalogError;
use streamlens_core::CoreError;

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Error message
    pub message: String,
}

/// Wrapper for API errors with status codes
pub struct AppError {
    pub status: StatusCode,
    pub error: ApiError,
}

impl AppError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "HOST_NOT_FOUND", message)
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Map a registry ask error to an API error
pub fn registry_error<M>(e: SendError<M, CoreError>) -> AppError
where
    SendError<M, CoreError>: std::fmt::Display,
{
    match e {
        SendError::HandlerError(CoreError::HostNotFound(host)) => {
            AppError::not_found(format!("host not found: {host}"))
        }
        SendError::HandlerError(CoreError::HostAlreadyExists(host)) => {
            AppError::conflict("HOST_EXISTS", format!("host already exists: {host}"))
        }
        other => AppError::internal(format!("registry error: {other}")),
    }
}

/// Map a catalog fetch outcome error to an API error
pub fn catalog_error(host: &str, e: &CatalogError) -> AppError {
    match e {
        CatalogError::UnreachableHost(reason) => AppError::new(
            StatusCode::BAD_GATEWAY,
            "HOST_UNREACHABLE",
            format!("{host}: {reason}"),
        ),
        CatalogError::MalformedCatalog(reason) => AppError::new(
            StatusCode::BAD_GATEWAY,
            "MALFORMED_CATALOG",
            format!("{host}: {reason}"),
        ),
        CatalogError::Cancelled => AppError::conflict(
            "FETCH_CANCELLED",
            format!("fetch for {host} was cancelled"),
        ),
    }
}
