//! Mapping of crate errors onto HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::errors::EstateRagError;

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub EstateRagError);

/// Handy result alias used across handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match &self.0 {
            EstateRagError::Validation(_) | EstateRagError::InvalidFilter { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EstateRagError::PropertyNotFound(_) | EstateRagError::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            EstateRagError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            EstateRagError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            EstateRagError::ServiceUnavailable(_)
            | EstateRagError::GenerationUnavailable(_)
            | EstateRagError::Embedding(_) => StatusCode::SERVICE_UNAVAILABLE,
            EstateRagError::GenerationParse { .. }
            | EstateRagError::VectorIndex(_)
            | EstateRagError::Database(_)
            | EstateRagError::Config(_)
            | EstateRagError::Serialization(_)
            | EstateRagError::TomlSerialization(_)
            | EstateRagError::Io(_)
            | EstateRagError::Custom(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn error_code(&self) -> &'static str {
        match &self.0 {
            EstateRagError::Validation(_) => "VALIDATION_ERROR",
            EstateRagError::InvalidFilter { .. } => "INVALID_FILTER",
            EstateRagError::PropertyNotFound(_) | EstateRagError::RouteNotFound(_) => "NOT_FOUND",
            EstateRagError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            EstateRagError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            EstateRagError::RateLimited { .. } => "RATE_LIMITED",
            EstateRagError::GenerationParse { .. } => "GENERATION_PARSE_ERROR",
            EstateRagError::GenerationUnavailable(_) => "GENERATION_UNAVAILABLE",
            EstateRagError::Embedding(_) => "EMBEDDING_UNAVAILABLE",
            EstateRagError::VectorIndex(_) => "VECTOR_INDEX_ERROR",
            EstateRagError::Database(_) => "DATABASE_ERROR",
            EstateRagError::Config(_)
            | EstateRagError::Serialization(_)
            | EstateRagError::TomlSerialization(_)
            | EstateRagError::Io(_)
            | EstateRagError::Custom(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message; internal failures are not described
    fn message(&self) -> String {
        match &self.0 {
            EstateRagError::Database(_)
            | EstateRagError::Config(_)
            | EstateRagError::Serialization(_)
            | EstateRagError::TomlSerialization(_)
            | EstateRagError::Io(_)
            | EstateRagError::Custom(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<EstateRagError> for ApiError {
    fn from(err: EstateRagError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self(EstateRagError::Validation(err.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        Self(EstateRagError::Validation(err.body_text()))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.0);
        }

        let body = ErrorBody {
            error: self.error_code(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: EstateRagError) -> StatusCode {
        ApiError(err).status_code()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(EstateRagError::Validation("bad".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(EstateRagError::InvalidFilter { min: 2, max: 1 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(EstateRagError::PropertyNotFound("X".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EstateRagError::RouteNotFound("GET /nowhere".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EstateRagError::MethodNotAllowed {
                method: "PUT".into(),
                path: "/search".into()
            }),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_of(EstateRagError::RateLimited { model: "m".into() }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_of(EstateRagError::ServiceUnavailable("loading".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(EstateRagError::GenerationParse {
                model: "m".into(),
                message: "x".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError(EstateRagError::Custom("secret path /etc/x".into()));
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        let not_found = ApiError(EstateRagError::PropertyNotFound("P9".into()));
        assert_eq!(not_found.message(), "Property P9 not found");
    }
}
