//! Gateway error types with HTTP status code mapping.
//!
//! [`ArenaError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid bracket size: 6 (expected 4, 8 or 16)",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ArenaError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category         | HTTP Status                             |
/// |-----------|------------------|-----------------------------------------|
/// | 1000–1999 | Validation       | 400 Bad Request                         |
/// | 2000–2999 | Not Found        | 404 Not Found                           |
/// | 3000–3999 | Server           | 500 Internal Server Error               |
/// | 4000–4999 | Tournament State | 409 Conflict / 422 Unprocessable Entity |
///
/// Validation errors are raised before any registry access. Conflicts are
/// detected under the tournament entry lock and are safe to retry after the
/// caller re-reads state. `Unresolvable` is an expected condition (an
/// upstream match has no result yet), not a bug.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Request validation failed before touching any state.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Bracket size parameter outside the supported set.
    #[error("invalid bracket size: {0} (expected 4, 8 or 16)")]
    InvalidBracketSize(u32),

    /// Unsupported or unimplemented elimination mode.
    #[error("invalid elimination mode: {0}")]
    InvalidEliminationMode(String),

    /// Tournament with the given ID was not found.
    #[error("tournament not found: {0}")]
    TournamentNotFound(uuid::Uuid),

    /// Match with the given ID was not found.
    #[error("match not found: {0}")]
    MatchNotFound(uuid::Uuid),

    /// No decision exists for the given match.
    #[error("no decision recorded for match {0}")]
    DecisionNotFound(uuid::Uuid),

    /// State precondition failed (roster full, match already resolved,
    /// tournament no longer pending, undo blocked by a dependent result).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A slot of the match cannot be resolved yet because an ancestor
    /// match has no recorded result.
    #[error("match {0} is not resolvable yet: an upstream match is incomplete")]
    Unresolvable(uuid::Uuid),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ArenaError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidBracketSize(_) => 1002,
            Self::InvalidEliminationMode(_) => 1003,
            Self::TournamentNotFound(_) => 2001,
            Self::MatchNotFound(_) => 2002,
            Self::DecisionNotFound(_) => 2003,
            Self::Conflict(_) => 4001,
            Self::Unresolvable(_) => 4002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidBracketSize(_)
            | Self::InvalidEliminationMode(_) => StatusCode::BAD_REQUEST,
            Self::TournamentNotFound(_) | Self::MatchNotFound(_) | Self::DecisionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unresolvable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ArenaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ArenaError::Validation("missing field".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ArenaError::MatchNotFound(uuid::Uuid::new_v4());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2002);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ArenaError::Conflict("match already has a winner".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), 4001);
    }

    #[test]
    fn error_response_exposes_openapi_schema() {
        // Handler annotations reference `body = ErrorResponse`; the type
        // must provide a schema for the generated documentation.
        let schema = <ErrorResponse as utoipa::PartialSchema>::schema();
        let json = serde_json::to_value(&schema).ok();
        assert!(json.is_some());
    }

    #[test]
    fn unresolvable_maps_to_422() {
        let err = ArenaError::Unresolvable(uuid::Uuid::new_v4());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), 4002);
    }
}
