//! Maps domain errors to HTTP responses. The status codes are contractual:
//! 403 for a denied principal, 503 when no cluster can be reached, 500 for
//! engine faults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::errors::MeshError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(pub MeshError);

impl From<MeshError> for ApiError {
    fn from(err: MeshError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MeshError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            MeshError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            MeshError::Internal(detail) => {
                // Log the detail; the caller only sees a generic message.
                error!(detail = %detail, "internal error serving mesh request");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "internal error".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
