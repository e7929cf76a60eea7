/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - repo error / validation error / auth rejection を統一的に変換
 *
 * Notes
 * - 失敗レスポンスは常に `{ "success": false, "message": "..." }` 形式。
 *   認可の rejection も handler のエラーも同じ封筒で返す。
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },
    #[error("{message}")]
    Unauthorized {
        message: String,
        // Verifier may suggest a non-401 status; 401 otherwise.
        status: StatusCode,
    },
    #[error("Forbidden: Access denied")]
    Forbidden,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("{message}")]
    Conflict { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Authentication rejection with the gate's defaults applied.
    pub fn unauthorized(message: Option<String>, status: Option<StatusCode>) -> Self {
        Self::Unauthorized {
            message: message.unwrap_or_else(|| "Authentication failed".to_string()),
            status: status.unwrap_or(StatusCode::UNAUTHORIZED),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized { message, status } => (status, message),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden: Access denied".to_string(),
            ),
            AppError::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict("resource already exists"),
            // FK violation: the row being pointed at is not there (most often a
            // valid token whose profile row was never created via PUT /me)
            RepoError::MissingReference => {
                AppError::conflict("referenced resource does not exist")
            }
            RepoError::Db(err) => {
                tracing::error!(error = %err, "database error");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /businesses/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::bad_request("invalid id")
            }

            // These indicate server-side config / programming errors
            _ => AppError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn rejection_envelope_shape() {
        let res = AppError::unauthorized(None, None).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "Authentication failed" })
        );
    }

    #[tokio::test]
    async fn missing_reference_is_a_409_not_a_500() {
        let res = AppError::from(RepoError::MissingReference).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let body = body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn forbidden_message_is_fixed() {
        let res = AppError::Forbidden.into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let body = body_json(res).await;
        assert_eq!(body["message"], "Forbidden: Access denied");
    }
}
