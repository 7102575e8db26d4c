use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use mongodb::error::Error as MongoError;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use utoipa::ToSchema;

/// 错误响应体：`{"error": {...}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// 稳定的业务错误码，与 HTTP 状态码无关
    #[schema(example = 1404)]
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 常规业务错误 ====
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation { message: String, detail: Option<String> },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    // ==== 系统错误 ====
    #[error("MongoDB error: {0}")]
    Mongo(#[from] MongoError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation { message: message.into(), detail: None }
    }

    pub fn validation_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::Validation { message: message.into(), detail: Some(detail.into()) }
    }

    /// 业务错误码
    pub fn code(&self) -> u32 {
        match self {
            AppError::Validation { .. } => 1422,
            AppError::Unauthorized(_) => 1401,
            AppError::Forbidden(_) => 1403,
            AppError::NotFound(_) => 1404,
            AppError::Conflict(_) => 1409,
            AppError::Mongo(_) | AppError::Json(_) | AppError::Io(_) | AppError::Internal(_) => 1500,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            AppError::Validation { message, detail } => ErrorBody { code: self.code(), message: message.clone(), detail: detail.clone() },
            AppError::NotFound(msg) | AppError::Unauthorized(msg) | AppError::Forbidden(msg) | AppError::Conflict(msg) => {
                ErrorBody { code: self.code(), message: msg.clone(), detail: None }
            }
            // 内部错误只记录日志，不向客户端暴露细节
            e => {
                error!("{:?}", e);
                ErrorBody { code: self.code(), message: "An unexpected error occurred".to_string(), detail: None }
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::validation_detail("Request validation failed", e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Mongo(_) | AppError::Json(_) | AppError::Io(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: self.body() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[tokio::test]
    async fn test_not_found_envelope() {
        let err = AppError::NotFound("Group 'x' does not exist".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], 1404);
        assert_eq!(body["error"]["message"], "Group 'x' does not exist");
        assert!(body["error"].get("detail").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = AppError::Internal("connection refused".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], 1500);
        assert_eq!(body["error"]["message"], "An unexpected error occurred");
        assert!(!bytes.windows(10).any(|w| w == b"connection"));
    }

    #[test]
    fn test_codes_are_distinct_from_status() {
        let errors = [
            AppError::validation("bad"),
            AppError::Unauthorized("no".into()),
            AppError::Forbidden("no".into()),
            AppError::NotFound("no".into()),
            AppError::Conflict("no".into()),
        ];
        for e in errors.iter() {
            assert!(e.code() > 0);
            assert_ne!(e.code(), e.status_code().as_u16() as u32);
        }
    }
}
