//! 面包屑错误定义

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures of trail operations.
///
/// Every failure is recoverable by the caller; nothing here is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrailError {
    /// 索引或数量超出当前条目范围
    #[error("Index {index} out of range for trail of {size} entries")]
    IndexOutOfRange { index: usize, size: usize },
}

/// 面包屑操作结果类型别名
pub type Result<T> = std::result::Result<T, TrailError>;

/// HTTP 接口错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 会话不存在或已过期
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// 面包屑操作失败
    #[error(transparent)]
    Trail(#[from] TrailError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Trail(TrailError::IndexOutOfRange { .. }) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
