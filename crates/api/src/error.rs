//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stockfeed_manager::ManagerError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误或业务前置条件不满足 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 上游行情接口失败 (502)
    #[error("上游接口错误: {0}")]
    BadGateway(String),

    /// 下层持久化错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => {
                tracing::warn!("上游接口错误: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `ManagerError` 转换
impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Upstream(e) => ApiError::BadGateway(e.to_string()),
            ManagerError::AlreadyTracked(_) => ApiError::BadRequest(err.to_string()),
            ManagerError::Persistence(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockfeed_core::market::error::UpstreamError;
    use stockfeed_core::store::error::StoreError;

    #[test]
    fn test_manager_error_status_mapping() {
        let cases = [
            (
                ManagerError::Upstream(UpstreamError::RateLimitExceeded),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ManagerError::Upstream(UpstreamError::Decode("eof".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ManagerError::AlreadyTracked("IBM".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ManagerError::Persistence(StoreError::Database("locked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_rate_limit_message_is_kept() {
        let api = ApiError::from(ManagerError::Upstream(UpstreamError::RateLimitExceeded));
        assert!(matches!(api, ApiError::BadGateway(ref m) if m == "exceeded API-use limit today"));
    }
}
