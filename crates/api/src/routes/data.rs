use axum::Json;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, ApiResponse, StockDataResponse};

fn require_symbol(raw: &str) -> Result<&str, ApiError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest("please provide symbol".into()));
    }
    Ok(symbol)
}

/// 开始追踪证券，返回收录后的按周视图
#[utoipa::path(
    post,
    path = "/data/{symbol}",
    tag = "日线 (Data)",
    params(
        ("symbol" = String, Path, description = "证券代码")
    ),
    responses(
        (status = 200, description = "收录成功", body = ApiResponse<StockDataResponse>),
        (status = 400, description = "缺少代码或已被追踪", body = ApiErrorResponse),
        (status = 502, description = "上游接口错误", body = ApiErrorResponse),
        (status = 500, description = "服务器内部错误", body = ApiErrorResponse)
    )
)]
pub async fn collect_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockDataResponse>>, ApiError> {
    let symbol = require_symbol(&symbol)?;
    let view = state.manager.collect_symbol(symbol).await?;
    Ok(Json(ApiResponse::ok(view.into())))
}

/// 停止追踪证券 (不存在时同样成功)
#[utoipa::path(
    delete,
    path = "/data/{symbol}",
    tag = "日线 (Data)",
    params(
        ("symbol" = String, Path, description = "证券代码")
    ),
    responses(
        (status = 200, description = "删除成功", body = ApiResponse<String>),
        (status = 400, description = "缺少代码", body = ApiErrorResponse),
        (status = 500, description = "服务器内部错误", body = ApiErrorResponse)
    )
)]
pub async fn delete_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let symbol = require_symbol(&symbol)?;
    state.manager.delete_symbol(symbol).await?;
    Ok(Json(ApiResponse::ok(symbol.to_string())))
}

/// 读取全部已追踪证券的按周视图
#[utoipa::path(
    get,
    path = "/data",
    tag = "日线 (Data)",
    responses(
        (status = 200, description = "查询成功", body = ApiResponse<Vec<StockDataResponse>>),
        (status = 500, description = "服务器内部错误", body = ApiErrorResponse)
    )
)]
pub async fn stored_data(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StockDataResponse>>>, ApiError> {
    let views = state.manager.stored_data().await?;
    Ok(Json(ApiResponse::ok(
        views.into_iter().map(Into::into).collect(),
    )))
}
