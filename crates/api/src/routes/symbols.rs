use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, ApiResponse, SymbolSearchResponse};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// 证券代码或名称前缀
    pub keywords: Option<String>,
}

/// 按关键字搜索证券代码
#[utoipa::path(
    get,
    path = "/symbols",
    tag = "证券 (Symbols)",
    params(SearchQuery),
    responses(
        (status = 200, description = "搜索成功", body = ApiResponse<SymbolSearchResponse>),
        (status = 400, description = "缺少关键字", body = ApiErrorResponse),
        (status = 502, description = "上游接口错误", body = ApiErrorResponse)
    )
)]
pub async fn search_symbols(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SymbolSearchResponse>>, ApiError> {
    let keywords = query
        .keywords
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("please provide keywords".into()))?;

    let matches = state.manager.search_symbols(keywords).await?;
    Ok(Json(ApiResponse::ok(SymbolSearchResponse {
        best_matches: matches.into_iter().map(Into::into).collect(),
    })))
}
