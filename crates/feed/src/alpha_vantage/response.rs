use super::ohlcv::parse_row;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use stockfeed_core::common::TradeDate;
use stockfeed_core::market::entity::{SymbolSearchResult, UpstreamSeries};
use stockfeed_core::market::error::UpstreamError;

/// API Key 在提示信息中被替换成的标记
pub const REDACTION_MARKER: &str = "****";

/// 上游用于提示当日额度耗尽的固定文案 (脱敏后形态)
pub const RATE_LIMIT_MESSAGE: &str = "We have detected your API key as **** and our standard API rate limit is 25 requests per day. Please subscribe to any of the premium plans at https://www.alphavantage.co/premium/ to instantly remove all daily rate limits.";

/// 上游提示信息所在的顶层键
const INFORMATION_KEY: &str = "Information";

/// # Summary
/// 响应体的第一阶段分类结果。
#[derive(Debug, PartialEq, Eq)]
enum ResponseKind {
    // 上游返回了提示信息 (额度、公告等)
    Information(String),
    // 需要按具体数据结构继续解析
    Data,
}

/// # Summary
/// 证券搜索接口响应。
#[derive(Deserialize, Debug)]
struct SymbolSearchBody {
    #[serde(rename = "bestMatches")]
    best_matches: Vec<SymbolMatch>,
}

#[derive(Deserialize, Debug)]
struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "4. region")]
    region: String,
}

/// # Summary
/// 日线接口响应。
///
/// # Invariants
/// - "Meta Data" 与 "Time Series (Daily)" 均为必填，缺失即视为结构不符。
#[derive(Deserialize, Debug)]
struct DailySeriesBody {
    #[serde(rename = "Meta Data")]
    meta: DailyMeta,
    // 日期键 -> 字面字段表
    #[serde(rename = "Time Series (Daily)")]
    series: BTreeMap<String, HashMap<String, String>>,
}

#[derive(Deserialize, Debug)]
struct DailyMeta {
    #[serde(rename = "2. Symbol")]
    symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    last_refreshed: String,
}

/// # Summary
/// 把提示信息中的 API Key 替换为固定标记。
///
/// # Logic
/// 空 Key 不做替换，否则 `str::replace` 会在每个字符之间插入标记。
pub fn redact(message: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return message.to_string();
    }
    message.replace(api_key, REDACTION_MARKER)
}

/// # Summary
/// 第一阶段：只认 JSON 对象，读取可选的提示信息字段。
///
/// # Logic
/// 顶层不是对象 (数组、字符串等) 或提示字段不是字符串时报 Decode；
/// 字段缺失、为 null 或为空串时交给第二阶段。
fn sniff(body: &[u8]) -> Result<ResponseKind, UpstreamError> {
    let envelope: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    match envelope.get(INFORMATION_KEY) {
        Some(Value::String(message)) if !message.is_empty() => {
            Ok(ResponseKind::Information(message.clone()))
        }
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(ResponseKind::Data),
        Some(other) => Err(UpstreamError::Decode(format!(
            "\"{INFORMATION_KEY}\" is not a string: {other}"
        ))),
    }
}

/// # Summary
/// 两阶段解析上游响应体。
///
/// # Logic
/// 1. 宽松解析提示信息外壳，非 JSON 对象直接报 Decode。
/// 2. 提示信息非空：脱敏后与额度文案比对，命中报 RateLimitExceeded，否则报 Informational。
/// 3. 提示信息为空：按目标结构严格解析，结构不符报 Decode。
///
/// # Arguments
/// * `body`: 上游响应体。
/// * `api_key`: 调用凭证，仅用于脱敏。
pub fn classify<T: DeserializeOwned>(body: &[u8], api_key: &str) -> Result<T, UpstreamError> {
    match sniff(body)? {
        ResponseKind::Information(message) => {
            let message = redact(&message, api_key);
            if message == RATE_LIMIT_MESSAGE {
                tracing::warn!("Alpha Vantage daily quota exhausted");
                Err(UpstreamError::RateLimitExceeded)
            } else {
                tracing::warn!(%message, "Alpha Vantage returned an information payload");
                Err(UpstreamError::Informational(message))
            }
        }
        ResponseKind::Data => {
            serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))
        }
    }
}

/// # Summary
/// 解析证券搜索响应。
pub fn parse_symbol_search(
    body: &[u8],
    api_key: &str,
) -> Result<Vec<SymbolSearchResult>, UpstreamError> {
    let parsed: SymbolSearchBody = classify(body, api_key)?;
    Ok(parsed
        .best_matches
        .into_iter()
        .map(|m| SymbolSearchResult {
            symbol: m.symbol,
            name: m.name,
            region: m.region,
        })
        .collect())
}

/// # Summary
/// 解析日线响应。
///
/// # Logic
/// 1. 分类并严格解析响应结构。
/// 2. 解析 "3. Last Refreshed" 日期。
/// 3. 逐个解析日期键与当日字段表，任何一行失败即整体失败。
pub fn parse_daily_series(body: &[u8], api_key: &str) -> Result<UpstreamSeries, UpstreamError> {
    let parsed: DailySeriesBody = classify(body, api_key)?;

    let last_refreshed: TradeDate = parsed
        .meta
        .last_refreshed
        .parse()
        .map_err(|e| UpstreamError::unparseable("last refreshed", e))?;

    let mut records = Vec::with_capacity(parsed.series.len());
    for (day, fields) in &parsed.series {
        let date: TradeDate = day
            .parse()
            .map_err(|e| UpstreamError::unparseable("date", format!("{day:?}: {e}")))?;
        records.push(parse_row(date, fields)?);
    }

    Ok(UpstreamSeries {
        symbol: parsed.meta.symbol,
        last_refreshed,
        records,
    })
}
