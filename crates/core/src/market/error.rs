use thiserror::Error;

/// # Summary
/// 上游行情数据源错误枚举，覆盖网络、读取、解码及字段级解析问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 携带的文本中不得包含 API Key (由调用方在构造前完成脱敏)。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    // 上游提示当日调用额度已用尽
    #[error("exceeded API-use limit today")]
    RateLimitExceeded,
    // 上游返回了提示信息而非数据，原样透传 (已脱敏)
    #[error("{0}")]
    Informational(String),
    // 无法连通上游或 HTTP 状态异常
    #[error("Alpha Vantage API get error: {0}")]
    Transport(String),
    // 读取响应体失败
    #[error("Alpha Vantage API read-all error: {0}")]
    BodyRead(String),
    // 响应体 JSON 结构与预期不符
    #[error("Alpha Vantage API body-json.Unmarshal-parse error: {0}")]
    Decode(String),
    // 数据字段缺失
    #[error("Alpha Vantage API response-body-parse error: can't find {0} as usual")]
    FieldMissing(String),
    // 数据字段无法解析
    #[error("Alpha Vantage API response-body-parse error: {field}: {cause}")]
    FieldUnparseable { field: String, cause: String },
}

impl UpstreamError {
    /// 构造字段无法解析错误
    pub fn unparseable(field: impl Into<String>, cause: impl ToString) -> Self {
        Self::FieldUnparseable {
            field: field.into(),
            cause: cause.to_string(),
        }
    }
}
