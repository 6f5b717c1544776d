//! # `stockfeed-feed` - 上游行情接入
//!
//! - [`http`]: 基于 `reqwest` 的原始字节抓取实现。
//! - [`alpha_vantage`]: Alpha Vantage 接口的地址构建、响应分类与字段解析。

pub mod alpha_vantage;
pub mod http;
