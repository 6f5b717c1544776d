//! # `stockfeed-api` - HTTP API 网关
//!
//! 本 crate 是 Stockfeed 服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 校验请求参数 (关键字、证券代码)
//! - 调用下层 `StockFeedManager` 完成业务操作
//! - 将领域模型转换为 DTO，错误映射为 HTTP 状态码

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
