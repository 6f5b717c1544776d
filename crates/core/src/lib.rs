//! # `stockfeed-core` - 领域契约层
//!
//! 定义股票日线采集服务的实体、错误类型与端口 (Port) trait。
//! 本 crate 不包含任何 I/O 实现，具体的行情抓取与持久化由
//! `stockfeed-feed`、`stockfeed-store` 等基础设施 crate 通过实现端口注入。

pub mod common;
pub mod config;
pub mod market;
pub mod store;
