//! # 应用服务层
//!
//! 串联行情提供者、纯函数变换与持久化网关，对外暴露证券数据用例。

pub mod stock_feed;

pub use stock_feed::{ManagerError, StockFeedManager};
