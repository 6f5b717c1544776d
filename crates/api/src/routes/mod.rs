//! # 路由控制器
//!
//! - `symbols`: 证券代码搜索
//! - `data`: 证券日线的收录、删除与查询

pub mod data;
pub mod symbols;
