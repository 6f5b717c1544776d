//! # 持久化适配器
//!
//! 基于 SQLite 的证券日线存储实现。

pub mod symbol;

pub use symbol::SqliteSymbolStore;
