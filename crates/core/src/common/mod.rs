pub mod date;

pub use date::TradeDate;
