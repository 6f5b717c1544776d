//! # 行情数据变换
//!
//! 纯函数层：尾部窗口计算、按周分桶与对外视图组装，不涉及任何 I/O。

pub mod presentation;
pub mod week;
pub mod window;

pub use presentation::{assemble, present_series};
pub use week::bucket_weeks;
pub use window::trailing_window_start;
