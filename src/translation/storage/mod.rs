//! 存储模块
//!
//! 提供翻译词典的内存表示和 JSON 快照。

pub mod cache;

pub use cache::TranslationCache;
