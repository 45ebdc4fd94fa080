//! 翻译管道模块
//!
//! 单词进入词典或翻译服务之前的过滤步骤

pub mod filters;

pub use filters::{is_number, is_special_character, is_translatable};
