//! # 构建器模块
//!
//! - `html_builder` - 基于模板的 HTML 报告

pub mod html_builder;

// Re-export commonly used items for convenience
pub use html_builder::HtmlBuilder;
