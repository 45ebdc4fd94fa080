//! # hocr-translate
//!
//! 逐词翻译 hOCR 文档，输出翻译后的 hOCR 或基于模板的 HTML 报告。
//!
//! ## 模块组织
//!
//! - `core` - 输出格式选择、文档处理流程、终端输出
//! - `parsers` - hOCR 解析、遍历和序列化
//! - `builders` - HTML 报告构建器
//! - `translation` - 翻译会话、词典、远程翻译服务
//! - `env` - 环境变量

pub mod builders;
pub mod core;
pub mod env;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use self::core::*;
pub use translation::{TranslationConfig, TranslationError, TranslationResult, TranslationStats};
