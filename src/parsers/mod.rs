//! # 解析器模块
//!
//! - `hocr` - hOCR 文档解析、元数据读取、单词翻译和序列化

pub mod hocr;

// Re-export commonly used items for convenience
pub use hocr::{hocr_to_dom, serialize_hocr, translate_document};
