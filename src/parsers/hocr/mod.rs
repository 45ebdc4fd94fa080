//! # hOCR 解析与序列化
//!
//! - `dom` - 解码、解析以及 页/区域/段落/行/单词 的定位
//! - `title` - `title` 属性中的元数据（`x_size`、`ppageno` 等）
//! - `walker` - 遍历文档并逐个翻译单词
//! - `serializer` - 将翻译后的 DOM 写回 hOCR

pub mod dom;
pub mod serializer;
pub mod title;
pub mod walker;

pub use dom::{
    detect_encoding, find_areas, find_lines, find_pages, find_paragraphs, find_words,
    get_leading_text, get_node_attr, hocr_to_dom, set_leading_text,
};
pub use serializer::serialize_hocr;
pub use title::{node_title, parse_hocr_title, HocrTitle};
pub use walker::{translate_document, translate_word};
