//! hOCR `title` 元数据解析
//!
//! `title` 属性由 `;` 分隔的子句组成，每个子句的第一个词是键，其余部分是值，
//! 例如 `bbox 0 0 100 20; x_size 30; ppageno 0`。

use std::collections::BTreeMap;

use markup5ever_rcdom::Handle;

use crate::translation::error::{helpers, TranslationResult};

use super::dom::get_node_attr;

/// 解析后的 `title` 元数据
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HocrTitle {
    properties: BTreeMap<String, String>,
}

impl HocrTitle {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// 获取必需的键，缺失时报错
    pub fn require(&self, key: &str) -> TranslationResult<&str> {
        self.get(key)
            .ok_or_else(|| helpers::parse_error(format!("title has no \"{key}\" property")))
    }

    /// 行高（像素）
    pub fn x_size(&self) -> TranslationResult<f64> {
        let value = self.require("x_size")?;
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| helpers::parse_error(format!("x_size \"{value}\" is not a number")))
    }

    /// 物理页码
    pub fn ppageno(&self) -> TranslationResult<&str> {
        self.require("ppageno")
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// 解析 hOCR `title` 字符串
///
/// 没有值的子句（包括空子句）会导致解析失败。
pub fn parse_hocr_title(title: &str) -> TranslationResult<HocrTitle> {
    let mut properties = BTreeMap::new();

    for item in title.split(';') {
        let item = item.trim();
        let (key, value) = item
            .split_once(char::is_whitespace)
            .map(|(key, value)| (key, value.trim()))
            .filter(|(_, value)| !value.is_empty())
            .ok_or_else(|| helpers::parse_error(format!("malformed title clause \"{item}\"")))?;

        properties.insert(key.to_string(), value.to_string());
    }

    Ok(HocrTitle { properties })
}

/// 读取并解析节点的 `title` 属性
pub fn node_title(node: &Handle) -> TranslationResult<HocrTitle> {
    let title = get_node_attr(node, "title").ok_or_else(|| {
        let id = get_node_attr(node, "id").unwrap_or_else(|| "?".to_string());
        helpers::parse_error(format!("element \"{id}\" has no title attribute"))
    })?;

    parse_hocr_title(&title)
}
