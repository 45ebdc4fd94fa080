//! hOCR 文档遍历器
//!
//! 按文档顺序访问 页 → 区域 → 段落 → 行 → 单词，把每个单词的文本替换为译文。
//! 每个单词只翻译一次，两种输出格式都基于翻译后的树生成。

use markup5ever_rcdom::{Handle, RcDom};

use crate::translation::core::TranslationSession;
use crate::translation::error::TranslationResult;
use crate::translation::languages::map_optional;

use super::dom::{
    find_areas, find_lines, find_pages, find_paragraphs, find_words, get_leading_text,
    get_node_attr, set_leading_text,
};

/// 翻译整个文档，直接修改 DOM
///
/// 单词的源语言来自它自己的 `lang` 属性；缺失或无法映射时终止。
pub fn translate_document(dom: &RcDom, session: &mut TranslationSession) -> TranslationResult<()> {
    let pages = find_pages(&dom.document);
    tracing::info!("开始翻译 {} 页", pages.len());

    for page in &pages {
        for area in find_areas(page) {
            for paragraph in find_paragraphs(&area) {
                for line in find_lines(&paragraph) {
                    for word in find_words(&line) {
                        translate_word(&word, session)?;
                    }
                }
            }
        }
    }

    tracing::info!("翻译完成: {}", session.stats());
    Ok(())
}

/// 翻译单个单词节点
pub fn translate_word(word: &Handle, session: &mut TranslationSession) -> TranslationResult<()> {
    let lang = get_node_attr(word, "lang");
    let source_lang = map_optional(lang.as_deref()).map_err(|e| {
        let id = get_node_attr(word, "id").unwrap_or_else(|| "?".to_string());
        e.with_context(format!("word \"{id}\""))
    })?;

    let text = get_leading_text(word);
    let translated = session.translate(text.as_deref(), source_lang)?;
    set_leading_text(word, &translated);

    Ok(())
}
