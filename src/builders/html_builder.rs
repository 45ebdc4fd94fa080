//! HTML 报告构建器
//!
//! 基于翻译后的 hOCR 树生成 HTML 片段，再填入模板文件。

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use markup5ever_rcdom::{Handle, RcDom};

use crate::parsers::hocr::dom::{
    find_areas, find_lines, find_pages, find_paragraphs, find_words, get_leading_text,
};
use crate::parsers::hocr::title::node_title;
use crate::translation::config::constants;
use crate::translation::error::{TranslationError, TranslationResult};

pub struct HtmlBuilder {
    template_path: PathBuf,
}

impl HtmlBuilder {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    /// 构建完整的 HTML 报告
    ///
    /// 模板中的 `{%LANG%}` 替换为目标语言，`{%CONTENT%}` 替换为页面内容。
    pub fn render(&self, dom: &RcDom, target_lang: &str) -> TranslationResult<String> {
        let content = self.render_fragment(dom)?;
        let template = self.read_template()?;

        Ok(fill_template(&template, target_lang, &content))
    }

    /// 只生成页面内容片段
    pub fn render_fragment(&self, dom: &RcDom) -> TranslationResult<String> {
        let mut html = String::new();

        for page in find_pages(&dom.document) {
            self.render_page(&mut html, &page)?;
        }

        Ok(html)
    }

    fn read_template(&self) -> TranslationResult<String> {
        fs::read_to_string(&self.template_path).map_err(|e| {
            TranslationError::from(e)
                .with_context(format!("template {}", self.template_path.display()))
        })
    }

    fn render_page(&self, html: &mut String, page: &Handle) -> TranslationResult<()> {
        let page_title = node_title(page)?;
        let page_number = page_title.ppageno()?;

        html.push_str("<div class=\"page\">");

        for area in find_areas(page) {
            html.push_str("<div class=\"ocr_area\">");
            for paragraph in find_paragraphs(&area) {
                html.push_str("<p class=\"ocr_par\">");
                for line in find_lines(&paragraph) {
                    render_line(html, &line)?;
                }
                html.push_str("</p>");
            }
            html.push_str("</div>");
        }

        let _ = write!(
            html,
            "<div class=\"page-number text-center\"><strong>-{}-</strong></div></div>",
            escape_html(page_number)
        );

        Ok(())
    }
}

fn render_line(html: &mut String, line: &Handle) -> TranslationResult<()> {
    let font_size = node_title(line)?.x_size()? / constants::FONT_SIZE_DIVISOR;

    let _ = write!(
        html,
        "<span class=\"ocr_line\" style=\"font-size:{:?}px\">",
        font_size
    );
    for word in find_words(line) {
        let text = get_leading_text(&word).unwrap_or_default();
        let _ = write!(html, "<span class=\"ocrx_word\">{}</span>", escape_html(&text));
    }
    html.push_str("</span><br>");

    Ok(())
}

fn fill_template(template: &str, target_lang: &str, content: &str) -> String {
    template
        .replace(constants::LANG_PLACEHOLDER, target_lang)
        .replace(constants::CONTENT_PLACEHOLDER, content)
}

/// 转义 HTML 文本
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
