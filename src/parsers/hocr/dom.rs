use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use encoding_rs::{Encoding, UTF_8};
use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};
use regex::bytes::Regex;
use xml5ever::buffer_queue::BufferQueue;
use xml5ever::interface::TreeSink;
use xml5ever::tokenizer::states::XmlState;
use xml5ever::tokenizer::{TagKind, Token, TokenSink, XmlTokenizer, XmlTokenizerOpts};
use xml5ever::tree_builder::{XmlTreeBuilder, XmlTreeBuilderOpts};

use crate::translation::error::{helpers, TranslationResult};

/// hOCR 文档使用的 XHTML 命名空间
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub const CLASS_PAGE: &str = "ocr_page";
pub const CLASS_AREA: &str = "ocr_carea";
pub const CLASS_PARAGRAPH: &str = "ocr_par";
pub const CLASS_LINE: &str = "ocr_line";
pub const CLASS_WORD: &str = "ocrx_word";

/// 将 hOCR 字节转换为 DOM
///
/// 编码依次取自 BOM、XML 声明中的 `encoding`，默认 UTF-8。
/// 解析器会从格式错误中恢复，但只要记录了错误就视为解析失败，
/// 包括文档结束时仍未闭合的元素。
pub fn hocr_to_dom(data: &[u8]) -> TranslationResult<RcDom> {
    let encoding = detect_encoding(data);
    let (string, _, _) = encoding.decode(data);

    let builder = XmlTreeBuilder::new(RcDom::default(), XmlTreeBuilderOpts::default());
    let tokenizer = XmlTokenizer::new(UnclosedCheck::new(builder), XmlTokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(&string));
    tokenizer.feed(&input);
    tokenizer.end();
    let dom = tokenizer.sink.builder.sink.finish();

    let (count, first_error) = {
        let errors = dom.errors.borrow();
        (errors.len(), errors.first().cloned())
    };
    if let Some(error) = first_error {
        return Err(helpers::parse_error(format!(
            "malformed hOCR document, {count} error(s), first: {error}"
        )));
    }

    Ok(dom)
}

/// 统计未闭合的元素，xml5ever 在文档结束时会静默闭合它们
struct UnclosedCheck {
    builder: XmlTreeBuilder<Handle, RcDom>,
    open: Cell<usize>,
}

impl UnclosedCheck {
    fn new(builder: XmlTreeBuilder<Handle, RcDom>) -> Self {
        Self {
            builder,
            open: Cell::new(0),
        }
    }
}

impl TokenSink for UnclosedCheck {
    fn process_token(&self, token: Token) {
        if let Token::TagToken(tag) = &token {
            match tag.kind {
                TagKind::StartTag => self.open.set(self.open.get() + 1),
                TagKind::EndTag | TagKind::ShortTag => {
                    self.open.set(self.open.get().saturating_sub(1))
                }
                TagKind::EmptyTag => {}
            }
        }
        self.builder.process_token(token);
    }

    fn end(&self) {
        let open = self.open.get();
        if open > 0 {
            self.builder.sink.parse_error(Cow::Owned(format!(
                "Unexpected EOF, {open} element(s) not closed"
            )));
        }
        self.builder.end();
    }

    fn query_state_change(&self) -> Option<XmlState> {
        self.builder.query_state_change()
    }
}

/// 检测文档编码
pub fn detect_encoding(data: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(data) {
        return encoding;
    }

    let declaration_re =
        Regex::new(r#"^\s*<\?xml[^>]*?encoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#).unwrap();

    declaration_re
        .captures(data)
        .and_then(|captures| captures.get(1))
        .and_then(|label| Encoding::for_label_no_replacement(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| get_node_name(child) == Some(node_name))
        .cloned()
}

/// 直接子元素中标签名和 `class` 属性都匹配的节点，保持文档顺序
pub fn find_children(parent: &Handle, node_name: &str, class: &str) -> Vec<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .filter(|child| {
            get_node_name(child) == Some(node_name)
                && get_node_attr(child, "class").as_deref() == Some(class)
        })
        .cloned()
        .collect()
}

/// `html/body/div.ocr_page`
pub fn find_pages(document: &Handle) -> Vec<Handle> {
    get_child_node_by_name(document, "html")
        .and_then(|html| get_child_node_by_name(&html, "body"))
        .map(|body| find_children(&body, "div", CLASS_PAGE))
        .unwrap_or_default()
}

pub fn find_areas(page: &Handle) -> Vec<Handle> {
    find_children(page, "div", CLASS_AREA)
}

pub fn find_paragraphs(area: &Handle) -> Vec<Handle> {
    find_children(area, "p", CLASS_PARAGRAPH)
}

pub fn find_lines(paragraph: &Handle) -> Vec<Handle> {
    find_children(paragraph, "span", CLASS_LINE)
}

pub fn find_words(line: &Handle) -> Vec<Handle> {
    find_children(line, "span", CLASS_WORD)
}

/// 元素开头的文本（第一个子元素之前的所有文本节点）
///
/// 没有文本时返回 `None`。
pub fn get_leading_text(node: &Handle) -> Option<String> {
    let mut text = String::new();

    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            _ => break,
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// 替换元素开头的文本，子元素保持不变
///
/// 新文本为空时不创建文本节点。
pub fn set_leading_text(node: &Handle, text: &str) {
    let mut children = node.children.borrow_mut();

    let leading = children
        .iter()
        .take_while(|child| matches!(child.data, NodeData::Text { .. }))
        .count();
    children.drain(..leading);

    if !text.is_empty() {
        let text_node = Node::new(NodeData::Text {
            contents: RefCell::new(StrTendril::from_slice(text)),
        });
        text_node.parent.set(Some(Rc::downgrade(node)));
        children.insert(0, text_node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::error::TranslationError;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" lang="en">
 <head><title></title></head>
 <body>
  <div class='ocr_page' id='page_1' title='image "a.png"; bbox 0 0 100 100; ppageno 0'>
   <div class='ocr_carea' id='block_1_1'>
    <p class='ocr_par' id='par_1_1' lang='eng'>
     <span class='ocr_line' id='line_1_1' title="bbox 0 0 10 10; x_size 30">
      <span class='ocrx_word' id='word_1_1' lang='eng'>Hello</span>
      <span class='ocrx_word' id='word_1_2' lang='eng'><strong>Bold</strong></span>
     </span>
    </p>
   </div>
  </div>
 </body>
</html>"#;

    fn first_line(dom: &RcDom) -> Handle {
        let pages = find_pages(&dom.document);
        let areas = find_areas(&pages[0]);
        let paragraphs = find_paragraphs(&areas[0]);
        find_lines(&paragraphs[0]).remove(0)
    }

    #[test]
    fn test_structure_navigation() {
        let dom = hocr_to_dom(SAMPLE.as_bytes()).unwrap();
        let pages = find_pages(&dom.document);
        assert_eq!(pages.len(), 1);
        assert_eq!(get_node_attr(&pages[0], "id").as_deref(), Some("page_1"));

        let words = find_words(&first_line(&dom));
        assert_eq!(words.len(), 2);
        assert_eq!(get_node_attr(&words[0], "lang").as_deref(), Some("eng"));
    }

    #[test]
    fn test_leading_text() {
        let dom = hocr_to_dom(SAMPLE.as_bytes()).unwrap();
        let words = find_words(&first_line(&dom));

        assert_eq!(get_leading_text(&words[0]).as_deref(), Some("Hello"));
        assert_eq!(get_leading_text(&words[1]), None);
    }

    #[test]
    fn test_set_leading_text_keeps_children() {
        let dom = hocr_to_dom(SAMPLE.as_bytes()).unwrap();
        let words = find_words(&first_line(&dom));

        set_leading_text(&words[0], "Hallo");
        assert_eq!(get_leading_text(&words[0]).as_deref(), Some("Hallo"));

        set_leading_text(&words[1], "Fett");
        assert_eq!(get_leading_text(&words[1]).as_deref(), Some("Fett"));
        assert!(get_child_node_by_name(&words[1], "strong").is_some());

        set_leading_text(&words[0], "");
        assert_eq!(get_leading_text(&words[0]), None);
        assert!(words[0].children.borrow().is_empty());
    }

    #[test]
    fn test_class_must_match_exactly() {
        let dom = hocr_to_dom(
            br#"<html xmlns="http://www.w3.org/1999/xhtml"><body><div class="ocr_page extra"/><div class="ocr_page"/></body></html>"#,
        )
        .unwrap();
        assert_eq!(find_pages(&dom.document).len(), 1);
    }

    #[test]
    fn test_detect_encoding() {
        assert_eq!(detect_encoding(b"<html/>"), UTF_8);
        assert_eq!(
            detect_encoding(b"<?xml version='1.0' encoding='ISO-8859-1'?><html/>").name(),
            "windows-1252"
        );
        assert_eq!(detect_encoding(b"\xEF\xBB\xBF<html/>"), UTF_8);
    }

    #[test]
    fn test_latin1_document_decoded() {
        let mut data = b"<?xml version='1.0' encoding='ISO-8859-1'?><html xmlns='http://www.w3.org/1999/xhtml'><body><div class='ocr_page'><div class='ocr_carea'><p class='ocr_par'><span class='ocr_line'><span class='ocrx_word' lang='deu'>Stra".to_vec();
        data.push(0xDF);
        data.extend_from_slice(b"e</span></span></p></div></div></body></html>");

        let dom = hocr_to_dom(&data).unwrap();
        let words = find_words(&first_line(&dom));
        assert_eq!(get_leading_text(&words[0]).as_deref(), Some("Straße"));
    }

    #[test]
    fn test_malformed_document_fails() {
        let truncated = b"<html xmlns='http://www.w3.org/1999/xhtml'><body><div class='ocr_page'>\
            <span class='ocrx_word' lang='eng'>Hello</span> <<< &bogus; </b>";

        let result = hocr_to_dom(truncated);
        assert!(matches!(result, Err(TranslationError::Parse(_))));
    }

    #[test]
    fn test_unclosed_root_fails() {
        assert!(hocr_to_dom(b"<html xmlns='http://www.w3.org/1999/xhtml'><body>").is_err());

        let result = hocr_to_dom(
            b"<html xmlns='http://www.w3.org/1999/xhtml'><body><div class='ocr_page'>\
              <span class='ocrx_word' lang='eng'>Hello</span></div>",
        );
        match result {
            Err(TranslationError::Parse(msg)) => assert!(msg.contains("not closed"), "{msg}"),
            Err(e) => panic!("expected a parse error, got {e}"),
            Ok(_) => panic!("unclosed document was accepted"),
        }
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(hocr_to_dom(b"").is_err());
        assert!(hocr_to_dom(b"  \n").is_err());
    }

    #[test]
    fn test_empty_elements_and_trailing_whitespace_accepted() {
        let dom = hocr_to_dom(
            b"<?xml version='1.0'?>\n<html xmlns='http://www.w3.org/1999/xhtml'><head/>\
              <body><br/></body></html>\n",
        )
        .unwrap();
        assert!(dom.errors.borrow().is_empty());
    }
}
