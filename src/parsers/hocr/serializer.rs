use std::io::{self, Write};

use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use xml5ever::serialize::{serialize, SerializeOpts, TraversalScope};

/// 输出文件开头的 XML 声明
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>\n";

/// 将 hOCR DOM 序列化为 UTF-8 编码的 XML
///
/// 原文档的 XML 声明会被替换。文档类型声明由这里写出，
/// 因为 xml5ever 只会保留名称而丢掉 PUBLIC/SYSTEM 标识。
pub fn serialize_hocr(dom: &RcDom) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();

    buf.extend_from_slice(XML_DECLARATION.as_bytes());
    for child in dom.document.children.borrow().iter() {
        serialize_top_level(&mut buf, child).expect("Unable to serialize DOM into buffer");
    }

    buf
}

fn serialize_top_level<W: Write>(writer: &mut W, node: &Handle) -> io::Result<()> {
    match &node.data {
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => {
            write!(writer, "<!DOCTYPE {}", name)?;
            if !public_id.is_empty() {
                write!(writer, " PUBLIC \"{}\" \"{}\"", public_id, system_id)?;
            } else if !system_id.is_empty() {
                write!(writer, " SYSTEM \"{}\"", system_id)?;
            }
            writer.write_all(b">\n")
        }
        NodeData::ProcessingInstruction { target, .. } if target.eq_ignore_ascii_case("xml") => {
            Ok(())
        }
        _ => {
            let serializable: SerializableHandle = node.clone().into();
            serialize(
                &mut *writer,
                &serializable,
                SerializeOpts {
                    traversal_scope: TraversalScope::IncludeNode,
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::hocr::dom::{find_pages, hocr_to_dom, XHTML_NAMESPACE};

    fn to_string(source: &[u8]) -> String {
        let dom = hocr_to_dom(source).unwrap();
        String::from_utf8(serialize_hocr(&dom)).unwrap()
    }

    #[test]
    fn test_starts_with_declaration() {
        let output = to_string(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><html xmlns=\"http://www.w3.org/1999/xhtml\"><body/></html>");

        assert!(output.starts_with(XML_DECLARATION));
        assert_eq!(output.matches("<?xml").count(), 1);
    }

    #[test]
    fn test_namespace_preserved_once() {
        let output = to_string(b"<html xmlns=\"http://www.w3.org/1999/xhtml\"><body><p>x</p></body></html>");

        assert_eq!(
            output.matches(&format!("xmlns=\"{XHTML_NAMESPACE}\"")).count(),
            1
        );
        assert!(output.contains("<body><p>x</p></body>"));
    }

    #[test]
    fn test_doctype_keeps_public_id() {
        let output = to_string(
            b"<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\
              <html xmlns=\"http://www.w3.org/1999/xhtml\"><body/></html>",
        );

        assert!(output.contains(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n<html"
        ));
    }

    #[test]
    fn test_text_and_attributes_escaped() {
        let output = to_string(
            b"<html xmlns=\"http://www.w3.org/1999/xhtml\"><body><div class=\"ocr_page\" title=\"image &quot;a &amp; b.png&quot;\">R&amp;D &lt;1&gt;</div></body></html>",
        );

        assert!(output.contains("title=\"image &quot;a &amp; b.png&quot;\""));
        assert!(output.contains(">R&amp;D &lt;1&gt;</div>"));
    }

    #[test]
    fn test_round_trip_keeps_structure() {
        let source = "<html xmlns=\"http://www.w3.org/1999/xhtml\"><body><div class=\"ocr_page\" id=\"page_1\"><span class=\"ocrx_word\" lang=\"eng\">Hello</span></div></body></html>";
        let output = to_string(source.as_bytes());

        let reparsed = hocr_to_dom(output.as_bytes()).unwrap();
        assert_eq!(find_pages(&reparsed.document).len(), 1);
        assert!(output.contains("<span class=\"ocrx_word\" lang=\"eng\">Hello</span>"));
    }

    #[test]
    fn test_comments_kept() {
        let output = to_string(b"<html xmlns=\"http://www.w3.org/1999/xhtml\"><!-- scan 1 --><body/></html>");
        assert!(output.contains("<!-- scan 1 -->"));
    }
}
