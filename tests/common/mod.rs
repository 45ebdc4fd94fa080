// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;

use hocr_translate::translation::{TranslationBackend, TranslationResult};

pub const TEMPLATE: &str =
    "<!DOCTYPE html><html lang=\"{%LANG%}\"><body><main>{%CONTENT%}</main></body></html>";

/// hOCR 测试文档生成器
pub struct HocrTestHelper;

impl HocrTestHelper {
    /// 一页、一个区域、一个段落、一行，单词为 (lang, text)
    pub fn single_line(words: &[(&str, &str)]) -> String {
        let words: String = words
            .iter()
            .enumerate()
            .map(|(i, (lang, text))| {
                format!(
                    "<span class='ocrx_word' id='word_1_{}' title='bbox 0 0 10 10; x_wconf 90' lang='{}'>{}</span> ",
                    i + 1,
                    lang,
                    text
                )
            })
            .collect();

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n\
             <html xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"en\">\n\
             <head><title></title><meta name='ocr-system' content='tesseract 5.3.0' /></head>\n\
             <body>\n\
             <div class='ocr_page' id='page_1' title='image \"scan.png\"; bbox 0 0 2480 3508; ppageno 0'>\n\
             <div class='ocr_carea' id='block_1_1' title='bbox 0 0 100 20'>\n\
             <p class='ocr_par' id='par_1_1' lang='eng' title='bbox 0 0 100 20'>\n\
             <span class='ocr_line' id='line_1_1' title='bbox 0 0 100 20; baseline 0 -5; x_size 30; x_descenders 6; x_ascenders 7'>{words}</span>\n\
             </p>\n</div>\n</div>\n</body>\n</html>\n"
        )
    }
}

/// 带临时工作目录的测试环境
pub struct TestEnvironment {
    pub dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// 记录所有请求的翻译后端
pub struct RecordingBackend {
    pub calls: Rc<RefCell<Vec<(String, String, String)>>>,
}

impl RecordingBackend {
    pub fn new() -> (Self, Rc<RefCell<Vec<(String, String, String)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl TranslationBackend for RecordingBackend {
    fn translate(&self, source: &str, target: &str, text: &str) -> TranslationResult<String> {
        self.calls
            .borrow_mut()
            .push((source.to_string(), target.to_string(), text.to_string()));
        Ok(text.to_uppercase())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
