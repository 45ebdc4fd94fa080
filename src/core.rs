use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use markup5ever_rcdom::RcDom;

use crate::builders::HtmlBuilder;
use crate::env::{core::NoColor, EnvVar};
use crate::parsers::hocr::{hocr_to_dom, serialize_hocr, translate_document};
use crate::translation::error::{helpers, TranslationError, TranslationResult};
use crate::translation::{TranslationConfig, TranslationSession, TranslationStats};

/// Supported output formats
///
/// The format is chosen from the output file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Translated hOCR document (`.hocr`)
    Hocr,
    /// HTML report rendered from a template (`.html`, `.htm`)
    Html,
}

impl OutputFormat {
    /// Determines the output format from a path, case-insensitively
    ///
    /// Any other extension is a configuration error.
    pub fn from_path(path: &Path) -> TranslationResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("hocr") => Ok(OutputFormat::Hocr),
            Some("html") | Some("htm") => Ok(OutputFormat::Html),
            _ => Err(helpers::config_error(format!(
                "unsupported output format for {}, use .hocr or .html",
                path.display()
            ))),
        }
    }
}

/// Options for translating a single hOCR file
#[derive(Debug, Clone)]
pub struct HocrTranslateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: TranslationConfig,
}

impl HocrTranslateOptions {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        config: TranslationConfig,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config,
        }
    }

    /// Checks paths and configuration before anything is read or translated
    pub fn validate(&self) -> TranslationResult<()> {
        if !self.input.is_file() {
            return Err(TranslationError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Input file {} not found!", self.input.display()),
            )));
        }

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(TranslationError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Output path {} is not valid!", self.output.display()),
                )));
            }
        }

        self.config.validate()
    }
}

/// Translates `options.input` into `options.output`
///
/// The output format is checked before the dictionary is loaded, so an
/// unsupported extension never costs a remote request.
pub fn translate_hocr_file(options: &HocrTranslateOptions) -> TranslationResult<TranslationStats> {
    options.validate()?;
    let format = OutputFormat::from_path(&options.output)?;

    let session = TranslationSession::from_config(&options.config)?;
    if !session.has_backend() {
        tracing::warn!("No API key configured, only dictionary translations are available");
    }

    DocumentProcessor::new(session, &options.config.template_path).process(
        &options.input,
        &options.output,
        format,
    )
}

/// 文档处理器，负责协调整个文档处理流程
pub struct DocumentProcessor {
    session: TranslationSession,
    template_path: PathBuf,
}

impl DocumentProcessor {
    pub fn new(session: TranslationSession, template_path: impl Into<PathBuf>) -> Self {
        Self {
            session,
            template_path: template_path.into(),
        }
    }

    /// 处理文档并写入输出文件
    ///
    /// 无论处理是否成功都会写入最后一次词典快照；处理失败时返回原始错误。
    pub fn process(
        mut self,
        input: &Path,
        output: &Path,
        format: OutputFormat,
    ) -> TranslationResult<TranslationStats> {
        let result = self.process_document(input, output, format);
        let finished = self.session.finish();

        match (result, finished) {
            (Ok(()), finished) => finished,
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(snapshot_error)) => {
                tracing::error!("Failed to save dictionary: {}", snapshot_error);
                Err(e)
            }
        }
    }

    fn process_document(
        &mut self,
        input: &Path,
        output: &Path,
        format: OutputFormat,
    ) -> TranslationResult<()> {
        // 1. 读取并解析输入
        let input_data = fs::read(input).map_err(|e| {
            TranslationError::from(e).with_context(format!("input {}", input.display()))
        })?;
        let dom = hocr_to_dom(&input_data)
            .map_err(|e| e.with_context(format!("input {}", input.display())))?;

        // 2. 翻译所有单词
        translate_document(&dom, &mut self.session)?;

        // 3. 格式化输出
        let output_formatter = OutputFormatter::new(
            format,
            HtmlBuilder::new(&self.template_path),
            self.session.target_lang(),
        );
        let result = output_formatter.format_output(&dom)?;

        // 4. 写入文件
        fs::write(output, result).map_err(|e| {
            TranslationError::from(e).with_context(format!("output {}", output.display()))
        })?;
        tracing::info!("Wrote {}", output.display());

        Ok(())
    }
}

/// 输出格式化器
pub struct OutputFormatter<'a> {
    format: OutputFormat,
    html_builder: HtmlBuilder,
    target_lang: &'a str,
}

impl<'a> OutputFormatter<'a> {
    pub fn new(format: OutputFormat, html_builder: HtmlBuilder, target_lang: &'a str) -> Self {
        Self {
            format,
            html_builder,
            target_lang,
        }
    }

    pub fn format_output(&self, dom: &RcDom) -> TranslationResult<Vec<u8>> {
        match self.format {
            OutputFormat::Hocr => Ok(serialize_hocr(dom)),
            OutputFormat::Html => self.format_html_output(dom),
        }
    }

    fn format_html_output(&self, dom: &RcDom) -> TranslationResult<Vec<u8>> {
        let html = self.html_builder.render(dom, self.target_lang)?;
        Ok(html.into_bytes())
    }
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_GREEN: &str = "\x1b[32m";
const ANSI_COLOR_YELLOW: &str = "\x1b[33m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

fn use_color(stream: atty::Stream) -> bool {
    atty::is(stream) && !NoColor::get().unwrap_or(false)
}

fn paint(msg: &str, color: &str, stream: atty::Stream) -> String {
    if use_color(stream) {
        format!("{color}{msg}{ANSI_COLOR_RESET}")
    } else {
        msg.to_string()
    }
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{}", paint(msg, ANSI_COLOR_RED, atty::Stream::Stderr));
}

/// Prints a warning to stdout
pub fn print_warning_message(msg: &str) {
    println!("{}", paint(msg, ANSI_COLOR_RED, atty::Stream::Stdout));
}

/// Prints the run summary
pub fn print_stats(stats: &TranslationStats) {
    println!(
        "{}",
        paint(
            &format!("Local dictionary hits: {}", stats.dictionary_hits),
            ANSI_COLOR_GREEN,
            atty::Stream::Stdout
        )
    );
    println!(
        "{}",
        paint(
            &format!("Google translate requests: {}", stats.remote_requests),
            ANSI_COLOR_YELLOW,
            atty::Stream::Stdout
        )
    );

    if stats.nothing_translated() {
        print_warning_message(
            "Nothing was translated, something went wrong! is your Google translate API key set ?",
        );
    }
}
