//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型。除了缺少 API 密钥之外，所有错误都会终止本次运行。

use std::fmt;

use thiserror::Error;

use crate::env::EnvError;

/// 翻译错误类型
#[derive(Error, Debug)]
pub enum TranslationError {
    /// 文件读写错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 输入验证错误（路径、语言代码等）
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// ISO 639-3 代码没有对应的 ISO 639-1 代码
    #[error("iso639_3_code {0} not found")]
    LanguageNotFound(String),

    /// hOCR 元数据解析错误
    #[error("Parse error: {0}")]
    Parse(String),

    /// 词典文件错误
    #[error("Dictionary error: {0}")]
    Cache(String),

    /// 网络错误
    #[error("Network error: {0}")]
    Network(String),

    /// 翻译服务返回了错误或无法识别的响应
    #[error("Translation service error: {0}")]
    Service(String),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TranslationError {
    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(self, context: T) -> Self {
        match self {
            TranslationError::Io(e) => {
                TranslationError::Io(std::io::Error::new(e.kind(), format!("{context}: {e}")))
            }
            TranslationError::InvalidInput(msg) => {
                TranslationError::InvalidInput(format!("{msg} ({context})"))
            }
            TranslationError::Config(msg) => TranslationError::Config(format!("{msg} ({context})")),
            TranslationError::LanguageNotFound(code) => TranslationError::LanguageNotFound(code),
            TranslationError::Parse(msg) => TranslationError::Parse(format!("{msg} ({context})")),
            TranslationError::Cache(msg) => TranslationError::Cache(format!("{msg} ({context})")),
            TranslationError::Network(msg) => {
                TranslationError::Network(format!("{msg} ({context})"))
            }
            TranslationError::Service(msg) => {
                TranslationError::Service(format!("{msg} ({context})"))
            }
            TranslationError::Serialization(msg) => {
                TranslationError::Serialization(format!("{msg} ({context})"))
            }
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::Serialization(error.to_string())
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::Network(error.to_string())
    }
}

impl From<EnvError> for TranslationError {
    fn from(error: EnvError) -> Self {
        TranslationError::Config(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::Config(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }

    /// 创建解析错误
    pub fn parse_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::Parse(msg.to_string())
    }

    /// 创建词典错误
    pub fn cache_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::Cache(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_not_found_message() {
        let error = TranslationError::LanguageNotFound("xyz".to_string());
        assert_eq!(error.to_string(), "iso639_3_code xyz not found");
    }

    #[test]
    fn test_with_context_appends() {
        let error = helpers::parse_error("missing x_size").with_context("line 3");
        assert_eq!(error.to_string(), "Parse error: missing x_size (line 3)");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: TranslationError = io.into();
        assert!(matches!(error, TranslationError::Io(_)));
        assert!(error.to_string().contains("gone"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: TranslationError = json_error.into();
        assert!(matches!(error, TranslationError::Serialization(_)));
    }
}
