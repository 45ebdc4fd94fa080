//! 翻译配置管理模块
//!
//! 配置来源优先级：命令行参数 > 环境变量 > 默认值

use std::path::PathBuf;
use std::time::Duration;

use crate::env::{files, translation, EnvVar};
use crate::translation::error::{helpers, TranslationResult};

/// 翻译配置常量
pub mod constants {
    pub const DICTIONARY_FILE: &str = "dictionary.json";
    pub const TEMPLATE_FILE: &str = "template.html";
    pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
    pub const DEFAULT_SNAPSHOT_INTERVAL: usize = 20;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// 模板中的占位符
    pub const LANG_PLACEHOLDER: &str = "{%LANG%}";
    pub const CONTENT_PLACEHOLDER: &str = "{%CONTENT%}";

    /// 行高换算为 CSS 字号时的除数
    pub const FONT_SIZE_DIVISOR: f64 = 1.5;

    /// 单独出现时不需要翻译的符号
    pub const SPECIAL_CHARACTERS: &[&str] = &[
        ".", ",", "-", "/", "*", "+", "!", "@", "~", "#", "$", "%", "^", "&", "(", ")", "_", "[",
        "]", "{", "}", "\"", "'", ";", ":", "<", ">", "?",
    ];
}

/// 一次运行的翻译配置
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub target_lang: String,
    pub api_key: Option<String>,
    pub api_url: String,
    pub dictionary_path: PathBuf,
    pub template_path: PathBuf,
    pub snapshot_interval: usize,
    pub timeout: Duration,
}

impl TranslationConfig {
    /// 使用默认值创建配置（不读取环境变量）
    pub fn new(target_lang: &str) -> Self {
        Self {
            target_lang: target_lang.to_string(),
            api_key: None,
            api_url: constants::DEFAULT_API_URL.to_string(),
            dictionary_path: PathBuf::from(constants::DICTIONARY_FILE),
            template_path: PathBuf::from(constants::TEMPLATE_FILE),
            snapshot_interval: constants::DEFAULT_SNAPSHOT_INTERVAL,
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// 从环境变量加载配置
    pub fn from_env(target_lang: &str) -> TranslationResult<Self> {
        Ok(Self {
            target_lang: target_lang.to_string(),
            api_key: translation::ApiKey::get_optional()?.filter(|key| !key.is_empty()),
            api_url: translation::ApiUrl::get()?,
            dictionary_path: PathBuf::from(files::Dictionary::get()?),
            template_path: PathBuf::from(files::Template::get()?),
            snapshot_interval: translation::SnapshotInterval::get()?,
            timeout: translation::Timeout::get()?,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn with_dictionary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary_path = path.into();
        self
    }

    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    pub fn with_snapshot_interval(mut self, interval: usize) -> Self {
        self.snapshot_interval = interval;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.target_lang.chars().count() != 2 {
            return Err(helpers::validation_error(format!(
                "lang_to can be only 2 characters long, got \"{}\"",
                self.target_lang
            )));
        }

        if self.snapshot_interval == 0 {
            return Err(helpers::config_error(
                "snapshot interval must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslationConfig::new("de");
        assert_eq!(config.dictionary_path, PathBuf::from("dictionary.json"));
        assert_eq!(config.template_path, PathBuf::from("template.html"));
        assert_eq!(config.snapshot_interval, 20);
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_target_lang_must_be_two_chars() {
        assert!(TranslationConfig::new("deu").validate().is_err());
        assert!(TranslationConfig::new("d").validate().is_err());
        assert!(TranslationConfig::new("").validate().is_err());
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let config = TranslationConfig::new("de").with_api_key(Some("  ".to_string()));
        assert!(config.api_key.is_none());

        let config = TranslationConfig::new("de").with_api_key(Some("secret".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_zero_snapshot_interval_rejected() {
        let config = TranslationConfig::new("de").with_snapshot_interval(0);
        assert!(config.validate().is_err());
    }
}
