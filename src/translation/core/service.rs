//! 远程翻译服务
//!
//! 词典未命中时调用外部翻译服务。每次请求只翻译一个单词，失败时不重试。

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::translation::config::TranslationConfig;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

/// 翻译后端
///
/// 生产环境使用 [`GoogleTranslator`]，测试中可以替换为本地实现。
pub trait TranslationBackend {
    /// 将 `text` 从 `source_lang` 翻译为 `target_lang`（均为 ISO 639-1 代码）
    fn translate(&self, source_lang: &str, target_lang: &str, text: &str)
        -> TranslationResult<String>;

    /// 用于日志和统计输出的服务名称
    fn name(&self) -> &str {
        "remote"
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Debug, Deserialize)]
struct GoogleData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

/// Google Cloud Translation v2 客户端
pub struct GoogleTranslator {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> TranslationResult<Self> {
        if api_key.trim().is_empty() {
            return Err(helpers::config_error("Google translate API key is empty"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| helpers::config_error(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// 根据配置创建客户端，未配置 API 密钥时返回 `None`
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Option<Self>> {
        match config.api_key.as_deref() {
            Some(api_key) => Self::new(&config.api_url, api_key, config.timeout).map(Some),
            None => Ok(None),
        }
    }
}

impl TranslationBackend for GoogleTranslator {
    fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
        text: &str,
    ) -> TranslationResult<String> {
        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("q", text),
                ("source", source_lang),
                ("target", target_lang),
                ("format", "text"),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(TranslationError::Service(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        parse_response(&body)
    }

    fn name(&self) -> &str {
        "Google translate"
    }
}

/// 解析翻译服务响应，取第一条（也是唯一一条）译文
fn parse_response(body: &str) -> TranslationResult<String> {
    let response: GoogleResponse = serde_json::from_str(body)
        .map_err(|e| TranslationError::Service(format!("unexpected response: {e}")))?;

    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|translation| translation.translated_text)
        .ok_or_else(|| TranslationError::Service("response contains no translations".to_string()))
}
