//! 翻译会话
//!
//! 持有词典、可选的远程翻译后端以及本次运行的统计信息，
//! 由调用方显式传递，不使用任何全局状态。

use std::fmt;
use std::path::PathBuf;

use crate::translation::config::{constants, TranslationConfig};
use crate::translation::core::service::{GoogleTranslator, TranslationBackend};
use crate::translation::error::TranslationResult;
use crate::translation::pipeline::filters::is_translatable;
use crate::translation::storage::cache::TranslationCache;

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslationStats {
    /// 词典命中次数
    pub dictionary_hits: usize,
    /// 远程翻译请求次数
    pub remote_requests: usize,
    /// 原样保留的单词数（空白、数字、符号）
    pub passed_through: usize,
    /// 访问过的单词总数
    pub words: usize,
    /// 已写入的词典快照数（包括最后一次）
    pub snapshots: usize,
}

impl TranslationStats {
    /// 没有任何单词经由词典或翻译服务处理
    pub fn nothing_translated(&self) -> bool {
        self.dictionary_hits == 0 && self.remote_requests == 0
    }
}

impl fmt::Display for TranslationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "words: {}, dictionary hits: {}, remote requests: {}, passed through: {}",
            self.words, self.dictionary_hits, self.remote_requests, self.passed_through
        )
    }
}

/// 单次运行的翻译会话
pub struct TranslationSession {
    cache: TranslationCache,
    backend: Option<Box<dyn TranslationBackend>>,
    target_lang: String,
    dictionary_path: PathBuf,
    snapshot_interval: usize,
    stats: TranslationStats,
}

impl TranslationSession {
    pub fn new(
        cache: TranslationCache,
        backend: Option<Box<dyn TranslationBackend>>,
        target_lang: &str,
        dictionary_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cache,
            backend,
            target_lang: target_lang.to_string(),
            dictionary_path: dictionary_path.into(),
            snapshot_interval: constants::DEFAULT_SNAPSHOT_INTERVAL,
            stats: TranslationStats::default(),
        }
    }

    /// 根据配置加载词典并创建远程客户端
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        let cache = TranslationCache::load(&config.dictionary_path)?;
        let backend = GoogleTranslator::from_config(config)?
            .map(|translator| Box::new(translator) as Box<dyn TranslationBackend>);

        Ok(Self::new(
            cache,
            backend,
            &config.target_lang,
            &config.dictionary_path,
        )
        .with_snapshot_interval(config.snapshot_interval))
    }

    pub fn with_snapshot_interval(mut self, interval: usize) -> Self {
        self.snapshot_interval = interval.max(1);
        self
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    /// 翻译一个单词
    ///
    /// 顺序：空文本 → 不可翻译的单词原样返回 → 词典 → 远程服务。
    /// 没有远程服务时未命中的单词原样返回。
    pub fn translate(&mut self, word: Option<&str>, source_lang: &str) -> TranslationResult<String> {
        self.stats.words += 1;

        let word = match word {
            Some(word) if !word.is_empty() => word,
            _ => return Ok(String::new()),
        };

        if !is_translatable(word) {
            self.stats.passed_through += 1;
            return Ok(word.to_string());
        }

        if let Some(translated) = self.cache.lookup(source_lang, &self.target_lang, word) {
            self.stats.dictionary_hits += 1;
            return Ok(translated.to_string());
        }

        match self.backend.as_deref() {
            Some(backend) => {
                let translated = backend.translate(source_lang, &self.target_lang, word)?;
                tracing::debug!(
                    "{} [{} → {}]: {:?} → {:?}",
                    backend.name(),
                    source_lang,
                    self.target_lang,
                    word,
                    translated
                );
                self.record_remote(source_lang, word, &translated)?;
                Ok(translated)
            }
            None => Ok(word.to_string()),
        }
    }

    fn record_remote(&mut self, source_lang: &str, word: &str, translated: &str) -> TranslationResult<()> {
        self.cache
            .store(source_lang, &self.target_lang, word, translated);
        self.stats.remote_requests += 1;

        if self.stats.remote_requests % self.snapshot_interval == 0 {
            tracing::info!(
                "Saving {} remote translations into dictionary",
                self.snapshot_interval
            );
            self.snapshot()?;
        }

        Ok(())
    }

    /// 写入一次完整的词典快照
    pub fn snapshot(&mut self) -> TranslationResult<()> {
        self.cache.save(&self.dictionary_path)?;
        self.stats.snapshots += 1;
        Ok(())
    }

    /// 结束会话：无条件写入最后一次快照并返回统计信息
    pub fn finish(mut self) -> TranslationResult<TranslationStats> {
        self.snapshot()?;
        Ok(self.stats)
    }
}
