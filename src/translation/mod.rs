//! 翻译模块
//!
//! 采用清晰的模块化架构：
//! - **core**: 翻译会话和远程翻译服务
//! - **pipeline**: 可翻译性过滤
//! - **storage**: 词典缓存和快照
//! - **languages**: ISO 639 语言代码转换
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use hocr_translate::translation::{TranslationConfig, TranslationSession};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TranslationConfig::from_env("de")?;
//! let mut session = TranslationSession::from_config(&config)?;
//!
//! let word = session.translate(Some("Hello"), "en")?;
//! let stats = session.finish()?;
//! println!("{word}: {stats}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod languages;
pub mod pipeline;
pub mod storage;

pub use self::config::{constants, TranslationConfig};
pub use self::core::{
    GoogleTranslator, TranslationBackend, TranslationSession, TranslationStats,
};
pub use self::error::{TranslationError, TranslationResult};
pub use self::languages::iso639_3_to_iso639_1;
pub use self::pipeline::is_translatable;
pub use self::storage::TranslationCache;
