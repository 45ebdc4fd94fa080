//! 翻译系统核心模块
//!
//! - **引擎层** (`engine.rs`): 翻译会话，串联过滤器、词典和远程服务，记录统计信息
//! - **服务层** (`service.rs`): 远程翻译后端及其 Google 实现
//!
//! ```text
//! TranslationSession (engine.rs)
//!     ├── is_translatable (pipeline/filters.rs)
//!     ├── TranslationCache (storage/cache.rs)
//!     └── TranslationBackend (service.rs)
//!             └── GoogleTranslator
//! ```

pub mod engine;
pub mod service;

pub use engine::{TranslationSession, TranslationStats};
pub use service::{GoogleTranslator, TranslationBackend};
