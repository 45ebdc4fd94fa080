//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。命令行参数优先于这里的值。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn default_value() -> Option<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::default_value().ok_or_else(|| EnvError {
                variable: Self::NAME.to_string(),
                message: "Required environment variable not set".to_string(),
            }),
        }
    }

    /// 未设置时返回 `None`，设置了但无效时返回错误
    fn get_optional() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value).map(Some),
            _ => Ok(Self::default_value()),
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "HOCR_TRANSLATE_LOG_LEVEL";
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn default_value() -> Option<String> {
            Some("warn".to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn default_value() -> Option<bool> {
            Some(false)
        }

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// Google 翻译 API 密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "HOCR_TRANSLATE_API_KEY";
        const DESCRIPTION: &'static str = "Google translate API key";

        fn default_value() -> Option<String> {
            None
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "HOCR_TRANSLATE_API_URL";
        const DESCRIPTION: &'static str = "Translation API endpoint URL";

        fn default_value() -> Option<String> {
            Some(crate::translation::config::constants::DEFAULT_API_URL.to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 两次词典快照之间的远程请求数
    pub struct SnapshotInterval;
    impl EnvVar<usize> for SnapshotInterval {
        const NAME: &'static str = "HOCR_TRANSLATE_SNAPSHOT_INTERVAL";
        const DESCRIPTION: &'static str = "Remote translations between dictionary snapshots";

        fn default_value() -> Option<usize> {
            Some(crate::translation::config::constants::DEFAULT_SNAPSHOT_INTERVAL)
        }

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 10000)
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "HOCR_TRANSLATE_TIMEOUT";
        const DESCRIPTION: &'static str = "Translation request timeout in seconds";

        fn default_value() -> Option<Duration> {
            Some(Duration::from_secs(
                crate::translation::config::constants::DEFAULT_TIMEOUT_SECS,
            ))
        }

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_positive_usize(value, Self::NAME, 1, 300)?;
            Ok(Duration::from_secs(seconds as u64))
        }
    }
}

/// 文件路径相关环境变量
pub mod files {
    use super::*;

    /// 词典文件
    pub struct Dictionary;
    impl EnvVar<String> for Dictionary {
        const NAME: &'static str = "HOCR_TRANSLATE_DICTIONARY";
        const DESCRIPTION: &'static str = "Path of the local translation dictionary (JSON)";

        fn default_value() -> Option<String> {
            Some(crate::translation::config::constants::DICTIONARY_FILE.to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_path(value, Self::NAME)
        }
    }

    /// HTML 报告模板
    pub struct Template;
    impl EnvVar<String> for Template {
        const NAME: &'static str = "HOCR_TRANSLATE_TEMPLATE";
        const DESCRIPTION: &'static str = "Path of the HTML report template";

        fn default_value() -> Option<String> {
            Some(crate::translation::config::constants::TEMPLATE_FILE.to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_path(value, Self::NAME)
        }
    }
}

fn parse_path(value: &str, name: &str) -> EnvResult<String> {
    let path = value.trim();
    if path.is_empty() {
        return Err(EnvError {
            variable: name.to_string(),
            message: "Path must not be empty".to_string(),
        });
    }
    Ok(path.to_string())
}

fn parse_positive_usize(value: &str, name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let number: usize = value.trim().parse().map_err(|_| EnvError {
        variable: name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if number < min || number > max {
        return Err(EnvError {
            variable: name.to_string(),
            message: format!("Must be between {} and {}", min, max),
        });
    }

    Ok(number)
}

/// 列出所有受支持的环境变量及其说明
pub fn describe() -> Vec<(&'static str, &'static str)> {
    vec![
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION),
        (core::NoColor::NAME, core::NoColor::DESCRIPTION),
        (translation::ApiKey::NAME, translation::ApiKey::DESCRIPTION),
        (translation::ApiUrl::NAME, translation::ApiUrl::DESCRIPTION),
        (
            translation::SnapshotInterval::NAME,
            translation::SnapshotInterval::DESCRIPTION,
        ),
        (translation::Timeout::NAME, translation::Timeout::DESCRIPTION),
        (files::Dictionary::NAME, files::Dictionary::DESCRIPTION),
        (files::Template::NAME, files::Template::DESCRIPTION),
    ]
}
