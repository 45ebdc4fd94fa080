//! 翻译词典缓存模块
//!
//! 词典以三层 JSON 对象保存：源语言 → 目标语言 → 原文 → 译文。
//! 启动时整体读入内存，快照时整体覆盖写回，从不增量追加。

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::translation::error::{helpers, TranslationResult};

type Entries = BTreeMap<String, String>;
type Targets = BTreeMap<String, Entries>;

/// 翻译词典
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCache {
    languages: BTreeMap<String, Targets>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载词典，文件不存在时返回空词典
    ///
    /// 文件格式错误是致命错误，不做部分恢复。
    pub fn load(path: &Path) -> TranslationResult<Self> {
        if !path.is_file() {
            tracing::debug!("词典文件 {} 不存在，使用空词典", path.display());
            return Ok(Self::new());
        }

        let data = fs::read_to_string(path)?;
        let cache: Self = serde_json::from_str(&data).map_err(|e| {
            helpers::cache_error(format!("malformed dictionary {}: {}", path.display(), e))
        })?;

        tracing::info!(
            "已加载词典 {}，共 {} 条翻译",
            path.display(),
            cache.len()
        );
        Ok(cache)
    }

    /// 将整个词典写入文件
    ///
    /// 先写入同目录下的临时文件再替换目标文件，写入中途失败不会破坏旧快照。
    pub fn save(&self, path: &Path) -> TranslationResult<()> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }
        set_snapshot_permissions(file.as_file(), path)?;
        file.persist(path)
            .map_err(|e| helpers::cache_error(format!("cannot write {}: {}", path.display(), e)))?;

        tracing::debug!("词典快照已写入 {}（{} 条）", path.display(), self.len());
        Ok(())
    }

    /// 查找译文，三级键都存在时才命中
    pub fn lookup(&self, source_lang: &str, target_lang: &str, text: &str) -> Option<&str> {
        self.languages
            .get(source_lang)
            .and_then(|targets| targets.get(target_lang))
            .and_then(|entries| entries.get(text))
            .map(String::as_str)
    }

    /// 写入译文，按需创建中间层
    pub fn store(&mut self, source_lang: &str, target_lang: &str, text: &str, translated: &str) {
        self.languages
            .entry(source_lang.to_string())
            .or_default()
            .entry(target_lang.to_string())
            .or_default()
            .insert(text.to_string(), translated.to_string());
    }

    /// 词典中的翻译总数
    pub fn len(&self) -> usize {
        self.languages
            .values()
            .flat_map(|targets| targets.values())
            .map(|entries| entries.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 词典中出现过的 (源语言, 目标语言) 组合
    pub fn languages(&self) -> Vec<(&str, &str)> {
        self.languages
            .iter()
            .flat_map(|(source, targets)| {
                targets
                    .keys()
                    .map(move |target| (source.as_str(), target.as_str()))
            })
            .collect()
    }
}

/// 临时文件默认权限为 0600，替换前沿用旧快照的权限，新文件使用 0644
#[cfg(unix)]
fn set_snapshot_permissions(file: &fs::File, path: &Path) -> TranslationResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => fs::Permissions::from_mode(0o644),
    };
    file.set_permissions(permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_snapshot_permissions(_file: &fs::File, _path: &Path) -> TranslationResult<()> {
    Ok(())
}
