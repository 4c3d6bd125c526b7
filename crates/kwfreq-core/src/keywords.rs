//! 关键词来源解析（JSON / TOML 关键词文件或字面列表）
use std::path::{Path, PathBuf};

use crate::error::{KeywordError, Result};
use crate::options::DEFAULT_KEY_NAME;

/// 关键词来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordSpec {
    /// 字面关键词列表，按原样使用
    List(Vec<String>),
    /// 结构化关键词文件 + 查找键
    File { path: PathBuf, key: String },
}

impl KeywordSpec {
    /// 以默认键名 "keywords" 引用关键词文件
    pub fn file(path: impl Into<PathBuf>) -> Self {
        KeywordSpec::File { path: path.into(), key: DEFAULT_KEY_NAME.to_string() }
    }
}

/// 解析关键词集合
/// - 未提供来源（或列表为空 / 文件路径为空）→ `MissingInput`，不做任何 I/O
/// - 字面列表 → 原样返回
/// - 文件 → 读取全文；空文件 → `EmptyFile`；否则解析并取出 `key` 对应的字符串数组
pub fn resolve_keywords(spec: Option<&KeywordSpec>) -> Result<Vec<String>> {
    match spec {
        None => Err(KeywordError::MissingInput),
        Some(KeywordSpec::List(list)) if list.is_empty() => Err(KeywordError::MissingInput),
        Some(KeywordSpec::List(list)) => Ok(list.clone()),
        Some(KeywordSpec::File { path, key }) => {
            if path.as_os_str().is_empty() {
                return Err(KeywordError::MissingInput);
            }
            let keywords = load_keyword_file(path, key)?;
            if keywords.is_empty() {
                return Err(KeywordError::MissingInput);
            }
            Ok(keywords)
        }
    }
}

fn load_keyword_file(path: &Path, key: &str) -> Result<Vec<String>> {
    let txt = std::fs::read_to_string(path).map_err(|e| KeywordError::io(path, e))?;
    if txt.is_empty() {
        return Err(KeywordError::EmptyFile { path: path.to_path_buf() });
    }

    let missing = || KeywordError::MissingKey { key: key.to_string(), path: path.to_path_buf() };

    // 兼容 TOML 关键词文件（与规则文件同一格式），其余一律按 JSON 解析
    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        let table: toml::Table = toml::from_str(&txt)?;
        let value = table.get(key).cloned().ok_or_else(missing)?;
        Ok(value.try_into::<Vec<String>>()?)
    } else {
        let mut doc: serde_json::Value = serde_json::from_str(&txt)?;
        let value = doc.get_mut(key).map(serde_json::Value::take).ok_or_else(missing)?;
        Ok(serde_json::from_value::<Vec<String>>(value)?)
    }
}
