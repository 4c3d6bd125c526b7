//! 频次表与结果集（对外暴露）
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// 单文件频次表：每个关键词恰好一项，初始为 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: BTreeMap<String, u64>,
}

impl FrequencyMap {
    /// 以关键词集合构建全零频次表
    pub fn zeroed(keywords: &[String]) -> Self {
        let counts = keywords.iter().map(|k| (k.clone(), 0)).collect();
        Self { counts }
    }

    /// 计数加一；键不存在时返回 false 且不插入
    pub fn increment(&mut self, keyword: &str) -> bool {
        match self.counts.get_mut(keyword) {
            Some(n) => {
                *n += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, keyword: &str) -> Option<u64> {
        self.counts.get(keyword).copied()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.counts.contains_key(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 所有关键词的命中总数
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// 一次运行的结果集：文件基名（去扩展名）→ 频次表
/// 同名文件后写覆盖先写
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    files: BTreeMap<String, FrequencyMap>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整项写入，返回被覆盖的旧值
    pub fn insert(&mut self, name: impl Into<String>, freq: FrequencyMap) -> Option<FrequencyMap> {
        self.files.insert(name.into(), freq)
    }

    pub fn get(&self, name: &str) -> Option<&FrequencyMap> {
        self.files.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyMap)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 由路径得到结果集键：文件名去掉最后一个扩展名
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zeroed_has_one_entry_per_keyword() {
        let freq = FrequencyMap::zeroed(&words(&["Alice", "Cat", "mad"]));
        assert_eq!(freq.len(), 3);
        assert!(freq.iter().all(|(_, n)| n == 0));
    }

    #[test]
    fn increment_ignores_unknown_keys() {
        let mut freq = FrequencyMap::zeroed(&words(&["foo"]));
        assert!(freq.increment("foo"));
        assert!(!freq.increment("bar"));
        assert_eq!(freq.get("foo"), Some(1));
        assert!(!freq.contains("bar"));
        assert_eq!(freq.total(), 1);
    }

    #[test]
    fn store_overwrites_same_name() {
        let mut store = ResultStore::new();
        let mut first = FrequencyMap::zeroed(&words(&["foo"]));
        first.increment("foo");
        assert!(store.insert("notes", first.clone()).is_none());
        assert_eq!(store.insert("notes", FrequencyMap::zeroed(&words(&["foo"]))), Some(first));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn base_name_strips_last_extension() {
        assert_eq!(base_name(Path::new("/data/foo.txt")), "foo");
        assert_eq!(base_name(Path::new("archive.tar.gz")), "archive.tar");
        assert_eq!(base_name(Path::new("README")), "README");
        assert_eq!(base_name(Path::new(".bashrc")), ".bashrc");
    }
}
