//! 报告输出：结果集 → 4 空格缩进的 JSON 文件
use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{KeywordError, Result};
use crate::frequency::ResultStore;

/// 序列化为带缩进的 JSON 文本（键按字典序，末尾换行）
pub fn to_pretty_json(store: &ResultStore) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    store.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json 只产出 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 准备输出路径：递归创建父目录，再确保目标文件存在
pub fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KeywordError::io(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| KeywordError::io(path, e))?;
    Ok(())
}

/// 覆盖写入整个结果集快照
pub fn write_report(store: &ResultStore, path: &Path) -> Result<()> {
    let json = to_pretty_json(store)?;
    fs::write(path, json).map_err(|e| KeywordError::io(path, e))
}

/// 读回报告文件
pub fn load_report(path: &Path) -> Result<ResultStore> {
    let txt = fs::read_to_string(path).map_err(|e| KeywordError::io(path, e))?;
    Ok(serde_json::from_str(&txt)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyMap;
    use tempfile::tempdir;

    fn sample_store() -> ResultStore {
        let keywords = vec!["Alice".to_string(), "Cat".to_string()];
        let mut freq = FrequencyMap::zeroed(&keywords);
        freq.increment("Cat");
        freq.increment("Cat");
        let mut store = ResultStore::new();
        store.insert("chapter6", freq);
        store
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let json = to_pretty_json(&sample_store()).unwrap();
        let expected = "{\n    \"chapter6\": {\n        \"Alice\": 0,\n        \"Cat\": 2\n    }\n}\n";
        assert_eq!(json, expected);
    }

    #[test]
    fn empty_store_serializes_to_empty_object() {
        assert_eq!(to_pretty_json(&ResultStore::new()).unwrap(), "{}\n");
    }

    #[test]
    fn prepare_creates_missing_parents() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out/nested/results.json");

        prepare_output(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        // 已存在时不截断
        fs::write(&path, "{}").unwrap();
        prepare_output(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn written_report_loads_back_equal() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("results.json");
        let store = sample_store();

        prepare_output(&path).unwrap();
        write_report(&store, &path).unwrap();
        assert_eq!(load_report(&path).unwrap(), store);
    }
}
