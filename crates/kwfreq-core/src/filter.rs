//! 行过滤器：从文件中抽取命中关键词的子串（每次命中输出一行）
//!
//! 两种实现与 `FilterEngine` 一一对应：
//! - `RegexFilter`：进程内按行做 `regex::bytes` 匹配，编译结果按 (模式, 大小写) 缓存。
//! - `GrepFilter`：调用外部 `grep -o -P`，逐行读取其标准输出。
//!
//! 两者的交替均按关键词顺序取第一个可匹配分支（POSIX `-E` 取最长匹配，不满足这一点）。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use regex::bytes::{Regex, RegexBuilder};

use crate::error::{KeywordError, Result};

/// 行过滤协作者：输入交替模式、大小写标志与目标文件，输出命中子串序列
pub trait LineFilter: Send + Sync {
    fn filter(&self, pattern: &str, case_insensitive: bool, path: &Path) -> Result<Vec<String>>;
}

/// 以 `|` 连接关键词构造交替模式（不转义元字符）
pub fn alternation_pattern(keywords: &[String]) -> String {
    keywords.join("|")
}

/// 进程内正则过滤器
#[derive(Default)]
pub struct RegexFilter {
    cache: Mutex<HashMap<(String, bool), Regex>>,
}

impl RegexFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取（或懒编译）指定模式的 bytes 正则
    fn compiled(&self, pattern: &str, case_insensitive: bool) -> Result<Regex> {
        let key = (pattern.to_string(), case_insensitive);
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(rx) = cache.get(&key) {
            return Ok(rx.clone());
        }
        let rx = RegexBuilder::new(pattern).case_insensitive(case_insensitive).build()?;
        cache.insert(key, rx.clone());
        Ok(rx)
    }
}

impl LineFilter for RegexFilter {
    fn filter(&self, pattern: &str, case_insensitive: bool, path: &Path) -> Result<Vec<String>> {
        let rx = self.compiled(pattern, case_insensitive)?;
        let buf = std::fs::read(path).map_err(|e| KeywordError::scan(path, e.to_string()))?;

        let mut out = Vec::new();
        // 与 grep 一致：匹配不跨行，同一行的多次命中分别输出
        for line in buf.split(|b| *b == b'\n') {
            for m in rx.find_iter(line) {
                if m.end() <= m.start() {
                    continue;
                }
                // 有损转换，保证非 UTF-8 文件也能产出可写入 JSON 的键
                out.push(String::from_utf8_lossy(m.as_bytes()).into_owned());
            }
        }
        Ok(out)
    }
}

/// 外部 grep 过滤器
#[derive(Debug, Clone)]
pub struct GrepFilter {
    program: PathBuf,
}

impl Default for GrepFilter {
    fn default() -> Self {
        Self { program: PathBuf::from("grep") }
    }
}

impl GrepFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的 grep 可执行文件
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// 检查 grep 是否可用且支持 `-P`（空输入上退出码 0/1 表示正常）
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .args(["-P", "-e", "a"])
            .stdin(Stdio::null())
            .output()
            .is_ok_and(|o| matches!(o.status.code(), Some(0 | 1)))
    }
}

impl LineFilter for GrepFilter {
    fn filter(&self, pattern: &str, case_insensitive: bool, path: &Path) -> Result<Vec<String>> {
        let mut cmd = Command::new(&self.program);
        // -a：二进制文件按文本处理，与 RegexFilter 行为一致
        // -P：Perl 语义，交替按书写顺序优先，与 RegexFilter 一致
        cmd.arg("-o").arg("-a").arg("-P");
        if case_insensitive {
            cmd.arg("-i");
        }
        cmd.arg("-e").arg(pattern).arg("--").arg(path);

        let output = cmd
            .output()
            .map_err(|e| KeywordError::scan(path, format!("failed to run {}: {e}", self.program.display())))?;

        match output.status.code() {
            Some(0) => {}
            // 退出码 1：没有任何行被选中
            Some(1) => return Ok(Vec::new()),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let message = match stderr.trim() {
                    "" => format!("grep exited with {}", output.status),
                    s => s.to_string(),
                };
                return Err(KeywordError::scan(path, message));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter(|l| !l.is_empty()).map(str::to_string).collect())
    }
}
