//! 分析选项与统计信息（模块）
use std::path::PathBuf;

/// 行过滤引擎
/// - Regex：进程内 `regex::bytes` 匹配，逐行输出命中子串，不依赖外部程序。
/// - Grep：调用系统 `grep -o -E`，与命令行 grep 的行为一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterEngine {
    #[default]
    Regex,
    Grep,
}

/// 一次分析运行的配置（运行期间不可变）
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// 是否忽略大小写
    pub case_insensitive: bool,
    /// 报告输出路径；None 表示不落盘
    pub output_path: Option<PathBuf>,
    /// 行过滤引擎
    pub engine: FilterEngine,
    /// 目录扫描线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 每个文件扫描完成后即重写一次报告快照（默认仅在全部完成后写一次）
    pub progressive: bool,
}

/// 关键词文件中的默认查找键
pub const DEFAULT_KEY_NAME: &str = "keywords";

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            output_path: None,
            engine: FilterEngine::Regex,
            threads: None,
            progressive: false,
        }
    }
}

/// 分析统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalyzeStats {
    pub files_scanned: usize,
    pub matches_total: u64,
    /// 过滤器输出但无法归属到任何关键词的行数
    pub unmatched_lines: u64,
}
