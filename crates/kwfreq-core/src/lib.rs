//! 关键词频次统计核心库
//!
//! 设计要点：
//! - 关键词来自字面列表或 JSON/TOML 关键词文件（按键名取数组）。
//! - 命中子串由可替换的行过滤器产出（进程内正则或外部 grep），每次命中一行。
//! - 每个文件得到一张全零初始化的频次表，按文件基名（去扩展名）登记到结果集。
//! - 目录扫描使用有界线程池并行，结果集只由协调线程写入；报告在全部扫描结束后写一次。

mod error;
mod options;
mod keywords;
mod filter;
mod matcher;
mod frequency;
mod report;
mod scan;
mod walker;

pub use error::{KeywordError, Result};
pub use options::{AnalyzeOptions, AnalyzeStats, FilterEngine, DEFAULT_KEY_NAME};
pub use keywords::{resolve_keywords, KeywordSpec};
pub use filter::{alternation_pattern, GrepFilter, LineFilter, RegexFilter};
pub use frequency::{base_name, FrequencyMap, ResultStore};
pub use report::{load_report, prepare_output, to_pretty_json, write_report};
pub use scan::{analyze, analyze_with_filter, scan_file, Analysis};
