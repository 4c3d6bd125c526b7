//! 错误类型（模块）
use std::path::PathBuf;
use thiserror::Error;

/// 关键词统计过程中的所有失败情形
#[derive(Debug, Error)]
pub enum KeywordError {
    /// 未提供关键词来源（列表为空或文件路径为空）
    #[error("no keyword source given")]
    MissingInput,

    /// 关键词文件存在但内容为空
    #[error("keyword file is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    /// 关键词文件不是合法 JSON（直接透传解析器错误）
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// 关键词文件不是合法 TOML（直接透传解析器错误）
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// 关键词文件中没有指定的键
    #[error("key `{key}` not found in {}", path.display())]
    MissingKey { key: String, path: PathBuf },

    /// 目标路径不存在或无法列出
    #[error("target not found: {} ({source})", path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// 行过滤器在某个文件上失败
    #[error("scan failed for {}: {message}", path.display())]
    Scan { path: PathBuf, message: String },

    /// 读写关键词文件或报告时的 I/O 错误
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// 关键词拼出的交替模式无法编译
    #[error("invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, KeywordError>;

impl KeywordError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KeywordError::Io { path: path.into(), source }
    }

    pub(crate) fn scan(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        KeywordError::Scan { path: path.into(), message: message.into() }
    }
}
