use anyhow::{Context, Result};
use clap::Parser;
use kwfreq_core::{analyze, to_pretty_json, AnalyzeOptions, FilterEngine, KeywordSpec, DEFAULT_KEY_NAME};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "kwfreq", version, about = "统计文件或目录中各关键词的出现次数")]
struct Cli {
    /// 目标文件或目录（目录只扫描直接子文件）
    target: PathBuf,

    /// 关键词文件（JSON；扩展名为 .toml 时按 TOML 解析）
    keyword_file: PathBuf,

    /// 忽略大小写
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// 关键词文件中的键名
    #[arg(short, long, default_value = DEFAULT_KEY_NAME)]
    key: String,

    /// 输出文件（JSON 对象，缺失的父目录会自动创建）
    #[arg(short, long, default_value = "./output/results.json")]
    output: PathBuf,

    /// 行过滤引擎：regex（进程内）或 grep（外部命令）
    #[arg(long, default_value = "regex", value_parser = ["regex", "grep"])]
    engine: String,

    /// 线程数（目录扫描并行；"auto"=CPU 核心数）
    #[arg(long, default_value = "auto")]
    threads: String,

    /// 每扫完一个文件就重写一次输出文件
    #[arg(long)]
    progressive: bool,

    /// 同时把结果打印到标准输出
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    info!(input = ?cli.target, keyword_file = ?cli.keyword_file, output = ?cli.output, "parsed arguments");

    let engine = match cli.engine.as_str() {
        "grep" => FilterEngine::Grep,
        _ => FilterEngine::Regex,
    };
    let opts = AnalyzeOptions {
        case_insensitive: cli.case_insensitive,
        output_path: Some(cli.output.clone()),
        engine,
        threads: parse_threads(&cli.threads),
        progressive: cli.progressive,
    };
    let spec = KeywordSpec::File { path: cli.keyword_file.clone(), key: cli.key.clone() };

    let analysis = analyze(&cli.target, Some(&spec), &opts)
        .with_context(|| format!("keyword analysis of {} failed", cli.target.display()))?;

    if cli.print {
        print!("{}", to_pretty_json(&analysis.results).context("render results")?);
    }

    info!(
        files_scanned = analysis.stats.files_scanned,
        matches_total = analysis.stats.matches_total,
        unmatched_lines = analysis.stats.unmatched_lines,
        output = ?cli.output,
        "analysis finished"
    );
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到标准错误，标准输出留给 --print
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") {
        return None;
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threads_argument() {
        assert_eq!(parse_threads("auto"), None);
        assert_eq!(parse_threads("AUTO"), None);
        assert_eq!(parse_threads("3"), Some(3));
        assert_eq!(parse_threads("0"), None);
        assert_eq!(parse_threads("many"), None);
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["kwfreq", "book.txt", "kw.json"]).unwrap();
        assert_eq!(cli.key, "keywords");
        assert_eq!(cli.output, PathBuf::from("./output/results.json"));
        assert!(!cli.case_insensitive);
        assert_eq!(cli.engine, "regex");
    }

    #[test]
    fn cli_requires_both_positionals() {
        assert!(Cli::try_parse_from(["kwfreq", "book.txt"]).is_err());
    }
}
