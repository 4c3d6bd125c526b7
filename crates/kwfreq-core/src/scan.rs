//! 分析主流程：解析关键词 → 判定目标类型 → 单文件扫描或目录并行扫描 → 写报告
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{KeywordError, Result};
use crate::filter::{alternation_pattern, GrepFilter, LineFilter, RegexFilter};
use crate::frequency::{base_name, FrequencyMap, ResultStore};
use crate::keywords::{resolve_keywords, KeywordSpec};
use crate::matcher::resolve_key;
use crate::options::{AnalyzeOptions, AnalyzeStats, FilterEngine};
use crate::report::{prepare_output, write_report};
use crate::walker::scan_directory;

/// 一次分析的结果：完整结果集 + 统计
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub results: ResultStore,
    pub stats: AnalyzeStats,
}

/// 单文件扫描结果（内部使用）
#[derive(Debug)]
pub(crate) struct FileScan {
    pub(crate) freq: FrequencyMap,
    pub(crate) unmatched: u64,
}

/// 一次运行内共享的只读扫描上下文，可跨线程引用
pub(crate) struct ScanContext<'a> {
    keywords: &'a [String],
    pattern: String,
    case_insensitive: bool,
    filter: &'a dyn LineFilter,
}

impl<'a> ScanContext<'a> {
    pub(crate) fn new(keywords: &'a [String], case_insensitive: bool, filter: &'a dyn LineFilter) -> Self {
        Self { keywords, pattern: alternation_pattern(keywords), case_insensitive, filter }
    }

    /// 扫描单个文件：过滤器失败时整体失败，不产出部分结果
    pub(crate) fn scan(&self, path: &Path) -> Result<FileScan> {
        let lines = self.filter.filter(&self.pattern, self.case_insensitive, path)?;

        let mut freq = FrequencyMap::zeroed(self.keywords);
        let mut unmatched = 0u64;
        for line in lines.iter().flat_map(|chunk| chunk.split('\n')) {
            if line.is_empty() {
                continue;
            }
            match resolve_key(line, self.keywords, &freq, self.case_insensitive) {
                Some(key) => {
                    freq.increment(key);
                }
                None => unmatched += 1,
            }
        }
        if unmatched > 0 {
            warn!(path = %path.display(), unmatched, "filter lines without a matching keyword");
        }
        debug!(path = %path.display(), matches = freq.total(), "file scanned");
        Ok(FileScan { freq, unmatched })
    }
}

/// 单线程协调者：唯一可以修改结果集与报告文件的一方
pub(crate) struct Collector<'a> {
    results: ResultStore,
    stats: AnalyzeStats,
    snapshot_to: Option<&'a Path>,
}

impl<'a> Collector<'a> {
    pub(crate) fn new(snapshot_to: Option<&'a Path>) -> Self {
        Self { results: ResultStore::new(), stats: AnalyzeStats::default(), snapshot_to }
    }

    /// 登记一个文件的频次表；渐进模式下随即重写报告快照
    pub(crate) fn record(&mut self, name: String, scan: FileScan) -> Result<()> {
        self.stats.files_scanned += 1;
        self.stats.matches_total += scan.freq.total();
        self.stats.unmatched_lines += scan.unmatched;
        if self.results.insert(name.clone(), scan.freq).is_some() {
            warn!(name = %name, "duplicate base name, earlier result overwritten");
        }
        if let Some(path) = self.snapshot_to {
            write_report(&self.results, path)?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Analysis {
        Analysis { results: self.results, stats: self.stats }
    }
}

/// 扫描单个文件并返回其频次表
pub fn scan_file(path: &Path, keywords: &[String], case_insensitive: bool, filter: &dyn LineFilter) -> Result<FrequencyMap> {
    Ok(ScanContext::new(keywords, case_insensitive, filter).scan(path)?.freq)
}

/// 按 `opts.engine` 选择行过滤器并执行分析
pub fn analyze(target: &Path, spec: Option<&KeywordSpec>, opts: &AnalyzeOptions) -> Result<Analysis> {
    match opts.engine {
        FilterEngine::Regex => analyze_with_filter(target, spec, opts, &RegexFilter::new()),
        FilterEngine::Grep => analyze_with_filter(target, spec, opts, &GrepFilter::new()),
    }
}

/// 使用给定的行过滤器执行一次完整分析
/// - 目录：列出直接子项并行扫描，全部结束后汇总；任一文件失败则整体失败
/// - 报告只在全部扫描结束后写一次（渐进模式下另有逐文件快照）
pub fn analyze_with_filter(
    target: &Path,
    spec: Option<&KeywordSpec>,
    opts: &AnalyzeOptions,
    filter: &dyn LineFilter,
) -> Result<Analysis> {
    let keywords = resolve_keywords(spec)?;
    let meta = std::fs::metadata(target)
        .map_err(|source| KeywordError::NotFound { path: target.to_path_buf(), source })?;
    info!(input = %target.display(), keywords = keywords.len(), is_dir = meta.is_dir(), "starting analysis");

    let output = opts.output_path.as_deref();
    if let Some(out) = output {
        prepare_output(out)?;
    }

    let ctx = ScanContext::new(&keywords, opts.case_insensitive, filter);
    let mut collector = Collector::new(output.filter(|_| opts.progressive));

    if meta.is_dir() {
        scan_directory(target, &ctx, opts.threads, &mut collector)?;
    } else {
        let scan = ctx.scan(target)?;
        collector.record(base_name(target), scan)?;
    }

    let analysis = collector.finish();
    if let Some(out) = output {
        write_report(&analysis.results, out)?;
    }
    info!(
        files_scanned = analysis.stats.files_scanned,
        matches_total = analysis.stats.matches_total,
        "analysis finished"
    );
    Ok(analysis)
}
