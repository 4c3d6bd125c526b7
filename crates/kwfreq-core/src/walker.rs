//! 目录扫描与并行调度
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{KeywordError, Result};
use crate::frequency::base_name;
use crate::scan::{Collector, FileScan, ScanContext};

/// worker → 协调者 的通道容量
const CHANNEL_CAPACITY: usize = 256;

/// 列出目录的直接子项（不递归）；子目录、非普通文件与无法访问的子项（如悬空链接）跳过
/// 只有目录本身无法列出时才是 `NotFound`
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(KeywordError::NotFound { path: dir.to_path_buf(), source: e.into() });
            }
            Err(e) => {
                warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else {
            warn!(path = %entry.path().display(), "skipping non-file entry");
        }
    }
    // 按文件名排序，串行路径的处理顺序可复现
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// 扫描目录下全部文件并交给协调者登记
/// - 线程数为 1 或文件数不超过 1 时串行执行，遇到第一个失败即返回
/// - 否则在有界 Rayon 线程池中并行扫描，协调者（当前线程）逐个接收结果；
///   全部结束后返回第一个失败（已登记的结果不回滚）
pub(crate) fn scan_directory(
    dir: &Path,
    ctx: &ScanContext<'_>,
    threads: Option<usize>,
    collector: &mut Collector<'_>,
) -> Result<()> {
    let files = list_entries(dir)?;
    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    debug!(dir = %dir.display(), files = files.len(), threads, "scanning directory");

    if threads == 1 || files.len() <= 1 {
        for path in &files {
            let scan = ctx.scan(path)?;
            collector.record(base_name(path), scan)?;
        }
        return Ok(());
    }

    scan_parallel(&files, ctx, threads, collector)
}

fn scan_parallel(
    files: &[PathBuf],
    ctx: &ScanContext<'_>,
    threads: usize,
    collector: &mut Collector<'_>,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    type Msg = (PathBuf, Result<FileScan>);
    let (tx, rx) = channel::bounded::<Msg>(CHANNEL_CAPACITY);

    let mut first_err: Option<KeywordError> = None;
    std::thread::scope(|s| {
        // 扫描在后台线程的线程池内执行；结束后 Sender 全部被丢弃，Receiver 收到关闭信号
        s.spawn(move || {
            pool.install(|| {
                files.par_iter().for_each_with(tx, |tx, path| {
                    let _ = tx.send((path.clone(), ctx.scan(path)));
                });
            });
        });

        for (path, res) in rx.iter() {
            let outcome = res.and_then(|scan| collector.record(base_name(&path), scan));
            if let Err(e) = outcome {
                warn!(path = %path.display(), error = %e, "file scan failed");
                first_err.get_or_insert(e);
            }
        }
    });

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
