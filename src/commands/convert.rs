//! # convert 命令实现
//!
//! 批量将 HEIC 文件转换为 JPEG。
//!
//! ## 流程
//! 1. 准备输出目录（非 `.` 时按需创建）
//! 2. 筛选输入中的 `.heic` 文件，任一路径无法访问则立即失败
//! 3. 在有界线程池中逐个转换
//! 4. 汇总失败，存在失败时返回 `BatchFailed`
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的参数
//! - 使用 `batch/`, `codec/`
//! - 使用 `utils/output.rs`

use crate::batch::task::CURRENT_DIR;
use crate::batch::{BatchReport, BatchRunner, ConversionJob, ConversionTask, FileCollector};
use crate::cli::Cli;
use crate::codec::jpeg::{MAX_QUALITY, MIN_QUALITY};
use crate::codec::{HeicDecoder, JpegEncoder};
use crate::error::{HeicToJpegError, Result};
use crate::utils::output;

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 失败汇总表格行
#[derive(Debug, Clone, Tabled)]
struct FailureRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Stage")]
    stage: String,
    #[tabled(rename = "Cause")]
    cause: String,
}

/// 执行 convert 命令
pub fn execute(args: Cli) -> Result<()> {
    output::set_verbose(args.verbose);
    if output::is_verbose() {
        output::print_header("Converting HEIC to JPEG");
    }

    if !(MIN_QUALITY..=MAX_QUALITY).contains(&args.quality) {
        output::print_warning(&format!(
            "Quality {} is outside {}-{}; the encoder will clamp it",
            args.quality, MIN_QUALITY, MAX_QUALITY
        ));
    }

    if args.output != Path::new(CURRENT_DIR) {
        ensure_output_dir(&args.output)?;
        output::print_verbose(&format!(
            "Output directory set to: {}",
            args.output.display()
        ));
    }

    let files = FileCollector::new(args.inputs).collect()?;

    if files.is_empty() {
        output::print_verbose("No .heic files found to convert.");
        return Ok(());
    }

    let runner = BatchRunner::new(args.jobs);
    output::print_verbose(&format!(
        "Converting {} file(s) with {} parallel job(s)",
        files.len(),
        runner.jobs()
    ));

    let jobs: Vec<ConversionJob> = files
        .into_iter()
        .map(|file| ConversionJob::new(file, &args.output, args.quality))
        .collect();

    let decoder = HeicDecoder;
    let encoder = JpegEncoder;
    let task = ConversionTask::new(&decoder, &encoder);

    let report = runner.run(&jobs, |job| task.execute(job))?;

    if report.has_failures() {
        print_failures(&report);
        return Err(HeicToJpegError::BatchFailed {
            failed: report.failed(),
            total: report.total(),
        });
    }

    output::print_done(&format!(
        "Converted {} file(s) into '{}'",
        report.success,
        args.output.display()
    ));

    Ok(())
}

/// 确保输出目录存在（含父目录）
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    output::print_verbose(&format!("Creating output directory: {}", path.display()));
    fs::create_dir_all(path).map_err(|e| HeicToJpegError::CreateOutputDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// 逐条输出失败，再把汇总表格整体写到 stderr
fn print_failures(report: &BatchReport) {
    for (_, error) in &report.failures {
        output::print_error(&error.to_string());
    }

    eprintln!("{}", render_failures(report));
}

/// 生成失败汇总：标题栏 + 表格
fn render_failures(report: &BatchReport) -> String {
    let rows: Vec<FailureRow> = report
        .failures
        .iter()
        .map(|(source, error)| FailureRow {
            source: source.display().to_string(),
            stage: error.stage().to_string(),
            cause: error.cause(),
        })
        .collect();

    format!(
        "{}{}",
        output::format_header("Failed conversions"),
        Table::new(&rows)
    )
}
