//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ```text
//! heic-to-jpeg [-o <DIR>] [-q <QUALITY>] [-j <JOBS>] [-v] <INPUTS>...
//! ```
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::Parser;
use std::path::PathBuf;

/// heic-to-jpeg - 批量将 HEIC 图像转换为 JPEG
#[derive(Parser, Debug)]
#[command(name = "heic-to-jpeg")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batch convert HEIC images to JPEG", long_about = None)]
pub struct Cli {
    /// Input .heic files (directories are skipped)
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// JPEG quality (1-100, out-of-range values are clamped)
    #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
    pub quality: i32,

    /// Number of parallel jobs (0 = auto, twice the CPU count)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
