//! # heic-to-jpeg - HEIC 批量转换工具
//!
//! 扫描输入路径，挑出 `.heic` 文件，在有界线程池中并行解码并以指定质量
//! 重新编码为 JPEG，写入输出目录。
//!
//! ## 退出码
//! - `0`: 全部成功，或没有找到可转换的文件
//! - `1`: 任一文件转换失败、输入路径无法访问或输出目录无法创建
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (筛选、转换任务、并行调度)
//!   │     └── codec/     (HEIC 解码 / JPEG 编码)
//!   ├── utils/      (输出与命名工具)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod codec;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
