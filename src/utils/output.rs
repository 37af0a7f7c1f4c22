//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! `-v` 打开后，`print_verbose` / `print_skip` 才会输出；
//! 错误与最终汇总总是输出。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// 设置是否输出详细信息
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// 当前是否为详细模式
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印详细信息（仅详细模式）
pub fn print_verbose(msg: &str) {
    if is_verbose() {
        print_info(msg);
    }
}

/// 打印跳过消息（仅详细模式）
pub fn print_skip(msg: &str) {
    if is_verbose() {
        println!("{} {}", "[SKIP]".dimmed(), msg);
    }
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印转换成功消息（仅详细模式）
pub fn print_conversion(from: &str, to: &str) {
    if is_verbose() {
        println!(
            "{} {} {} {}",
            "[OK]".green().bold(),
            from.dimmed(),
            "->".cyan(),
            to
        );
    }
}

/// 生成标题栏文本
pub fn format_header(title: &str) -> String {
    let line = "─".repeat(60);
    format!("\n{}\n  {}\n{}\n", line.dimmed(), title.bold(), line.dimmed())
}

/// 打印标题栏
pub fn print_header(title: &str) {
    println!("{}", format_header(title));
}
