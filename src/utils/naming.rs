//! # 输出文件命名
//!
//! 由输入路径推导输出 JPEG 文件名。纯函数，不访问文件系统。
//!
//! 只识别两种后缀：完全大写的 `.HEIC` 和完全小写的 `.heic`。
//! 其他大小写组合（如 `.Heic`）原样保留，再追加 `.jpg`。
//!
//! ## 依赖关系
//! - 被 `batch/task.rs` 使用
//! - 无外部模块依赖

use std::path::Path;

/// 目标扩展名
pub const JPEG_EXTENSION: &str = ".jpg";

/// 取路径最后一段并替换扩展名为 `.jpg`
pub fn normalize_file_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());

    let stem = base
        .strip_suffix(".HEIC")
        .or_else(|| base.strip_suffix(".heic"))
        .unwrap_or(&*base);

    format!("{}{}", stem, JPEG_EXTENSION)
}
