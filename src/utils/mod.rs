//! # 工具函数模块
//!
//! 提供美化输出与输出文件命名等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/` 模块使用
//! - 子模块: naming, output

pub mod naming;
pub mod output;
