//! # 批量处理模块
//!
//! 提供统一的文件批量转换能力。
//!
//! ## 功能
//! - 筛选输入路径中的 `.heic` 文件
//! - 单文件转换任务（打开 / 解码 / 创建 / 编码）
//! - 有界并行执行与结果汇总
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `rayon` 进行并行处理

pub mod collector;
pub mod runner;
pub mod task;

pub use collector::FileCollector;
pub use runner::{BatchReport, BatchRunner};
pub use task::{ConversionJob, ConversionOutcome, ConversionTask};
