//! # 编解码器模块
//!
//! 转换流水线只通过 [`Decoder`] / [`Encoder`] 两个 trait 调用编解码器，
//! 错误统一为 `anyhow::Error`，由调用方原样包装，不做重新解释。
//!
//! ## 依赖关系
//! - 被 `batch/task.rs` 与 `commands/convert.rs` 使用
//! - 使用 `image` crate 作为内存位图表示
//! - 子模块: heic, jpeg

pub mod heic;
pub mod jpeg;

pub use heic::HeicDecoder;
pub use jpeg::JpegEncoder;

use image::DynamicImage;
use std::io::{Read, Write};

/// 将容器格式字节流解码为位图
pub trait Decoder: Send + Sync {
    fn decode(&self, reader: &mut dyn Read) -> anyhow::Result<DynamicImage>;
}

/// 将位图按给定质量编码写出
pub trait Encoder: Send + Sync {
    /// `quality` 不在调用方校验，超出常规 1-100 范围时的行为由实现决定。
    fn encode(&self, writer: &mut dyn Write, image: &DynamicImage, quality: i32)
        -> anyhow::Result<()>;
}
