//! # JPEG 编码器
//!
//! 基于 `image::codecs::jpeg::JpegEncoder`。
//!
//! ## 依赖关系
//! - 实现 `codec::Encoder`
//! - 使用 `image` crate

use super::Encoder;

use anyhow::Context;
use image::codecs::jpeg;
use image::{ColorType, DynamicImage};
use std::io::Write;

/// JPEG 质量下限
pub const MIN_QUALITY: i32 = 1;
/// JPEG 质量上限
pub const MAX_QUALITY: i32 = 100;

/// JPEG 编码器
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegEncoder;

impl Encoder for JpegEncoder {
    fn encode(
        &self,
        writer: &mut dyn Write,
        image: &DynamicImage,
        quality: i32,
    ) -> anyhow::Result<()> {
        // 超出范围的质量值截断到 1-100
        let quality = quality.clamp(MIN_QUALITY, MAX_QUALITY) as u8;

        // JPEG 不支持 alpha / 16 位 / 浮点，统一降为 8 位 RGB
        let converted;
        let image = match image.color() {
            ColorType::L8 | ColorType::Rgb8 => image,
            _ => {
                converted = DynamicImage::ImageRgb8(image.to_rgb8());
                &converted
            }
        };

        let encoder = jpeg::JpegEncoder::new_with_quality(writer, quality);
        image
            .write_with_encoder(encoder)
            .with_context(|| format!("JPEG encoder rejected {:?} image", image.color()))?;

        Ok(())
    }
}
