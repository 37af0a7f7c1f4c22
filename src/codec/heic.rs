//! # HEIC 解码器
//!
//! - HEIF 容器（ISO-BMFF `ftyp` 品牌为 heic/heix/mif1 等）通过 `libheif-rs`
//!   解码主图像为交错 RGB（默认启用的 `heif` feature）
//! - 其他内容按字节流嗅探格式交给 `image` 解码
//!   （部分设备导出的 `.heic` 实际是 JPEG/PNG）
//!
//! ## 依赖关系
//! - 实现 `codec::Decoder`
//! - 使用 `libheif-rs`、`image` crate

use super::Decoder;

use anyhow::Context;
use image::DynamicImage;
use std::io::{Cursor, Read};

/// HEIF 系列的 ISO-BMFF 品牌
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"hevm", b"hevs", b"mif1", b"msf1",
];

/// HEIC 解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct HeicDecoder;

impl Decoder for HeicDecoder {
    fn decode(&self, reader: &mut dyn Read) -> anyhow::Result<DynamicImage> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("reading image data")?;

        if is_heif(&bytes) {
            decode_heif(&bytes)
        } else {
            decode_other(&bytes)
        }
    }
}

/// 检查字节流是否为 HEIF 容器
///
/// 读取首个 `ftyp` box 的主品牌与兼容品牌。
pub fn is_heif(bytes: &[u8]) -> bool {
    if bytes.len() < 16 || &bytes[4..8] != b"ftyp" {
        return false;
    }

    let box_size = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let end = box_size.clamp(16, bytes.len());

    // 主品牌 [8..12]，次版本号 [12..16]，之后是兼容品牌
    std::iter::once(&bytes[8..12])
        .chain(bytes[16..end].chunks_exact(4))
        .any(|brand| HEIF_BRANDS.iter().any(|known| brand == &known[..]))
}

#[cfg(feature = "heif")]
fn decode_heif(bytes: &[u8]) -> anyhow::Result<DynamicImage> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(bytes)?;
    let handle = ctx.primary_image_handle()?;
    let decoded = lib_heif.decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)?;

    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .context("decoded HEIF image has no interleaved RGB plane")?;

    interleaved_to_rgb(plane.width, plane.height, plane.stride, plane.data)
}

#[cfg(not(feature = "heif"))]
fn decode_heif(_bytes: &[u8]) -> anyhow::Result<DynamicImage> {
    anyhow::bail!(
        "HEIF container found but this build has no HEIF decoder (enable the `heif` feature)"
    )
}

/// 去掉每行 stride 的填充字节，得到紧凑的 RGB 位图
#[cfg(feature = "heif")]
fn interleaved_to_rgb(
    width: u32,
    height: u32,
    stride: usize,
    data: &[u8],
) -> anyhow::Result<DynamicImage> {
    let row_len = width as usize * 3;
    anyhow::ensure!(
        stride >= row_len,
        "HEIF plane stride {} is shorter than a {}-pixel RGB row",
        stride,
        width
    );

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(stride).take(height as usize) {
        let row = row
            .get(..row_len)
            .context("HEIF plane row is shorter than its reported width")?;
        pixels.extend_from_slice(row);
    }

    let rgb = image::RgbImage::from_raw(width, height, pixels)
        .context("HEIF plane is smaller than its reported dimensions")?;

    Ok(DynamicImage::ImageRgb8(rgb))
}

fn decode_other(bytes: &[u8]) -> anyhow::Result<DynamicImage> {
    let image = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    Ok(image)
}

/// 测试用 HEIC 样本：用 libheif 的 HEVC 编码器现场生成
///
/// 当前 libheif 没有 HEVC 编码插件时返回 `None`。
#[cfg(all(test, feature = "heif"))]
pub(crate) fn sample_heic(width: u32, height: u32) -> Option<Vec<u8>> {
    use libheif_rs::{
        Channel, ColorSpace, CompressionFormat, EncoderQuality, HeifContext, Image, LibHeif,
        RgbChroma,
    };

    let lib_heif = LibHeif::new();
    let mut encoder = lib_heif.encoder_for_format(CompressionFormat::Hevc).ok()?;
    encoder.set_quality(EncoderQuality::Lossy(90)).ok()?;

    let mut image = Image::new(width, height, ColorSpace::Rgb(RgbChroma::C444)).ok()?;
    image.create_plane(Channel::R, width, height, 8).ok()?;
    image.create_plane(Channel::G, width, height, 8).ok()?;
    image.create_plane(Channel::B, width, height, 8).ok()?;

    let planes = image.planes_mut();
    for (mut plane, value) in [(planes.r?, 200u8), (planes.g?, 40), (planes.b?, 40)] {
        let stride = plane.stride;
        for row in plane.data.chunks_mut(stride).take(height as usize) {
            row[..width as usize].fill(value);
        }
    }

    let mut ctx = HeifContext::new().ok()?;
    ctx.encode_image(&image, &mut encoder, None).ok()?;
    ctx.write_to_bytes().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 只有 `ftyp` + 空 `meta` box 的 HEIF 容器
    fn bare_heif_container() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&24u32.to_be_bytes());
        bytes.extend_from_slice(b"ftyp");
        bytes.extend_from_slice(b"heic");
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(b"mif1heic");
        bytes.extend_from_slice(&12u32.to_be_bytes());
        bytes.extend_from_slice(b"meta");
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes
    }

    #[test]
    fn test_is_heif_brands() {
        assert!(is_heif(&bare_heif_container()));

        // 主品牌未知，但兼容品牌里有 mif1
        let mut compat = bare_heif_container();
        compat[8..12].copy_from_slice(b"xxxx");
        assert!(is_heif(&compat));

        // MP4 视频不是 HEIF
        let mut mp4 = bare_heif_container();
        mp4[8..12].copy_from_slice(b"isom");
        mp4[16..24].copy_from_slice(b"isomavc1");
        assert!(!is_heif(&mp4));
    }

    #[test]
    fn test_is_heif_rejects_other_formats() {
        assert!(!is_heif(b""));
        assert!(!is_heif(b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00\x01\x01\x00\x00\x01"));
        assert!(!is_heif(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"));
    }

    #[test]
    fn test_decode_heif_container_without_image_fails() {
        let err = HeicDecoder
            .decode(&mut Cursor::new(bare_heif_container()))
            .unwrap_err();
        // 容器已被识别为 HEIF，不会落入格式嗅探
        assert!(!err.to_string().contains("could not be determined"));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let mut reader = Cursor::new(b"definitely not an image".to_vec());
        assert!(HeicDecoder.decode(&mut reader).is_err());
    }

    #[test]
    fn test_decode_empty_fails() {
        let mut reader = Cursor::new(Vec::new());
        assert!(HeicDecoder.decode(&mut reader).is_err());
    }

    #[test]
    fn test_decode_disguised_png() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(3, 2));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = HeicDecoder.decode(&mut Cursor::new(png)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[cfg(feature = "heif")]
    #[test]
    fn test_interleaved_to_rgb_strips_stride() {
        // 2x2，每行 6 字节像素 + 2 字节填充
        let data = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
        let img = interleaved_to_rgb(2, 2, 8, &data).unwrap().to_rgb8();
        assert_eq!(img.into_raw(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[cfg(feature = "heif")]
    #[test]
    fn test_interleaved_to_rgb_short_plane_fails() {
        assert!(interleaved_to_rgb(2, 2, 8, &[0; 10]).is_err());
        assert!(interleaved_to_rgb(2, 2, 4, &[0; 16]).is_err());
    }

    #[cfg(feature = "heif")]
    #[test]
    fn test_decode_real_heic() {
        let Some(heic) = sample_heic(64, 48) else {
            eprintln!("libheif has no HEVC encoder, skipping HEIC decode test");
            return;
        };
        assert!(is_heif(&heic));

        let decoded = HeicDecoder.decode(&mut Cursor::new(heic)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));

        let pixel = decoded.to_rgb8().get_pixel(32, 24).0;
        assert!(pixel[0] > 150 && pixel[1] < 100 && pixel[2] < 100, "{pixel:?}");
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn test_decode_heif_without_feature_is_explicit() {
        let err = HeicDecoder
            .decode(&mut Cursor::new(bare_heif_container()))
            .unwrap_err();
        assert!(err.to_string().contains("`heif` feature"));
    }
}
