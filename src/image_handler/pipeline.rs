//! # 转码流水线各阶段
//!
//! ## 设计思路
//!
//! 每个阶段只做一件事，输入输出都是不可变的 `RasterImage` 或字节：
//!
//! 1. 无损编码（PNG）测量基线体积
//! 2. 按预设比例重采样（Lanczos3）
//! 3. 去除透明通道（合成到固定背景色）
//! 4. 有损编码（JPEG）
//! 5. 将 JPEG 解码回位图用于展示
//!
//! ## 实现思路
//!
//! - 重采样优先走 `fast_image_resize`（SIMD、透明通道感知），失败时回退
//!   `image::imageops::resize`，两条路径都是确定性的。
//! - 读取剪贴板图片时先按像素与内存上限快速拒绝，再构造位图。

use std::io::Cursor;

use fast_image_resize as fr;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ImageEncoder, ImageFormat};

use super::{ColorMode, ImageConfig, ImageError, QualityPreset, RasterImage, Transcoder};

impl Transcoder {
    /// 校验像素数量是否超过配置上限。
    pub(super) fn validate_pixel_limits(
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ImageError::ResourceLimit("pixel count overflows".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "image has {} pixels (limit: {} pixels)",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    pub(super) fn validate_decoded_memory_limits(
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ImageError::ResourceLimit("decoded size estimate overflows".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(ImageError::ResourceLimit(format!(
                "image needs {:.2} MB once decoded (limit: {:.2} MB)",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 无损编码为 PNG，仅用于测量基线体积。
    pub(super) fn encode_lossless(image: &RasterImage) -> Result<Vec<u8>, ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        PngEncoder::new(&mut buffer)
            .write_image(
                image.pixels(),
                image.width(),
                image.height(),
                image.mode().extended_color_type(),
            )
            .map_err(|e| ImageError::Encode(format!("PNG encoding failed: {}", e)))?;
        Ok(buffer.into_inner())
    }

    /// 重采样到目标尺寸。
    ///
    /// 目标尺寸与原图一致时直接复制，不做插值。
    pub(super) fn resample(
        image: &RasterImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RasterImage, ImageError> {
        if image.dimensions() == (target_width, target_height) {
            return Ok(image.clone());
        }

        match Self::resize_with_fast_image_resize(image, target_width, target_height, filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 重采样失败，回退 image::resize_exact：{}",
                    err
                );
                let resized = image
                    .to_dynamic()
                    .resize_exact(target_width, target_height, filter);
                RasterImage::from_dynamic(resized)
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &RasterImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RasterImage, ImageError> {
        let pixel_type = match image.mode() {
            ColorMode::Grayscale => fr::PixelType::U8,
            ColorMode::Rgb => fr::PixelType::U8x3,
            ColorMode::Rgba => fr::PixelType::U8x4,
        };

        let src_image = fr::images::Image::from_vec_u8(
            image.width(),
            image.height(),
            image.pixels().to_vec(),
            pixel_type,
        )
        .map_err(|e| ImageError::Encode(format!("failed to build resize source buffer: {}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, pixel_type);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Encode(format!("fast_image_resize failed: {}", e)))?;

        RasterImage::new(target_width, target_height, image.mode(), dst_image.into_vec())
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }

    /// JPEG 编码，图像必须不含透明通道。
    pub(super) fn encode_lossy(
        image: &RasterImage,
        quality: QualityPreset,
    ) -> Result<Vec<u8>, ImageError> {
        if image.has_alpha() {
            return Err(ImageError::Encode(
                "JPEG cannot carry an alpha channel".to_string(),
            ));
        }

        let mut buffer = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buffer, quality.quality())
            .write_image(
                image.pixels(),
                image.width(),
                image.height(),
                image.mode().extended_color_type(),
            )
            .map_err(|e| ImageError::Encode(format!("JPEG encoding failed: {}", e)))?;
        Ok(buffer.into_inner())
    }

    /// 将刚编码出的 JPEG 解码回位图。
    pub(super) fn decode_round_trip(bytes: &[u8]) -> Result<RasterImage, ImageError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(|e| ImageError::EncodeRoundTripFailed(e.to_string()))?;
        RasterImage::from_dynamic(decoded)
            .map_err(|e| ImageError::EncodeRoundTripFailed(e.to_string()))
    }
}

/// 将 RGBA 合成到不透明背景上，得到 RGB。
///
/// `out = (c * a + bg * (255 - a)) / 255`（四舍五入）。完全不透明的像素
/// RGB 值保持不变；非 RGBA 图像原样返回。
pub fn flatten_alpha(image: &RasterImage, background: [u8; 3]) -> Result<RasterImage, ImageError> {
    if !image.has_alpha() {
        return Ok(image.clone());
    }

    let mut rgb = Vec::with_capacity(image.pixels().len() / 4 * 3);
    for px in image.pixels().chunks_exact(4) {
        let alpha = u16::from(px[3]);
        if alpha == 255 {
            rgb.extend_from_slice(&px[..3]);
            continue;
        }
        for (channel, bg) in px[..3].iter().zip(background) {
            let blended = (u16::from(*channel) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }

    RasterImage::new(image.width(), image.height(), ColorMode::Rgb, rgb)
}
