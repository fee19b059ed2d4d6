//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `Transcoder` 只负责流程编排，不持有会话状态，也不直接与界面绑定。
//! 对外只有三个操作：
//! 1. `acquire`：把一次剪贴板读取结果归一为 `RasterImage`
//! 2. `transform`：基线测量 → 重采样 → 去透明 → JPEG 编码 → 回解码 → 统计
//! 3. `publish`：把结果写回剪贴板（见 `clipboard_writer.rs`）
//!
//! ## 实现思路
//!
//! - 每次调用都只读配置，不修改自身，调用之间互不影响。
//! - 记录 `baseline/resample/encode/decode/total` 阶段耗时，便于性能诊断。

use std::time::Instant;

use super::pipeline::flatten_alpha;
use super::source::ClipboardRead;
use super::{
    ColorMode, ImageConfig, ImageError, QualityPreset, RasterImage, ScalePreset, TranscodeResult,
    TranscodeStats,
};

/// 图片转码器。
pub struct Transcoder {
    pub(super) config: ImageConfig,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}

impl Transcoder {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// 将剪贴板读取结果归一为位图。
    ///
    /// 无图、读取失败、位图数据损坏都视为 `NoImage`；超过解码上限返回
    /// `ResourceLimit`。
    ///
    /// # 示例
    /// ```rust
    /// use smol_paste::image_handler::{ClipboardRead, ImageError, PlatformBitmap, Transcoder};
    ///
    /// let transcoder = Transcoder::default();
    /// let image = transcoder.acquire(ClipboardRead::Image(PlatformBitmap::new(2, 1, vec![255; 8])))?;
    /// assert_eq!(image.dimensions(), (2, 1));
    ///
    /// assert!(matches!(transcoder.acquire(ClipboardRead::Empty), Err(ImageError::NoImage)));
    /// # Ok::<(), ImageError>(())
    /// ```
    pub fn acquire(&self, read: ClipboardRead) -> Result<RasterImage, ImageError> {
        let bitmap = match read {
            ClipboardRead::Image(bitmap) => bitmap,
            ClipboardRead::Empty => {
                log::info!("📋 剪贴板中没有图片");
                return Err(ImageError::NoImage);
            }
            ClipboardRead::Failed(detail) => {
                log::warn!("⚠️ 读取剪贴板图片失败：{}", detail);
                return Err(ImageError::NoImage);
            }
        };

        if bitmap.expected_len() != Some(bitmap.rgba.len()) {
            log::warn!(
                "⚠️ 剪贴板位图数据异常：{}x{} 但有 {} 字节",
                bitmap.width,
                bitmap.height,
                bitmap.rgba.len()
            );
            return Err(ImageError::NoImage);
        }

        let (Ok(width), Ok(height)) = (u32::try_from(bitmap.width), u32::try_from(bitmap.height))
        else {
            return Err(ImageError::ResourceLimit(format!(
                "image dimensions {}x{} are out of range",
                bitmap.width, bitmap.height
            )));
        };

        Self::validate_pixel_limits(&self.config, width, height)?;
        Self::validate_decoded_memory_limits(&self.config, width, height)?;

        let image = RasterImage::new(width, height, ColorMode::Rgba, bitmap.rgba).map_err(|err| {
            log::warn!("⚠️ 剪贴板位图无法构造：{}", err);
            ImageError::NoImage
        })?;

        log::info!("✅ 已读取剪贴板图片：{}x{}", width, height);
        Ok(image)
    }

    /// 转码主入口。
    ///
    /// `source` 为 `None` 时返回 `NoSource`；缩放后任一边为 0 时返回
    /// `DegenerateSize`，此时不会进行任何编码。
    pub fn transform(
        &self,
        source: Option<&RasterImage>,
        scale: ScalePreset,
        quality: QualityPreset,
    ) -> Result<TranscodeResult, ImageError> {
        let source = source.ok_or(ImageError::NoSource)?;
        let (width, height) = source.dimensions();

        let (target_width, target_height) = scale.apply(width, height);
        if target_width == 0 || target_height == 0 {
            return Err(ImageError::DegenerateSize {
                width,
                height,
                percent: scale.percent(),
                target_width,
                target_height,
            });
        }

        let total_start = Instant::now();

        let baseline_start = Instant::now();
        let original_size_bytes = Self::encode_lossless(source)?.len();
        let baseline_elapsed = baseline_start.elapsed();

        let resample_start = Instant::now();
        let resampled =
            Self::resample(source, target_width, target_height, self.config.resize_filter)?;
        let flattened = flatten_alpha(&resampled, self.config.flatten_background)?;
        let resample_elapsed = resample_start.elapsed();

        let encode_start = Instant::now();
        let processed_bytes = Self::encode_lossy(&flattened, quality)?;
        let encode_elapsed = encode_start.elapsed();

        let decode_start = Instant::now();
        let image = Self::decode_round_trip(&processed_bytes)?;
        let decode_elapsed = decode_start.elapsed();

        let stats = TranscodeStats::new(
            (width, height),
            original_size_bytes,
            image.dimensions(),
            processed_bytes.len(),
        );

        log::debug!(
            "⏱️ 转码阶段耗时 - baseline={}ms resample={}ms encode={}ms decode={}ms total={}ms",
            baseline_elapsed.as_millis(),
            resample_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );
        log::info!(
            "✅ 图片转码完成 - {}x{} -> {}x{}（scale={} quality={}）{} -> {} 字节，缩减 {:.1}%",
            width,
            height,
            stats.processed_width,
            stats.processed_height,
            scale,
            quality,
            stats.original_size_bytes,
            stats.processed_size_bytes,
            stats.reduction_percent
        );

        Ok(TranscodeResult { image, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_handler::PlatformBitmap;

    fn checker_bitmap(width: usize, height: usize) -> PlatformBitmap {
        let mut rgba = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 20 };
                rgba.extend_from_slice(&[v, (x * 3) as u8, (y * 5) as u8, 255]);
            }
        }
        PlatformBitmap::new(width, height, rgba)
    }

    #[test]
    fn acquire_maps_failures_to_no_image() {
        let transcoder = Transcoder::default();
        assert!(matches!(
            transcoder.acquire(ClipboardRead::Failed("busy".into())),
            Err(ImageError::NoImage)
        ));
        assert!(matches!(
            transcoder.acquire(ClipboardRead::Image(PlatformBitmap::new(4, 4, vec![0; 10]))),
            Err(ImageError::NoImage)
        ));
        assert!(matches!(
            transcoder.acquire(ClipboardRead::Image(PlatformBitmap::new(0, 0, Vec::new()))),
            Err(ImageError::NoImage)
        ));
    }

    #[test]
    fn acquire_enforces_pixel_limit() {
        let transcoder = Transcoder::new(ImageConfig {
            max_decoded_pixels: 15,
            ..ImageConfig::default()
        });
        let result = transcoder.acquire(ClipboardRead::Image(checker_bitmap(4, 4)));
        assert!(matches!(result, Err(ImageError::ResourceLimit(_))));
    }

    #[test]
    fn transform_without_source_fails() {
        let transcoder = Transcoder::default();
        let result = transcoder.transform(None, ScalePreset::Full, QualityPreset::Medium);
        assert!(matches!(result, Err(ImageError::NoSource)));
    }

    #[test]
    fn transform_rejects_degenerate_scale() {
        let transcoder = Transcoder::default();
        let source = transcoder
            .acquire(ClipboardRead::Image(checker_bitmap(2, 2)))
            .unwrap();
        let result = transcoder.transform(Some(&source), ScalePreset::Quarter, QualityPreset::High);
        assert!(matches!(
            result,
            Err(ImageError::DegenerateSize {
                target_width: 0,
                target_height: 0,
                percent: 25,
                ..
            })
        ));
    }

    #[test]
    fn transform_reports_stats() {
        let transcoder = Transcoder::default();
        let source = transcoder
            .acquire(ClipboardRead::Image(checker_bitmap(64, 48)))
            .unwrap();
        let result = transcoder
            .transform(Some(&source), ScalePreset::Half, QualityPreset::Medium)
            .unwrap();

        assert_eq!(result.image.dimensions(), (32, 24));
        assert!(!result.image.has_alpha());
        assert_eq!((result.stats.original_width, result.stats.original_height), (64, 48));
        assert_eq!((result.stats.processed_width, result.stats.processed_height), (32, 24));
        assert!(result.stats.original_size_bytes > 0);
        assert!(result.stats.processed_size_bytes > 0);
        // 源图未被修改
        assert_eq!(source.dimensions(), (64, 48));
        assert!(source.has_alpha());
    }
}
