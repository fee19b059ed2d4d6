//! # 统计信息
//!
//! 记录一次转码前后的尺寸与字节数，并生成界面展示用的三行统计文本。

use std::fmt;

use serde::Serialize;

use super::RasterImage;

/// 一次转码的统计记录。
///
/// 会序列化给界面层，因此只包含基础类型。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeStats {
    pub original_width: u32,
    pub original_height: u32,
    /// 原图的无损（PNG）编码字节数，作为对比基线。
    pub original_size_bytes: usize,
    pub processed_width: u32,
    pub processed_height: u32,
    /// 输出 JPEG 的字节数。
    pub processed_size_bytes: usize,
    pub reduction_percent: f64,
}

impl TranscodeStats {
    pub fn new(
        original: (u32, u32),
        original_size_bytes: usize,
        processed: (u32, u32),
        processed_size_bytes: usize,
    ) -> Self {
        Self {
            original_width: original.0,
            original_height: original.1,
            original_size_bytes,
            processed_width: processed.0,
            processed_height: processed.1,
            processed_size_bytes,
            reduction_percent: reduction_percent(original_size_bytes, processed_size_bytes),
        }
    }
}

/// 体积缩减百分比；基线为 0 时返回 0。
///
/// 输出比基线更大时结果为负数，原样保留。
///
/// # 示例
/// ```rust
/// use smol_paste::image_handler::reduction_percent;
///
/// assert_eq!(reduction_percent(1000, 400), 60.0);
/// assert_eq!(reduction_percent(0, 400), 0.0);
/// ```
pub fn reduction_percent(original_size_bytes: usize, processed_size_bytes: usize) -> f64 {
    if original_size_bytes == 0 {
        return 0.0;
    }
    let original = original_size_bytes as f64;
    (original - processed_size_bytes as f64) * 100.0 / original
}

fn kib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

impl fmt::Display for TranscodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Original: {}x{}, {:.1} KB",
            self.original_width,
            self.original_height,
            kib(self.original_size_bytes)
        )?;
        writeln!(
            f,
            "Processed: {}x{}, {:.1} KB",
            self.processed_width,
            self.processed_height,
            kib(self.processed_size_bytes)
        )?;
        write!(f, "Reduction: {:.1}%", self.reduction_percent)
    }
}

/// 转码结果：输出位图 + 统计。
#[derive(Debug, Clone)]
pub struct TranscodeResult {
    /// 由输出 JPEG 解码得到的位图（无透明通道）。
    pub image: RasterImage,
    pub stats: TranscodeStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_is_exact_for_round_numbers() {
        assert_eq!(reduction_percent(1000, 400), 60.0);
        assert_eq!(reduction_percent(1000, 1000), 0.0);
        assert_eq!(reduction_percent(1000, 1500), -50.0);
        assert_eq!(reduction_percent(0, 0), 0.0);
    }

    #[test]
    fn summary_uses_kilobytes_with_one_decimal() {
        let stats = TranscodeStats::new((800, 600), 2048, (400, 300), 512);
        assert_eq!(
            stats.to_string(),
            "Original: 800x600, 2.0 KB\nProcessed: 400x300, 0.5 KB\nReduction: 75.0%"
        );
    }

    #[test]
    fn summary_rounds_to_one_decimal() {
        let stats = TranscodeStats::new((10, 10), 3000, (10, 10), 1000);
        let text = stats.to_string();
        assert!(text.contains("Original: 10x10, 2.9 KB"), "{text}");
        assert!(text.ends_with("Reduction: 66.7%"), "{text}");
    }
}
