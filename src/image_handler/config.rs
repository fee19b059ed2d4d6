//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ImageConfig`，保证运行时行为可观测、可调整、可测试。
//! 界面上的两组单选（缩放比例 / 压缩质量）用封闭枚举 `ScalePreset`、
//! `QualityPreset` 表达，界面层只负责“选项 ↔ 枚举值”的映射。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置（Lanczos3 + 白色背景）。
//! - 预设枚举提供稳定标签（用于展示）与字符串解析（用于控制台输入）。
//! - 不做任何持久化，每次启动都从默认值开始。

use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

use super::ImageError;

/// 转码配置。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 重采样滤镜。
    pub resize_filter: FilterType,
    /// 去除透明通道时的合成背景色（RGB）。
    pub flatten_background: [u8; 3],
    /// 读取剪贴板图片时允许的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 读取剪贴板图片时允许的内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 启动时默认选中的缩放比例。
    pub default_scale: ScalePreset,
    /// 启动时默认选中的压缩质量。
    pub default_quality: QualityPreset,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            resize_filter: FilterType::Lanczos3,
            flatten_background: [255, 255, 255],
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            default_scale: ScalePreset::Full,
            default_quality: QualityPreset::Medium,
        }
    }
}

/// 缩放比例预设，同时作用于宽和高，结果向下取整。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalePreset {
    Full,
    ThreeQuarters,
    Half,
    Quarter,
}

impl ScalePreset {
    /// 全部预设，按界面展示顺序排列。
    pub const ALL: [ScalePreset; 4] = [Self::Full, Self::ThreeQuarters, Self::Half, Self::Quarter];

    pub fn percent(self) -> u8 {
        match self {
            Self::Full => 100,
            Self::ThreeQuarters => 75,
            Self::Half => 50,
            Self::Quarter => 25,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "100%",
            Self::ThreeQuarters => "75%",
            Self::Half => "50%",
            Self::Quarter => "25%",
        }
    }

    /// 计算缩放后的尺寸：`floor(d * pct / 100)`。
    ///
    /// 使用整数运算，避免浮点误差导致的差一像素。结果可能为 0，
    /// 由调用方决定如何拒绝。
    ///
    /// # 示例
    /// ```rust
    /// use smol_paste::image_handler::ScalePreset;
    ///
    /// assert_eq!(ScalePreset::ThreeQuarters.apply(801, 601), (600, 450));
    /// assert_eq!(ScalePreset::Quarter.apply(2, 2), (0, 0));
    /// ```
    pub fn apply(self, width: u32, height: u32) -> (u32, u32) {
        let pct = u64::from(self.percent());
        let scale = |d: u32| (u64::from(d) * pct / 100) as u32;
        (scale(width), scale(height))
    }
}

impl fmt::Display for ScalePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScalePreset {
    type Err = ImageError;

    /// 接受 `50`、`50%` 这类写法。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        Self::ALL
            .into_iter()
            .find(|preset| digits.parse::<u8>().ok() == Some(preset.percent()))
            .ok_or_else(|| {
                ImageError::InvalidPreset(format!(
                    "unknown scale '{}' (choose 100%, 75%, 50% or 25%)",
                    trimmed
                ))
            })
    }
}

/// JPEG 质量预设（0–100，语义同标准 JPEG quality）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityPreset {
    High,
    Medium,
    Low,
    VeryLow,
}

impl QualityPreset {
    /// 全部预设，按质量从高到低排列。
    pub const ALL: [QualityPreset; 4] = [Self::High, Self::Medium, Self::Low, Self::VeryLow];

    pub fn quality(self) -> u8 {
        match self {
            Self::High => 95,
            Self::Medium => 85,
            Self::Low => 70,
            Self::VeryLow => 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High (95)",
            Self::Medium => "Medium (85)",
            Self::Low => "Low (70)",
            Self::VeryLow => "Very Low (50)",
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualityPreset {
    type Err = ImageError;

    /// 接受数值（`85`）或名称（`medium`、`very-low`）。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        let by_name = match normalized.as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "verylow" => Some(Self::VeryLow),
            _ => None,
        };

        by_name
            .or_else(|| {
                let value = normalized.parse::<u8>().ok()?;
                Self::ALL.into_iter().find(|preset| preset.quality() == value)
            })
            .ok_or_else(|| {
                ImageError::InvalidPreset(format!(
                    "unknown quality '{}' (choose 95, 85, 70 or 50)",
                    s.trim()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_lanczos_and_white_background() {
        let config = ImageConfig::default();
        assert_eq!(config.resize_filter, FilterType::Lanczos3);
        assert_eq!(config.flatten_background, [255, 255, 255]);
        assert_eq!(config.default_scale, ScalePreset::Full);
        assert_eq!(config.default_quality, QualityPreset::Medium);
    }

    #[test]
    fn scale_apply_rounds_down() {
        assert_eq!(ScalePreset::Full.apply(801, 601), (801, 601));
        assert_eq!(ScalePreset::Half.apply(801, 601), (400, 300));
        assert_eq!(ScalePreset::Quarter.apply(7, 3), (1, 0));
        assert_eq!(ScalePreset::Half.apply(u32::MAX, 1), (u32::MAX / 2, 0));
    }

    #[test]
    fn scale_parses_with_or_without_percent_sign() {
        assert_eq!("50".parse::<ScalePreset>().unwrap(), ScalePreset::Half);
        assert_eq!(" 75% ".parse::<ScalePreset>().unwrap(), ScalePreset::ThreeQuarters);
        assert!(matches!(
            "60%".parse::<ScalePreset>(),
            Err(ImageError::InvalidPreset(_))
        ));
    }

    #[test]
    fn quality_parses_names_and_values() {
        assert_eq!("85".parse::<QualityPreset>().unwrap(), QualityPreset::Medium);
        assert_eq!("Very Low".parse::<QualityPreset>().unwrap(), QualityPreset::VeryLow);
        assert_eq!("very-low".parse::<QualityPreset>().unwrap(), QualityPreset::VeryLow);
        assert_eq!("HIGH".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        assert!("90".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn labels_match_selector_text() {
        let scales: Vec<_> = ScalePreset::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(scales, ["100%", "75%", "50%", "25%"]);

        let qualities: Vec<_> = QualityPreset::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(qualities, ["High (95)", "Medium (85)", "Low (70)", "Very Low (50)"]);
    }
}
