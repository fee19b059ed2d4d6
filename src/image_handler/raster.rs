//! # 不可变位图
//!
//! `RasterImage` 是流水线各阶段之间传递的值对象：宽、高、色彩模式与连续像素缓冲。
//! 构造时校验尺寸与缓冲长度，之后不再修改；每个变换阶段都产出新的实例，
//! 调用方可以安全地对比“处理前 / 处理后”。

use image::{DynamicImage, ExtendedColorType, GrayImage, RgbImage, RgbaImage};

use super::ImageError;

/// 像素色彩模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Grayscale,
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn channels(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    pub(crate) fn extended_color_type(self) -> ExtendedColorType {
        match self {
            Self::Grayscale => ExtendedColorType::L8,
            Self::Rgb => ExtendedColorType::Rgb8,
            Self::Rgba => ExtendedColorType::Rgba8,
        }
    }
}

/// 内存中的位图。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    mode: ColorMode,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// 校验后构造位图。
    ///
    /// 宽高必须大于 0，且 `pixels.len() == width * height * channels`。
    pub fn new(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidBitmap(format!(
                "image dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(mode.channels()))
            .ok_or_else(|| ImageError::ResourceLimit("image size overflows memory".to_string()))?;

        if pixels.len() != expected_len {
            return Err(ImageError::InvalidBitmap(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{} {:?}",
                pixels.len(),
                expected_len,
                width,
                height,
                mode
            )));
        }

        Ok(Self {
            width,
            height,
            mode,
            pixels,
        })
    }

    /// 从 `image` 解码结果转换。
    ///
    /// 8 位灰度 / RGB / RGBA 原样保留；其余类型归一到最接近的三种模式之一，
    /// 带透明通道的一律转为 RGBA。
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, ImageError> {
        let (width, height) = (image.width(), image.height());
        let (mode, pixels) = match image {
            DynamicImage::ImageLuma8(buf) => (ColorMode::Grayscale, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (ColorMode::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (ColorMode::Rgba, buf.into_raw()),
            other if other.color().has_alpha() => (ColorMode::Rgba, other.to_rgba8().into_raw()),
            other if !other.color().has_color() => (ColorMode::Grayscale, other.to_luma8().into_raw()),
            other => (ColorMode::Rgb, other.to_rgb8().into_raw()),
        };
        Self::new(width, height, mode, pixels)
    }

    /// 转换为 `image` 的动态图像（复制像素）。
    pub fn to_dynamic(&self) -> DynamicImage {
        let (w, h, buf) = (self.width, self.height, self.pixels.clone());
        // 构造时已校验长度，`from_raw` 不会失败
        match self.mode {
            ColorMode::Grayscale => GrayImage::from_raw(w, h, buf)
                .map_or_else(|| DynamicImage::new_luma8(w, h), DynamicImage::ImageLuma8),
            ColorMode::Rgb => RgbImage::from_raw(w, h, buf)
                .map_or_else(|| DynamicImage::new_rgb8(w, h), DynamicImage::ImageRgb8),
            ColorMode::Rgba => RgbaImage::from_raw(w, h, buf)
                .map_or_else(|| DynamicImage::new_rgba8(w, h), DynamicImage::ImageRgba8),
        }
    }

    /// 展开为紧密排列的 RGBA8（写剪贴板时使用）。
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        match self.mode {
            ColorMode::Rgba => self.pixels.clone(),
            ColorMode::Rgb => {
                let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
                for px in self.pixels.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                out
            }
            ColorMode::Grayscale => {
                let mut out = Vec::with_capacity(self.pixels.len() * 4);
                for &v in &self.pixels {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
                out
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn has_alpha(&self) -> bool {
        self.mode.has_alpha()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// 单个像素的通道切片；越界返回 `None`。
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.mode.channels();
        let offset = (y as usize * self.width as usize + x as usize) * channels;
        self.pixels.get(offset..offset + channels)
    }
}
