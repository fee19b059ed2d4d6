//! # 剪贴板数据模型
//!
//! ## 设计思路
//!
//! 将“平台剪贴板交换的数据”和“流水线内部的图像”解耦：
//! - `ClipboardRead` 表示一次读取的三种结果（有图 / 无图 / 读取失败）
//! - `PlatformBitmap` 表示平台层交换的 RGBA 像素（与 `arboard::ImageData` 对齐）
//! - `RasterImage`（见 `raster.rs`）表示流水线内部的不可变位图

/// 一次剪贴板读取的结果。
#[derive(Debug, Clone)]
pub enum ClipboardRead {
    /// 剪贴板中有位图。
    Image(PlatformBitmap),
    /// 剪贴板中没有位图。
    Empty,
    /// 读取过程失败（附带平台错误描述，仅用于日志）。
    Failed(String),
}

/// 平台剪贴板位图：紧密排列的 RGBA8 像素。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformBitmap {
    /// 图像宽度（像素）。
    pub width: usize,
    /// 图像高度（像素）。
    pub height: usize,
    /// RGBA 字节数组（`width * height * 4`）。
    pub rgba: Vec<u8>,
}

impl PlatformBitmap {
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Self {
        Self { width, height, rgba }
    }

    /// 期望的字节长度；溢出时返回 `None`。
    pub(crate) fn expected_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(4))
    }
}
