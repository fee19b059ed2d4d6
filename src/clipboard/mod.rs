//! 剪贴板访问模块
//!
//! # 设计思路
//!
//! 转码核心只依赖两个平台能力：“读取当前剪贴板位图”和“写入位图”。
//! 用 `ClipboardPort` trait 表达这条边界：
//! - **`SystemClipboard`**：基于 `arboard` 的系统剪贴板实现
//! - **`MemoryClipboard`**：进程内实现，用于测试与无桌面环境
//!
//! # 实现思路
//!
//! - 每次操作只调用一次平台读 / 写，不做重试，也不加锁。
//! - `SystemClipboard` 在启动时打开并在整个会话中持有 `arboard::Clipboard`：
//!   在 X11 等平台上写入的内容由持有者负责提供，过早释放会导致内容丢失。

use std::borrow::Cow;

use crate::image_handler::{ClipboardRead, ImageError, PlatformBitmap};

/// 剪贴板能力边界。
pub trait ClipboardPort {
    /// 读取当前剪贴板中的位图。
    fn read_image(&mut self) -> ClipboardRead;

    /// 将位图写入剪贴板。
    fn write_image(&mut self, bitmap: PlatformBitmap) -> Result<(), ImageError>;
}

/// 系统剪贴板（`arboard`）。
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// 打开系统剪贴板；无桌面环境等情况下返回 `ImageError::Clipboard`。
    pub fn open() -> Result<Self, ImageError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| ImageError::Clipboard(format!("cannot access clipboard: {}", e)))?;
        log::debug!("📋 已打开系统剪贴板");
        Ok(Self { inner })
    }
}

impl ClipboardPort for SystemClipboard {
    fn read_image(&mut self) -> ClipboardRead {
        match self.inner.get_image() {
            Ok(image_data) => ClipboardRead::Image(PlatformBitmap::new(
                image_data.width,
                image_data.height,
                image_data.bytes.into_owned(),
            )),
            Err(arboard::Error::ContentNotAvailable) => ClipboardRead::Empty,
            Err(err) => ClipboardRead::Failed(err.to_string()),
        }
    }

    fn write_image(&mut self, bitmap: PlatformBitmap) -> Result<(), ImageError> {
        let image_data = arboard::ImageData {
            width: bitmap.width,
            height: bitmap.height,
            bytes: Cow::Owned(bitmap.rgba),
        };

        self.inner
            .set_image(image_data)
            .map_err(|e| ImageError::Clipboard(format!("copy failed: {}", e)))
    }
}

/// 进程内剪贴板。
///
/// # 示例
/// ```rust
/// use smol_paste::clipboard::{ClipboardPort, MemoryClipboard};
/// use smol_paste::image_handler::{ClipboardRead, PlatformBitmap};
///
/// let mut clipboard = MemoryClipboard::with_image(PlatformBitmap::new(1, 1, vec![0, 0, 0, 255]));
/// assert!(matches!(clipboard.read_image(), ClipboardRead::Image(_)));
///
/// clipboard.clear();
/// assert!(matches!(clipboard.read_image(), ClipboardRead::Empty));
/// ```
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Option<PlatformBitmap>,
    read_failure: Option<String>,
    write_failure: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(bitmap: PlatformBitmap) -> Self {
        Self {
            content: Some(bitmap),
            ..Self::default()
        }
    }

    /// 模拟其他应用复制了一张图片。
    pub fn set_image(&mut self, bitmap: PlatformBitmap) {
        self.content = Some(bitmap);
    }

    /// 模拟其他应用复制了非图片内容。
    pub fn clear(&mut self) {
        self.content = None;
    }

    /// 之后的读取都报告失败。
    pub fn fail_reads(&mut self, detail: impl Into<String>) {
        self.read_failure = Some(detail.into());
    }

    /// 之后的写入都报告失败。
    pub fn fail_writes(&mut self, detail: impl Into<String>) {
        self.write_failure = Some(detail.into());
    }

    pub fn contents(&self) -> Option<&PlatformBitmap> {
        self.content.as_ref()
    }

    /// 成功写入的次数。
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl ClipboardPort for MemoryClipboard {
    fn read_image(&mut self) -> ClipboardRead {
        if let Some(detail) = &self.read_failure {
            return ClipboardRead::Failed(detail.clone());
        }
        match &self.content {
            Some(bitmap) => ClipboardRead::Image(bitmap.clone()),
            None => ClipboardRead::Empty,
        }
    }

    fn write_image(&mut self, bitmap: PlatformBitmap) -> Result<(), ImageError> {
        if let Some(detail) = &self.write_failure {
            return Err(ImageError::Clipboard(detail.clone()));
        }
        self.content = Some(bitmap);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_reports_read_failure() {
        let mut clipboard = MemoryClipboard::with_image(PlatformBitmap::new(1, 1, vec![0; 4]));
        clipboard.fail_reads("locked by another process");
        match clipboard.read_image() {
            ClipboardRead::Failed(detail) => assert_eq!(detail, "locked by another process"),
            other => panic!("unexpected read result: {other:?}"),
        }
    }

    #[test]
    fn memory_clipboard_write_replaces_content() {
        let mut clipboard = MemoryClipboard::new();
        assert!(matches!(clipboard.read_image(), ClipboardRead::Empty));

        let bitmap = PlatformBitmap::new(1, 1, vec![1, 2, 3, 255]);
        clipboard.write_image(bitmap.clone()).unwrap();
        assert_eq!(clipboard.contents(), Some(&bitmap));
        assert_eq!(clipboard.write_count(), 1);
    }
}
