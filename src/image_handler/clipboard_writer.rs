//! # 剪贴板写入
//!
//! ## 设计思路
//!
//! 所有耗时转换（灰度 / RGB 展开为 RGBA）都在调用剪贴板之前完成，
//! 写入本身只有一次 `write_image` 调用，不做自动重试：
//! 失败直接返回给界面层展示。

use crate::clipboard::ClipboardPort;

use super::source::PlatformBitmap;
use super::{ImageError, RasterImage, Transcoder};

impl Transcoder {
    /// 将处理结果写回剪贴板。
    ///
    /// `image` 为 `None`（尚无处理结果）时返回 `NoResult`。
    pub fn publish(
        &self,
        clipboard: &mut dyn ClipboardPort,
        image: Option<&RasterImage>,
    ) -> Result<(), ImageError> {
        let image = image.ok_or(ImageError::NoResult)?;
        let bitmap = Self::prepare_clipboard_bitmap(image);
        let (width, height) = (bitmap.width, bitmap.height);

        clipboard.write_image(bitmap).inspect_err(|err| {
            log::error!("❌ 写入剪贴板失败：{}", err);
        })?;

        log::info!("📋 已写入剪贴板：{}x{}", width, height);
        Ok(())
    }

    fn prepare_clipboard_bitmap(image: &RasterImage) -> PlatformBitmap {
        PlatformBitmap::new(
            image.width() as usize,
            image.height() as usize,
            image.to_rgba8_bytes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::image_handler::ColorMode;

    #[test]
    fn publish_without_result_fails() {
        let mut clipboard = MemoryClipboard::new();
        let result = Transcoder::default().publish(&mut clipboard, None);
        assert!(matches!(result, Err(ImageError::NoResult)));
        assert_eq!(clipboard.write_count(), 0);
    }

    #[test]
    fn publish_writes_rgba() {
        let mut clipboard = MemoryClipboard::new();
        let image = RasterImage::new(2, 1, ColorMode::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();

        Transcoder::default()
            .publish(&mut clipboard, Some(&image))
            .unwrap();

        let written = clipboard.contents().unwrap();
        assert_eq!((written.width, written.height), (2, 1));
        assert_eq!(written.rgba, vec![1, 2, 3, 255, 4, 5, 6, 255]);
        assert_eq!(clipboard.write_count(), 1);
    }

    #[test]
    fn publish_surfaces_platform_failure() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.fail_writes("owner gone");
        let image = RasterImage::new(1, 1, ColorMode::Grayscale, vec![9]).unwrap();

        let result = Transcoder::default().publish(&mut clipboard, Some(&image));
        assert!(matches!(result, Err(ImageError::Clipboard(_))));
    }
}
