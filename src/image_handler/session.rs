//! # 会话层（界面状态机）
//!
//! ## 设计思路
//!
//! `Transcoder` 本身无状态；“当前源图 / 当前结果 / 当前选中的预设 / 状态文案”
//! 都由 `Session` 持有，界面层只需调用按钮对应的方法并读取文案。
//!
//! 状态流转：
//!
//! ```text
//!            load ok                 apply ok
//!  Empty ─────────────► Loaded ─────────────────► Processed
//!    ▲                    ▲  ▲                      │  │
//!    │   load 失败         │  └────── load ok ──────┘  │ apply ok / copy
//!    └────────────────────┴───────── load 失败 ────────┘ (保持 Processed)
//! ```
//!
//! ## 实现思路
//!
//! - 加载成功会丢弃旧结果；加载失败清空一切，回到 `Empty`。
//! - 处理失败不改变状态，旧结果保留。
//! - 切换预设时若已有源图，立即重新处理。

use std::fmt;

use crate::clipboard::ClipboardPort;

use super::{
    ImageConfig, ImageError, QualityPreset, RasterImage, ScalePreset, TranscodeResult, Transcoder,
};

/// 会话状态。
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Loaded {
        source: RasterImage,
    },
    Processed {
        source: RasterImage,
        result: TranscodeResult,
    },
}

/// 不携带数据的状态标签，便于断言与展示。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Loaded,
    Processed,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Empty => SessionPhase::Empty,
            Self::Loaded { .. } => SessionPhase::Loaded,
            Self::Processed { .. } => SessionPhase::Processed,
        }
    }

    pub fn source(&self) -> Option<&RasterImage> {
        match self {
            Self::Empty => None,
            Self::Loaded { source } | Self::Processed { source, .. } => Some(source),
        }
    }

    pub fn result(&self) -> Option<&TranscodeResult> {
        match self {
            Self::Processed { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// 界面状态栏文案。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Loaded,
    NoImage,
    LoadFailed(String),
    Processed,
    NothingToProcess,
    ProcessFailed(String),
    Copied,
    NothingToCopy,
    CopyFailed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("Ready"),
            Self::Loaded => f.write_str("Image loaded successfully"),
            Self::NoImage => f.write_str("No image in clipboard"),
            Self::LoadFailed(detail) => write!(f, "Error loading image: {}", detail),
            Self::Processed => f.write_str("Image processed successfully"),
            Self::NothingToProcess => f.write_str("No image to process"),
            Self::ProcessFailed(detail) => write!(f, "Error processing image: {}", detail),
            Self::Copied => f.write_str("Image copied to clipboard"),
            Self::NothingToCopy => f.write_str("No image to copy"),
            Self::CopyFailed(detail) => write!(f, "Error copying image: {}", detail),
        }
    }
}

/// 单个界面会话。
///
/// # 示例
/// ```rust
/// use smol_paste::clipboard::MemoryClipboard;
/// use smol_paste::image_handler::{PlatformBitmap, Session, SessionPhase};
///
/// let clipboard = MemoryClipboard::with_image(PlatformBitmap::new(8, 8, vec![200; 8 * 8 * 4]));
/// let mut session = Session::new(clipboard);
///
/// session.load_from_clipboard();
/// assert_eq!(session.phase(), SessionPhase::Loaded);
///
/// session.apply();
/// assert_eq!(session.status().to_string(), "Image processed successfully");
/// ```
pub struct Session<C: ClipboardPort> {
    transcoder: Transcoder,
    clipboard: C,
    state: SessionState,
    scale: ScalePreset,
    quality: QualityPreset,
    status: Status,
}

impl<C: ClipboardPort> Session<C> {
    pub fn new(clipboard: C) -> Self {
        Self::with_config(clipboard, ImageConfig::default())
    }

    pub fn with_config(clipboard: C, config: ImageConfig) -> Self {
        let scale = config.default_scale;
        let quality = config.default_quality;
        Self {
            transcoder: Transcoder::new(config),
            clipboard,
            state: SessionState::Empty,
            scale,
            quality,
            status: Status::Ready,
        }
    }

    /// “从剪贴板加载”按钮。
    pub fn load_from_clipboard(&mut self) -> &Status {
        let read = self.clipboard.read_image();
        match self.transcoder.acquire(read) {
            Ok(source) => {
                self.state = SessionState::Loaded { source };
                self.status = Status::Loaded;
            }
            Err(err) => {
                self.state = SessionState::Empty;
                self.status = match err {
                    ImageError::NoImage => Status::NoImage,
                    other => Status::LoadFailed(other.to_string()),
                };
            }
        }
        &self.status
    }

    /// “应用”按钮：以当前预设重新处理源图。
    pub fn apply(&mut self) -> &Status {
        let outcome = self
            .transcoder
            .transform(self.state.source(), self.scale, self.quality);

        match outcome {
            Ok(result) => {
                let state = std::mem::take(&mut self.state);
                if let SessionState::Loaded { source } | SessionState::Processed { source, .. } =
                    state
                {
                    self.state = SessionState::Processed { source, result };
                }
                self.status = Status::Processed;
            }
            Err(ImageError::NoSource) => self.status = Status::NothingToProcess,
            Err(err) => {
                log::warn!("⚠️ 图片处理失败：{}", err);
                self.status = Status::ProcessFailed(err.to_string());
            }
        }
        &self.status
    }

    /// “复制到剪贴板”按钮。
    pub fn copy_to_clipboard(&mut self) -> &Status {
        let image = self.state.result().map(|result| &result.image);
        self.status = match self.transcoder.publish(&mut self.clipboard, image) {
            Ok(()) => Status::Copied,
            Err(ImageError::NoResult) => Status::NothingToCopy,
            Err(err) => Status::CopyFailed(err.to_string()),
        };
        &self.status
    }

    /// 切换缩放预设；已有源图时立即重新处理。
    pub fn select_scale(&mut self, scale: ScalePreset) -> &Status {
        self.scale = scale;
        self.reapply_if_loaded()
    }

    /// 切换质量预设；已有源图时立即重新处理。
    pub fn select_quality(&mut self, quality: QualityPreset) -> &Status {
        self.quality = quality;
        self.reapply_if_loaded()
    }

    fn reapply_if_loaded(&mut self) -> &Status {
        if self.state.source().is_some() {
            return self.apply();
        }
        &self.status
    }

    /// 统计文本；没有处理结果时为空字符串。
    pub fn stats_text(&self) -> String {
        self.state
            .result()
            .map(|result| result.stats.to_string())
            .unwrap_or_default()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn scale(&self) -> ScalePreset {
        self.scale
    }

    pub fn quality(&self) -> QualityPreset {
        self.quality
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::image_handler::PlatformBitmap;

    fn solid_bitmap(width: usize, height: usize) -> PlatformBitmap {
        PlatformBitmap::new(width, height, vec![180; width * height * 4])
    }

    #[test]
    fn starts_ready_and_empty() {
        let session = Session::new(MemoryClipboard::new());
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert_eq!(session.status().to_string(), "Ready");
        assert_eq!(session.stats_text(), "");
        assert_eq!(session.scale(), ScalePreset::Full);
        assert_eq!(session.quality(), QualityPreset::Medium);
    }

    #[test]
    fn apply_without_source_reports_nothing_to_process() {
        let mut session = Session::new(MemoryClipboard::new());
        assert_eq!(session.apply(), &Status::NothingToProcess);
        assert_eq!(session.status().to_string(), "No image to process");
    }

    #[test]
    fn failed_transform_keeps_previous_result() {
        let mut session = Session::new(MemoryClipboard::with_image(solid_bitmap(3, 3)));
        session.load_from_clipboard();
        session.select_scale(ScalePreset::Half);
        assert_eq!(session.phase(), SessionPhase::Processed);
        let before = session.stats_text();

        // 3 * 25% = 0
        let status = session.select_scale(ScalePreset::Quarter).clone();
        assert!(
            status.to_string().starts_with("Error processing image: "),
            "{status}"
        );
        assert_eq!(session.phase(), SessionPhase::Processed);
        assert_eq!(session.stats_text(), before);
    }

    #[test]
    fn load_discards_previous_result() {
        let mut session = Session::new(MemoryClipboard::with_image(solid_bitmap(8, 8)));
        session.load_from_clipboard();
        session.apply();
        assert_eq!(session.phase(), SessionPhase::Processed);

        session.load_from_clipboard();
        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert_eq!(session.stats_text(), "");
        assert_eq!(session.copy_to_clipboard(), &Status::NothingToCopy);
    }

    #[test]
    fn read_failure_resets_to_empty() {
        let mut session = Session::new(MemoryClipboard::with_image(solid_bitmap(8, 8)));
        session.load_from_clipboard();
        session.clipboard_mut().fail_reads("clipboard busy");

        assert_eq!(session.load_from_clipboard(), &Status::NoImage);
        assert_eq!(session.phase(), SessionPhase::Empty);
    }

    #[test]
    fn oversized_image_reports_load_error() {
        let config = ImageConfig {
            max_decoded_pixels: 10,
            ..ImageConfig::default()
        };
        let mut session =
            Session::with_config(MemoryClipboard::with_image(solid_bitmap(8, 8)), config);

        let status = session.load_from_clipboard().to_string();
        assert!(status.starts_with("Error loading image: "), "{status}");
        assert_eq!(session.phase(), SessionPhase::Empty);
    }

    #[test]
    fn selecting_preset_without_source_only_records_choice() {
        let mut session = Session::new(MemoryClipboard::new());
        session.select_quality(QualityPreset::Low);
        assert_eq!(session.quality(), QualityPreset::Low);
        assert_eq!(session.status(), &Status::Ready);
    }

    #[test]
    fn copy_failure_is_reported() {
        let mut session = Session::new(MemoryClipboard::with_image(solid_bitmap(4, 4)));
        session.load_from_clipboard();
        session.apply();
        session.clipboard_mut().fail_writes("no owner");

        let status = session.copy_to_clipboard().to_string();
        assert_eq!(status, "Error copying image: clipboard error: no owner");
        assert_eq!(session.phase(), SessionPhase::Processed);
    }
}
