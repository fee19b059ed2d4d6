//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转码链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧（`Session`）可按分支匹配，
//! 映射为界面上的状态文案。

/// 图片转码统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// 剪贴板中没有图片，或读取失败。
    #[error("no image in clipboard")]
    NoImage,

    /// 尚未加载源图片。
    #[error("no source image loaded")]
    NoSource,

    /// 缩放后宽或高为 0。
    #[error("scaling {width}x{height} to {percent}% collapses the image to {target_width}x{target_height}")]
    DegenerateSize {
        width: u32,
        height: u32,
        percent: u8,
        target_width: u32,
        target_height: u32,
    },

    /// 刚编码出的 JPEG 无法解码回来（内部不变量被破坏）。
    #[error("encoded output failed to decode: {0}")]
    EncodeRoundTripFailed(String),

    /// 还没有处理结果可供写回剪贴板。
    #[error("no processed image to copy")]
    NoResult,

    /// 位图尺寸为 0，或像素缓冲长度与尺寸不符。
    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    #[error("resource limit exceeded: {0}")]
    ResourceLimit(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("invalid preset: {0}")]
    InvalidPreset(String),

    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),
}
