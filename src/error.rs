//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，由 `main` 返回，包住启动阶段的 `ImageError`
//! （如系统剪贴板无法打开）以及控制台读写产生的 I/O 错误。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` / `std::io::Error` 提供 `From` 转换，`main` 中直接 `?`。

use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片转码或剪贴板错误
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 控制台 I/O 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
