//! # 图片转码模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将“剪贴板位图归一 → 重采样 → 去透明 → 有损编码 → 统计 → 写回剪贴板”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：控制台输入 / 输出适配（薄封装）
//! - `session`：承载界面状态机（`Empty / Loaded / Processed`）
//! - `handler`：`Transcoder` 编排整条转码流水线
//! - `pipeline`：编码、重采样、去透明等单阶段实现
//! - `clipboard_writer`：将结果写入剪贴板
//! - `config/error/source/raster/stats`：配置、错误、数据模型
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 控制台输入
//!    ↓
//! commands.rs（命令解析）
//!    ↓
//! session.rs（状态机 + 状态文案）
//!    ↓
//! handler.rs（acquire / transform + 阶段耗时日志）
//!    ├─ pipeline.rs（PNG 基线 + Lanczos3 + 去透明 + JPEG + 回解码）
//!    └─ clipboard_writer.rs（publish）
//!    ↓
//! Status / 统计文本 返回给界面
//! ```

pub mod commands;
mod clipboard_writer;
mod config;
mod error;
mod handler;
mod pipeline;
mod raster;
mod session;
mod source;
mod stats;

pub use commands::{CommandOutcome, UiCommand};
pub use config::{ImageConfig, QualityPreset, ScalePreset};
pub use error::ImageError;
pub use handler::Transcoder;
pub use pipeline::flatten_alpha;
pub use raster::{ColorMode, RasterImage};
pub use session::{Session, SessionPhase, SessionState, Status};
pub use source::{ClipboardRead, PlatformBitmap};
pub use stats::{TranscodeResult, TranscodeStats, reduction_percent};
