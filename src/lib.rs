//! # smol-paste — 剪贴板图片瘦身工具库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 前端 (控制台 / 任意 GUI)                   │
//! │                                                          │
//! │   load ── apply ── copy ── scale <pct> ── quality <lvl>  │
//! │       ↕  (UiCommand → Session → Status + 统计文本)        │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            核心 (Rust)                            │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ clipboard ── ClipboardPort (arboard / 内存实现)       │
//! │  │                                                       │
//! │  └─ image_handler                                        │
//! │      ├─ session    Empty / Loaded / Processed 状态机      │
//! │      ├─ handler    Transcoder: acquire / transform       │
//! │      ├─ pipeline   PNG 基线·Lanczos3·去透明·JPEG          │
//! │      └─ stats      尺寸 / 字节数 / 缩减百分比             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，`main` 的返回类型 |
//! | [`clipboard`] | 剪贴板读写边界，系统实现与内存实现 |
//! | [`image_handler`] | 转码流水线、预设、统计与会话状态机 |

pub mod clipboard;
pub mod error;
pub mod image_handler;
