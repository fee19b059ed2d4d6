//! # 界面命令适配层
//!
//! ## 设计思路
//!
//! 仅做“输入 → 会话调用 → 输出文案”的薄封装，不包含业务逻辑。
//! 控制台前端每输入一行，就解析为一个 `UiCommand`，对应原界面上的
//! 一个按钮或一次预设选择。

use std::str::FromStr;

use crate::clipboard::ClipboardPort;

use super::{ImageError, QualityPreset, ScalePreset, Session};

/// 界面命令。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Load,
    Apply,
    Copy,
    Scale(ScalePreset),
    Quality(QualityPreset),
    Status,
    Help,
    Quit,
}

impl FromStr for UiCommand {
    type Err = ImageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match (verb.to_lowercase().as_str(), argument) {
            ("load", "") => Self::Load,
            ("apply", "") => Self::Apply,
            ("copy", "") => Self::Copy,
            ("status", "") => Self::Status,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            ("scale", value) => Self::Scale(value.parse()?),
            ("quality", value) => Self::Quality(value.parse()?),
            _ => {
                return Err(ImageError::UnknownCommand(line.to_string()));
            }
        };
        Ok(command)
    }
}

/// 帮助文本。
pub fn help_text() -> String {
    let scales: Vec<_> = ScalePreset::ALL.iter().map(|p| p.label()).collect();
    let qualities: Vec<_> = QualityPreset::ALL.iter().map(|p| p.label()).collect();
    format!(
        "Commands:\n  load             Load from Clipboard\n  apply            Apply Changes\n  copy             Copy to Clipboard\n  scale <preset>   Size Preset: {}\n  quality <preset> Quality Preset: {}\n  status           Show status and stats\n  quit             Exit",
        scales.join(", "),
        qualities.join(", ")
    )
}

/// 命令执行后的输出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// 需要展示给用户的文本（状态 + 统计）。
    Render(String),
    Exit,
}

/// 执行一条命令。
pub fn dispatch<C: ClipboardPort>(session: &mut Session<C>, command: UiCommand) -> CommandOutcome {
    match command {
        UiCommand::Load => {
            session.load_from_clipboard();
        }
        UiCommand::Apply => {
            session.apply();
        }
        UiCommand::Copy => {
            session.copy_to_clipboard();
        }
        UiCommand::Scale(scale) => {
            session.select_scale(scale);
        }
        UiCommand::Quality(quality) => {
            session.select_quality(quality);
        }
        UiCommand::Status => {}
        UiCommand::Help => return CommandOutcome::Render(help_text()),
        UiCommand::Quit => return CommandOutcome::Exit,
    }

    CommandOutcome::Render(render(session))
}

/// 状态栏 + 统计区。
pub fn render<C: ClipboardPort>(session: &Session<C>) -> String {
    let stats = session.stats_text();
    if stats.is_empty() {
        format!(
            "[{} | {}] {}",
            session.scale(),
            session.quality(),
            session.status()
        )
    } else {
        format!(
            "[{} | {}] {}\n{}",
            session.scale(),
            session.quality(),
            session.status(),
            stats
        )
    }
}
