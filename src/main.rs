//! # smol-paste — 应用入口
//!
//! 本文件仅负责日志初始化与控制台事件循环。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::io::{self, BufRead, Write};

use smol_paste::clipboard::SystemClipboard;
use smol_paste::error::AppError;
use smol_paste::image_handler::{CommandOutcome, Session, UiCommand, commands};

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("setup: begin");
    let clipboard = SystemClipboard::open().inspect_err(|err| {
        log::error!("setup: 无法打开系统剪贴板：{err}");
    })?;
    let mut session = Session::new(clipboard);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", commands::help_text())?;
    writeln!(stdout, "{}", commands::render(&session))?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<UiCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{}", err)?;
                continue;
            }
        };

        match commands::dispatch(&mut session, command) {
            CommandOutcome::Render(text) => writeln!(stdout, "{}", text)?,
            CommandOutcome::Exit => break,
        }
    }

    log::info!("exit");
    Ok(())
}
