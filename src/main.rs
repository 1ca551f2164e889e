mod config;
mod error;
mod models;
mod ui;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::config::{Config, default_config_path, load_config};
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/shopping-list/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("shopping-list");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 以追加模式打开数据目录下的日志文件
fn open_log_file(data_dir: &Path) -> anyhow::Result<(PathBuf, File)> {
    let log_path = data_dir.join("shopping-list.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("无法打开日志文件 {}", log_path.display()))?;
    Ok((log_path, file))
}

/// 日志写入文件，避免破坏终端界面；RUST_LOG 优先于配置
///
/// 日志文件不可用时不安装 logger，程序照常运行
fn init_logger(config: &Config) -> Option<PathBuf> {
    let opened = get_data_dir()
        .context("无法创建数据目录")
        .and_then(|dir| open_log_file(&dir));
    let (log_path, file) = match opened {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("警告: {:#}，本次运行不记录日志", e);
            return None;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .init();

    Some(log_path)
}

fn main() -> anyhow::Result<()> {
    // 加载配置（文件不存在时使用默认值）
    let config = match default_config_path() {
        Some(path) => load_config(&path).context("加载配置失败")?,
        None => Config::default(),
    };

    let log_path = init_logger(&config);
    log::info!("启动，配置: {:?}", config);

    // 创建应用状态
    let mut app = App::new(config);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("运行出错: {}", e);
        if let Some(log_path) = &log_path {
            eprintln!("日志见 {}", log_path.display());
        }
    }
    log::info!("退出，清单共 {} 项", app.list.len());

    result.map_err(Into::into)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press
                && ui::handle_key_event(app, key.code)
            {
                break;
            }
        }
    }
    Ok(())
}
