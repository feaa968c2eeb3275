//! Full-screen pomodoro timer.
//!
//! Environment:
//! - `POMODORO_TICK_MS`: tick cadence in milliseconds (default 1000)
//! - `POMODORO_NOTIFY`: set to `0` to disable desktop alerts
//! - `POMODORO_LOG`: file to write logs to, filtered by `RUST_LOG`

use anyhow::{Context, Result};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use once_cell::sync::OnceCell;
use pomodoro_widget::key::{self, Binding};
use pomodoro_widget::prelude::*;
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

static CONFIG: OnceCell<Config> = OnceCell::new();

struct App {
    timer: Pomodoro<DesktopNotifier>,
    quit: Binding,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let config = CONFIG.get().cloned().unwrap_or_default();
        let timer = pomodoro_new(config, DesktopNotifier::new());
        let cmd = timer.init();
        let quit = key::new_binding(vec![
            key::with_keys_str(&["q", "ctrl+c"]),
            key::with_help("q", "quit"),
        ]);
        (Self { timer, quit }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.quit.matches(key_msg) {
                return Some(quit());
            }
        }
        self.timer.update(msg)
    }

    fn view(&self) -> String {
        format!(
            "{}\n\n{}\n\n  {} {}\n",
            self.timer.title(),
            self.timer.view(),
            self.quit.help().key,
            self.quit.help().desc
        )
    }
}

fn config_from_env() -> Result<Config> {
    let mut config = Config::new();
    if let Ok(ms) = std::env::var("POMODORO_TICK_MS") {
        let ms: u64 = ms
            .parse()
            .with_context(|| format!("POMODORO_TICK_MS is not a number: {ms}"))?;
        config = config.with_tick_interval(Duration::from_millis(ms));
    }
    if let Ok(flag) = std::env::var("POMODORO_NOTIFY") {
        config = config.with_notifications(!matches!(flag.as_str(), "0" | "false" | "off"));
    }
    Ok(config)
}

fn init_logging() -> Result<()> {
    // The terminal belongs to the UI, so logs only go to a file
    let Ok(path) = std::env::var("POMODORO_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("cannot create log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let config = config_from_env()?;
    tracing::info!(?config, "starting pomodoro");
    let _ = CONFIG.set(config);

    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
