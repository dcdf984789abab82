use std::io::Write;

use chrono::Utc;
use colored::{Color, Colorize as _};
use env_logger::{Builder, Env, Target};
use log::Level;

/// Sets up stderr logging; `verbosity` moves the default level up (positive) or down.
pub fn init(verbosity: i8) {
    let mut builder = Builder::new();

    builder.target(Target::Stderr);
    builder.parse_env(Env::default().default_filter_or(default_filter(verbosity)));

    builder.format(|f, record| {
        let time = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string().dimmed();
        let color = color_by_level(record.level());
        let level = level_letter(record.level()).color(color);
        let target = record.target().dimmed();
        let message = record.args().to_string().color(color);

        writeln!(f, "{time} [{level}@{target}] {message}")
    });

    builder.init();
}

fn default_filter(verbosity: i8) -> &'static str {
    const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
    let base: i8 = if cfg!(debug_assertions) { 4 } else { 3 };
    let index = base.saturating_add(verbosity).clamp(0, 5);
    LEVELS[usize::try_from(index).unwrap_or_default()]
}

const fn color_by_level(level: Level) -> Color {
    match level {
        Level::Trace => Color::Magenta,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

const fn level_letter(level: Level) -> &'static str {
    match level {
        Level::Trace => "T",
        Level::Debug => "D",
        Level::Info => "I",
        Level::Warn => "W",
        Level::Error => "E",
    }
}
