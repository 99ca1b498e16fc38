use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{self, Config};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let start = match config.start_mode() {
        config::StartMode::First => "first".to_string(),
        config::StartMode::Index => "index".to_string(),
        config::StartMode::Slide(n) => n.to_string(),
    };
    let rows = [
        (
            "defaults.transition",
            config.transition().unwrap_or("slide").to_string(),
        ),
        ("defaults.start_mode", start),
        (
            "defaults.window",
            if config.windowed() { "windowed" } else { "fullscreen" }.to_string(),
        ),
        (
            "carousel.interval_ms",
            config.carousel_interval().as_millis().to_string(),
        ),
        (
            "carousel.resume_ms",
            config.carousel_resume_after().as_millis().to_string(),
        ),
    ];
    for (key, value) in rows {
        println!("  {:<22} {}", key.cyan(), value);
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}
