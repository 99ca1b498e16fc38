use std::io::{self, IsTerminal};

use clap::Parser;

mod app;
mod carousel;
mod chart;
mod cli;
mod commands;
mod config;
mod deck;
mod input;
mod logging;
mod navigation;
mod render;
mod theme;
mod watch;

use crate::cli::Cli;
use crate::logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();

    let use_color = !cli.no_color && io::stderr().is_terminal();
    if cli.no_color {
        colored::control::set_override(false);
    }
    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet).with_ansi(use_color);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    if let Err(error) = cli.run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
