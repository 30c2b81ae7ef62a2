use std::io;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    colored::control::set_override(commands::summary_colors(cli.color, &io::stderr()));

    let result = commands::run_command(&cli);
    if let Err(err) = &result {
        eprintln!("{} {err:#}", "error:".red().bold());
    }
    ExitCode::from(commands::exit_status(&result))
}
