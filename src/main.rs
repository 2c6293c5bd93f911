mod cli;
mod commands;
mod engine;
mod model;
mod quotes;
mod storage;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::Set { date, name } => commands::set(date, name),
        cli::Command::Show => commands::show(),
        cli::Command::Quote => commands::quote(),
        cli::Command::Reset => commands::reset(),
        cli::Command::Tui => commands::tui(),
    }
}
