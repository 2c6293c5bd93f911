use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bday", version, about = "Terminal birthday countdown")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save a name and birth date
    Set {
        /// Birth date in YYYY-MM-DD format
        date: String,
        /// Optional display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the current countdown and exit
    Show,
    /// Print today's quote
    Quote,
    /// Clear the saved profile
    Reset,
    /// Launch the interactive TUI
    Tui,
}
