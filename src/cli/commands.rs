use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "daybook",
    about = concat!(
        "daybook v",
        env!("CARGO_PKG_VERSION"),
        " - habits, tasks and a pomodoro in your terminal"
    ),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the lists, the rollover marker and config.toml
    #[arg(short = 'd', long = "data-dir", global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Override the configured log level (trace|debug|info|warn|error|off)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the habit list
    Habits,
    /// Print the task list
    Tasks,
    /// Run the daily rollover now, even if it already ran today
    Rollover,
}
