use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use reminder_core::ListOrder;

#[derive(Parser, Debug)]
#[command(name = "cook-reminder", version, about = "Remember when you last cooked each dish")]
pub struct CliArgs {
    /// Config file; defaults to $HOME/.config/cook-reminder/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file for this run only
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a dish cooked right now
    Add { name: String },
    /// Mark a dish as cooked again right now
    Cooked { id: i64 },
    /// Rename a dish
    Rename { id: i64, name: String },
    /// Delete one dish
    Delete { id: i64 },
    /// Delete every dish
    Clear,
    /// Show dishes grouped by day
    List(ListArgs),
    /// Sleep tracking
    #[command(subcommand)]
    Sleep(SleepCommand),
}

#[derive(Subcommand, Debug)]
pub enum SleepCommand {
    /// Start tracking tonight
    Start,
    /// Stop tracking and print the finished night
    Stop,
    /// Rate a night from 0 to 5
    Rate { id: i64, quality: i64 },
    /// Show nights grouped by day
    List(ListArgs),
    /// Delete every night
    Clear,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Day order; falls back to the configured default
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for ListOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => ListOrder::Ascending,
            OrderArg::Desc => ListOrder::Descending,
        }
    }
}
