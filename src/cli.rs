use crate::config::DEFAULT_BADGES_FILE;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bagtag",
    version,
    about = "Disc golf round stats, rolling ratings, and badge achievements"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Badges(BadgesCommand),
    Rating(RatingCommand),
    Records(RecordsCommand),
    Players(PlayersCommand),
    Validate(ValidateCommand),
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct BadgesCommand {
    /// Round dataset (delimited text with a header row)
    pub data: PathBuf,

    #[arg(short, long)]
    pub player: String,

    /// Badge definition document
    #[arg(short, long, default_value = DEFAULT_BADGES_FILE)]
    pub badges: PathBuf,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RatingCommand {
    pub data: PathBuf,

    #[arg(short, long)]
    pub player: String,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RecordsCommand {
    pub data: PathBuf,

    /// Show this player's personal bests instead of the league records
    #[arg(short, long)]
    pub player: Option<String>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct PlayersCommand {
    pub data: PathBuf,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub data: PathBuf,
}
