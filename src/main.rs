mod cli;
mod config;
mod dates;
mod engine;
mod error;
mod ingest;
mod report;
mod types;
mod validate;

use crate::error::BagtagError;
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, BagtagError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Badges(cmd) => {
            let rounds = ingest::load_rounds(&cmd.data, &ingest::LoadOptions::default())?;
            let document = config::load_badges(&cmd.badges)?;
            let results =
                engine::evaluate(&rounds, &cmd.player, &document.badges, &document.defaults);
            let badge_report = types::report::BadgeReport::new(cmd.player.clone(), results);
            let rendered = report::render(&badge_report, output_format(&cmd.format))?;
            println!("{rendered}");

            if rounds
                .iter()
                .any(|round| !round.is_par_row() && round.player == cmd.player)
            {
                Ok(exit_code::SUCCESS)
            } else {
                eprintln!("warning: no complete rounds for player {}", cmd.player);
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Rating(cmd) => {
            let rounds = ingest::load_rounds(&cmd.data, &ingest::LoadOptions::default())?;
            let timeline = engine::rating_timeline(
                &rounds,
                &cmd.player,
                &config::EngineDefaults::default(),
            );
            let rendered = report::render_timeline(&timeline, output_format(&cmd.format))?;
            println!("{rendered}");

            if timeline.points.is_empty() {
                eprintln!("warning: no rated rounds for player {}", cmd.player);
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Records(cmd) => {
            let rounds = ingest::load_rounds(&cmd.data, &ingest::LoadOptions::default())?;
            match cmd.player {
                Some(player) => {
                    let bests = types::report::PersonalBests {
                        bests: engine::records::personal_bests(&rounds, &player),
                        player,
                    };
                    let rendered = report::render_bests(&bests, output_format(&cmd.format))?;
                    println!("{rendered}");
                    if bests.bests.is_empty() {
                        eprintln!("warning: no complete rounds for player {}", bests.player);
                        return Ok(exit_code::WARNINGS);
                    }
                }
                None => {
                    let records = engine::records::course_records(&rounds);
                    let rendered = report::render_records(&records, output_format(&cmd.format))?;
                    println!("{rendered}");
                    if records.is_empty() {
                        eprintln!("warning: no complete rounds in dataset");
                        return Ok(exit_code::WARNINGS);
                    }
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Players(cmd) => {
            let rounds = ingest::load_rounds(&cmd.data, &ingest::LoadOptions::default())?;
            let summaries =
                engine::player_summaries(&rounds, &config::EngineDefaults::default());
            if summaries.is_empty() {
                println!("players: none");
                return Ok(exit_code::WARNINGS);
            }
            for summary in &summaries {
                let rating = if summary.rating > 0.0 {
                    let movement = summary
                        .movement
                        .map(|diff| format!(" ({diff:+.2})"))
                        .unwrap_or_default();
                    format!("rating {:.2}{movement}", summary.rating)
                } else {
                    "rating n/a".to_string()
                };
                println!(
                    "{}: {} complete rounds, {} aces, {rating}",
                    summary.player, summary.rounds, summary.aces
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let options = ingest::LoadOptions {
                filter_complete: false,
                ..ingest::LoadOptions::default()
            };
            let rounds = ingest::load_rounds(&cmd.data, &options)?;
            let findings = validate::dataset_findings(&rounds);

            if findings.is_empty() {
                println!("validate: no findings");
                return Ok(exit_code::SUCCESS);
            }
            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.title);
                println!("  {}", finding.body);
            }
            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
