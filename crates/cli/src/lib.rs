pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use encore_core::config::{AppConfig, LoadOptions};

use commands::notify::NotifyArgs;

#[derive(Debug, Parser)]
#[command(
    name = "encore",
    about = "Encore event notification CLI",
    long_about = "Run the event recommendation rules over the sample catalog and print one \
                  notification line per matched event.",
    after_help = "Examples:\n  encore notify\n  encore notify --budget --max-price 20\n  encore doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the recommendation queries and print notification lines")]
    Notify {
        #[arg(long, help = "Include the same-city query")]
        city: bool,
        #[arg(long, help = "Include the birthday-window query")]
        birthday: bool,
        #[arg(long, help = "Include the distance-ranked query")]
        nearby: bool,
        #[arg(long, help = "Include the price-ranked query")]
        budget: bool,
        #[arg(long, help = "Override the customer's home city")]
        home_city: Option<String>,
        #[arg(long, help = "Days before the next birthday an event must fall on")]
        days_before: Option<u32>,
        #[arg(long, help = "Manhattan-distance budget for the nearby query")]
        max_distance: Option<u32>,
        #[arg(long, help = "Price cap for the budget query, e.g. 20.00")]
        max_price: Option<String>,
        #[arg(long, help = "Cap on ranked query results")]
        limit: Option<usize>,
    },
    #[command(about = "List the sample event catalog")]
    Events,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, city reference data, and fixture integrity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging(config: &AppConfig) {
    use encore_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // A broken config is reported by the command itself; logging falls back
    // to the subscriber default in that case.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Notify {
            city,
            birthday,
            nearby,
            budget,
            home_city,
            days_before,
            max_distance,
            max_price,
            limit,
        } => commands::notify::run(NotifyArgs {
            city,
            birthday,
            nearby,
            budget,
            home_city,
            days_before,
            max_distance,
            max_price,
            limit,
        }),
        Command::Events => {
            commands::CommandResult { exit_code: 0, output: commands::events::run() }
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
