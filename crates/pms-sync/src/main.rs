use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, warn};
use pms_sync::{Settings, SyncError, SyncReport, sync_bookings};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "pms-sync", version, about = "Mirrors PMS bookings into the local database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch bookings and their rooms, room types and guests, then upsert them
    SyncBookings {
        /// Only sync bookings updated after this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        since: Option<NaiveDate>,
    },
}

async fn run(command: Command) -> Result<SyncReport, SyncError> {
    let settings = Settings::from_env()?;

    match command {
        Command::SyncBookings { since } => sync_bookings(&settings, since).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            warn!("{} of {} bookings failed to sync", report.failed, report.discovered);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
