mod display;
mod position;
mod tracker;
mod web;

use chrono::Local;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use crate::display::{DisplayPanel, MapView};
use crate::position::{HttpProvider, PositionError};
use crate::tracker::{Poller, Tracker};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "iss-tracker")]
#[command(about = "Track the International Space Station")]
struct Cli {
    /// YAML configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard and poll the upstream
    Serve,
    /// Fetch the current position once and print it
    Fetch,
    /// Poll the upstream and print every update
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracker = match build_tracker(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error creating upstream client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config, tracker).await,
        Commands::Fetch => fetch(&config, &tracker).await,
        Commands::Watch => watch(&config, tracker).await,
    }
}

fn build_tracker(config: &Config) -> Result<Tracker, PositionError> {
    let provider = HttpProvider::new(&config.upstream)?;
    Ok(Tracker::new(Arc::new(provider), MapView::new(&config.map)))
}

async fn serve(config: Config, tracker: Tracker) -> ExitCode {
    match web::run_server(config, tracker).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn fetch(config: &Config, tracker: &Tracker) -> ExitCode {
    match tracker.refresh().await {
        Ok(reading) => {
            let panel =
                DisplayPanel::build(Some(&reading), &Local, &config.display.time_format);
            print!("{}", panel.to_text());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error fetching ISS data: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn watch(config: &Config, tracker: Tracker) -> ExitCode {
    let mut updates = tracker.subscribe();
    let poller = Poller::start(tracker.clone(), config.poller.interval);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print_snapshot(config, &tracker);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.stop().await;
    ExitCode::SUCCESS
}

fn print_snapshot(config: &Config, tracker: &Tracker) {
    let snapshot = tracker.snapshot();
    let panel = DisplayPanel::build(
        snapshot.reading.as_ref(),
        &Local,
        &config.display.time_format,
    );

    println!("ISS TRACKER (update #{})", snapshot.revision);
    print!("{}", panel.to_text());
    if let Some(error) = snapshot.error {
        println!("  !! {}", error);
    }
    println!();
}
