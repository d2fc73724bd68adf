use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coastcast::api::AppState;
use coastcast::{CoastcastConfig, CoastcastError, ReportOptions, ReportService, logging, render, web};
use tracing::{debug, info};

/// Coastal conditions reporter: weather, air quality, ocean currents and beach suitability
#[derive(Parser, Debug)]
#[command(name = "coastcast", version, about)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a conditions report for a city
    Report {
        /// City name (defaults to the configured city)
        #[arg(long)]
        city: Option<String>,

        /// Skip the ocean current section
        #[arg(long)]
        no_ocean: bool,

        /// Skip the forecast section
        #[arg(long)]
        no_forecast: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve reports over HTTP
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CoastcastError>() {
                Some(err) => eprintln!("Error: {}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CoastcastConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    debug!(
        config_file = ?cli.config.or_else(CoastcastConfig::get_config_path),
        log_level = %config.logging.level,
        timeout_seconds = config.http.timeout_seconds,
        "config_loaded"
    );

    match cli.command {
        Command::Report {
            city,
            no_ocean,
            no_forecast,
            json,
        } => {
            let service = ReportService::from_config(&config)?;
            let city = city.unwrap_or_else(|| config.defaults.city.clone());
            let options = ReportOptions {
                include_ocean: config.sections.ocean && !no_ocean,
                include_forecast: config.sections.forecast && !no_forecast,
            };

            let report = service.build(&city, options).await?;

            if json {
                let output = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report")?;
                println!("{output}");
            } else {
                print!("{}", render::render_text(&report));
            }
        }
        Command::Serve { port } => {
            let state = Arc::new(AppState {
                service: ReportService::from_config(&config)?,
                default_city: config.defaults.city.clone(),
                default_options: ReportOptions {
                    include_ocean: config.sections.ocean,
                    include_forecast: config.sections.forecast,
                },
            });
            let port = port.unwrap_or(config.web.port);
            info!("Starting dashboard API on port {}", port);
            web::run(port, state).await?;
        }
    }

    Ok(())
}
