use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::influx::client::InfluxClient;
use extractor::{
    config::load_config,
    executor::{query_database, query_database_at},
    window::{DeltaTime, construct_query_endpoints, parse_query_time},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "extractor",
    version = "0.1.0",
    about = "Time-series database extraction tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            config,
            query_time,
            limit,
            output,
        } => {
            let app = load_config(&config)?;
            let client = InfluxClient::from_config_file(&app.connection).await?;

            let table = match query_time {
                Some(ts) => query_database_at(&client, &ts, &app.query).await?,
                // No explicit base time: query around the current local time,
                // letting the configured tz_offset place the window.
                None => {
                    let now = chrono::Local::now().naive_local();
                    query_database(&client, now, &app.query).await?
                }
            };

            match output {
                Some(path) => output::write_json(&table, &path)?,
                None => output::print_table(&table.head(limit), table.shape().0),
            }
        }
        Commands::TestConn { connection } => {
            let client = InfluxClient::from_config_file(&connection).await?;
            info!(
                "Connection to {} verified",
                client.settings().url
            );
        }
        Commands::Window {
            query_time,
            start,
            end,
            tz_offset,
            time_format,
        } => {
            let delta_start: DeltaTime = start.parse().map_err(CliError::InvalidDelta)?;
            let delta_end: DeltaTime = end.parse().map_err(CliError::InvalidDelta)?;
            let base = parse_query_time(&query_time, &time_format)?;

            let (window_start, window_end) =
                construct_query_endpoints(base, delta_start, delta_end, tz_offset, &time_format);
            println!("start: {window_start}");
            println!("end:   {window_end}");
        }
    }

    Ok(())
}
