use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tablemap::camera::Point;
use tablemap::config::DEFAULT_AVAILABILITY_ENDPOINT;
use tablemap::error::LoadError;
use tablemap::table::{AvailabilityQuery, AvailabilityResponse};
use tracing_subscriber::EnvFilter;

mod probe;

use probe::{PickCanvas, PickOutcome};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Failed(String),
}

#[derive(Parser, Debug)]
#[command(name = "tablemap-cli", about = "Table availability probe for the reservation table map")]
struct Cli {
    #[arg(long, env = "TABLEMAP_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, default_value = DEFAULT_AVAILABILITY_ENDPOINT)]
    endpoint: String,

    #[arg(long, env = "TABLEMAP_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the tables available for a date, time, and party size.
    Tables {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Resolve a click at canvas position (x, y) to a table.
    Pick {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long, default_value_t = 1000.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[arg(long)]
    date: String,
    #[arg(long)]
    time: String,
    #[arg(long)]
    guests: u32,
}

impl QueryArgs {
    fn into_query(self) -> AvailabilityQuery {
        AvailabilityQuery::new(self.date, self.time, self.guests)
    }
}

struct CliContext {
    client: reqwest::Client,
    url: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext {
        client: reqwest::Client::builder()
            .timeout(Duration::from_secs(cli.timeout_secs))
            .build()?,
        url: probe::availability_url(&cli.base_url, &cli.endpoint),
    };

    match cli.command {
        Command::Tables { query, json } => run_tables(&ctx, query.into_query(), json).await,
        Command::Pick { query, x, y, width, height } => {
            run_pick(&ctx, query.into_query(), Point::new(x, y), PickCanvas { width, height }).await
        }
    }
}

async fn run_tables(ctx: &CliContext, query: AvailabilityQuery, json: bool) -> Result<(), CliError> {
    let availability = fetch(ctx, &query).await?.into_availability()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&availability.tables)?);
        return Ok(());
    }
    if availability.tables.is_empty() {
        println!("{}", tablemap::config::DEFAULT_NO_TABLES_MESSAGE);
        return Ok(());
    }
    let guests = availability.guests.unwrap_or(query.guests);
    println!("{}", probe::summary_line(availability.tables.len(), guests));
    for table in &availability.tables {
        println!("{}", probe::table_row(table));
    }
    Ok(())
}

async fn run_pick(ctx: &CliContext, query: AvailabilityQuery, point: Point, canvas: PickCanvas) -> Result<(), CliError> {
    let result = fetch(ctx, &query).await;
    if let Err(LoadError::Transport(reason)) = &result {
        tracing::warn!(%reason, "availability request failed");
    }
    match probe::pick(query, result, canvas, point) {
        PickOutcome::Selected(summary) => {
            println!("{}", summary.field_value());
            tracing::info!(table = %summary.table_number, capacity = summary.capacity, "table selected");
            Ok(())
        }
        PickOutcome::Miss => {
            println!("no table at ({}, {})", point.x, point.y);
            Ok(())
        }
        PickOutcome::NoTables(message) => {
            println!("{message}");
            Ok(())
        }
        PickOutcome::Failed(message) => Err(CliError::Failed(message)),
    }
}

async fn fetch(ctx: &CliContext, query: &AvailabilityQuery) -> Result<AvailabilityResponse, LoadError> {
    tracing::debug!(url = %ctx.url, date = %query.date, time = %query.time, guests = query.guests, "fetching availability");
    let response = ctx
        .client
        .get(&ctx.url)
        .query(&query.params())
        .send()
        .await
        .map_err(|e| LoadError::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Transport(format!("HTTP {}", status.as_u16())));
    }
    let body = response.text().await.map_err(|e| LoadError::Transport(e.to_string()))?;
    AvailabilityResponse::from_json(&body)
}
