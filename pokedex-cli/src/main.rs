//! Pokedex command-line browser
//!
//! Loads the first page of the catalog, then reads commands from stdin.
//!
//! Usage:
//!   pokedex --page-size 10
//!   echo "search pikachu" | pokedex --json

use anyhow::{Context, Result};
use clap::Parser;
use pokedex_cli::{execute, render_json, render_text, AppConfig, Command, HELP};
use pokedex_client::{CatalogClient, PokeApiClient};
use pokedex_store::{FetchOutcome, Pokedex};
use pokedex_types::PageDirection;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokedex catalog from the terminal")]
struct Args {
    /// Catalog API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Records per page
    #[arg(long)]
    page_size: Option<usize>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .with_overrides(args.base_url.clone(), args.page_size);
    config.validate()?;

    let client = PokeApiClient::new(config.api.clone()).context("Failed to create catalog client")?;
    info!(
        "Using {} catalog at {}",
        client.provider_name(),
        config.api.base_url
    );
    let pokedex = Pokedex::new(Arc::new(client), config.store.clone());

    let outcome = pokedex.fetch_page(PageDirection::Initial).await;
    pokedex.wait_for_enrichment().await;
    report(&outcome);
    show(&pokedex, args.json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        debug!("Command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => show(&pokedex, args.json)?,
            _ => {
                if let Some(outcome) = execute(&pokedex, &command).await {
                    report(&outcome);
                }
                show(&pokedex, args.json)?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    match EnvFilter::try_from_default_env() {
        Ok(filter) => builder.with_env_filter(filter).init(),
        Err(_) => {
            let level = if verbose { Level::DEBUG } else { Level::INFO };
            builder.with_max_level(level).init();
        }
    }
}

fn show(pokedex: &Pokedex, json: bool) -> Result<()> {
    let state = pokedex.state();
    if json {
        println!("{}", render_json(&state).context("Failed to encode records")?);
    } else {
        print!("{}", render_text(&state));
    }
    Ok(())
}

fn report(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Completed { count } => debug!("Loaded {} records", count),
        FetchOutcome::NotFound => eprintln!("No match."),
        FetchOutcome::Skipped(reason) => debug!("Request skipped: {:?}", reason),
        FetchOutcome::Failed(e) => warn!("Load failed: {}", e),
        FetchOutcome::Stale => debug!("Result superseded"),
    }
}
