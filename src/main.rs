use clap::Parser;
use std::io;
use std::path::PathBuf;
use stockbroker::modes::{run_batch, run_interactive, spawn_stdin_reader};
use stockbroker::{
    BrokerConfig, CliError, CommandProcessor, StockCodeRegistry, TradeBookStore, TradeValidator,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate and record buy/sell stock orders
///
/// With COMMANDS_FILE, runs every command in the file (batch mode).
/// Without it, reads commands from a `$ ` prompt until `exit` or Ctrl+C.
///
/// Command format: [buy|sell] [STOCKCODE] [PRICE] [VOLUME], e.g. `buy AAPL 150.00 100`
#[derive(Debug, Parser)]
#[command(name = "stockbroker", version, about)]
struct Cli {
    /// File with one command per line
    commands_file: Option<PathBuf>,

    /// Stock code list (overrides STOCKCODE_FILE)
    #[arg(long, value_name = "PATH")]
    stock_codes: Option<PathBuf>,

    /// Trade book file (overrides ORDERS_FILE)
    #[arg(long, value_name = "PATH")]
    orders: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only command results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockbroker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = BrokerConfig::from_env().with_overrides(cli.stock_codes, cli.orders);
    tracing::debug!("Using {:?}", config);

    let registry = StockCodeRegistry::load(&config.stock_codes_path);
    if registry.is_degraded() {
        println!(
            "Warning: Stock code file '{}' not found.",
            config.stock_codes_path.display()
        );
    }

    let store = TradeBookStore::open(&config.orders_path).map_err(|e| {
        tracing::error!("Cannot open trade book: {}", e);
        e
    })?;

    let mut processor = CommandProcessor::new(TradeValidator::new(registry), store);
    let mut stdout = io::stdout();

    match cli.commands_file {
        Some(path) => {
            run_batch(&mut processor, &path, &mut stdout)?;
        }
        None => {
            let mut lines = spawn_stdin_reader();
            run_interactive(
                &mut processor,
                &mut lines,
                &mut stdout,
                tokio::signal::ctrl_c(),
            )
            .await?;
        }
    }

    Ok(())
}
