//! askdb - ask a MongoDB collection questions in plain English.

use askdb::cli::Cli;
use askdb::config::Config;
use askdb::error::{AskdbError, Result};
use askdb::llm::{self, LlmProvider};
use askdb::{pipeline, store};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Load configuration file
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    // CLI provider override takes precedence over the config file
    let provider = cli
        .llm
        .as_deref()
        .unwrap_or(config.llm.provider.as_str())
        .parse::<LlmProvider>()
        .map_err(AskdbError::config)?;

    let llm_client = llm::create_client(provider, &config.llm)?;

    info!(
        "Connecting to {} ({}/{})",
        config.store.url, config.store.database, config.store.collection
    );
    let store_client = store::connect(&config.store).await?;

    let questions = cli.questions();
    let summary = pipeline::run(
        store_client.as_ref(),
        llm_client.as_ref(),
        &cli.input,
        &questions,
        &cli.output_dir,
    )
    .await?;

    info!(
        "Processed {} question(s), skipped {}, wrote {} result file(s)",
        summary.processed, summary.skipped, summary.files_written
    );

    Ok(())
}
