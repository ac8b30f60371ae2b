mod analysis;
mod batch_io;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::ReviewPipeline;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::store::{PgResultStore, StoreSink};

/// Extracts per-feature sentiment from product reviews with an LLM and stores the results.
#[derive(Parser, Debug)]
#[command(name = "review-sentiment", version, about)]
struct Cli {
    #[arg(long, value_name = "PATH", default_value = "input/reviews.txt", help = "Reviews file, one review per line")]
    input: PathBuf,

    #[arg(long, value_name = "PATH", default_value = "output/output.txt", help = "Output log, overwritten each run")]
    output: PathBuf,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging (prompts and raw model output)")]
    verbose: bool,

    #[arg(short = 'q', long, conflicts_with = "verbose", help = "Only log errors")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &str {
        match (&self.log_level, self.verbose, self.quiet) {
            (Some(level), _, _) => level.as_str(),
            (None, true, _) => "debug",
            (None, _, true) => "error",
            _ => "info",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on a missing credential)
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), cli.log_level()))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting review-sentiment v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let store = PgResultStore::new(create_pool(&config.database_url)?, config.store_table.clone());
    if let Err(e) = store.ensure_schema().await {
        warn!("Could not prepare store table, results may not be persisted: {e}");
    }

    let reviews = batch_io::read_reviews(&cli.input).await?;

    let pipeline = ReviewPipeline::new(
        Arc::new(llm),
        StoreSink::new(Arc::new(store)),
        config.sentiment_validation,
    );
    let report = pipeline.run(&reviews).await;
    if !report.failures.is_empty() {
        let lines: Vec<usize> = report.failures.iter().map(|f| f.line).collect();
        warn!("Reviews on lines {lines:?} produced no result");
    }

    batch_io::write_output_log(&cli.output, &report.results).await?;

    Ok(())
}
