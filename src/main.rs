use tracing::info;
use tracing_subscriber::EnvFilter;

use yellowpages_scraper::config::{load_config, Config};
use yellowpages_scraper::crawler::PageFetcher;
use yellowpages_scraper::models::Result;
use yellowpages_scraper::pipeline::Pipeline;

use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    let directive = format!("yellowpages_scraper={}", config.logging.level)
        .parse()
        .unwrap_or_else(|_| "yellowpages_scraper=info".parse().unwrap());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tokio::fs::create_dir_all(&config.output.checkpoint_dir).await?;

    let pipeline = Pipeline::new(config, PageFetcher::new());

    // Ctrl+C leaves the latest checkpoint on disk; rerunning resumes.
    tokio::select! {
        result = pipeline.run() => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
