//! Batch screenshot capture.
//!
//! Reads every product from the store file, fetches a rendered screenshot
//! of each product's URL, saves it under the thumbnail directory, and
//! writes the local path back onto the product document.

use prodlab_sync::{screenshot, CaptureConfig, Config, FileStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prodlab_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("opening store at {}", config.store_path.display());
    let store = FileStore::open(&config.store_path).await?;

    let http = reqwest::Client::new();
    let summary = screenshot::capture_all(&store, &http, &CaptureConfig::from(&config)).await?;

    store.flush().await?;

    tracing::info!(
        "screenshot capture complete: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed
    );

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
