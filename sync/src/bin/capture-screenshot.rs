//! Single screenshot capture.
//!
//! Captures one product's screenshot via the Microlink API, downloads the
//! resulting image into the thumbnail directory, and prints the capture
//! result as JSON.

use prodlab_sync::{screenshot, Config};
use std::env;
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

    let mut args = env::args().skip(1);
    let (product_id, product_url) = match (args.next(), args.next()) {
        (Some(id), Some(url)) => (id, url),
        _ => {
            eprintln!("Usage: cargo run --bin capture-screenshot <PRODUCT_ID> <PRODUCT_URL>");
            std::process::exit(1);
        }
    };

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let http = reqwest::Client::new();
    let capture =
        screenshot::capture_one(&http, &config.microlink_api_url, &product_id, &product_url)
            .await?;

    // Pull the rendered image down next to the other thumbnails
    let bytes = http
        .get(&capture.screenshot_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    tokio::fs::create_dir_all(&config.thumbnail_dir).await?;
    let filepath = config.thumbnail_dir.join(format!("{product_id}.png"));
    tokio::fs::write(&filepath, &bytes).await?;

    tracing::info!("screenshot saved: {}", filepath.display());
    println!("{}", serde_json::to_string_pretty(&capture)?);

    Ok(())
}
