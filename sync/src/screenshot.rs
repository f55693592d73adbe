//! Screenshot capture against third-party image APIs.
//!
//! Two flavors, both best-effort and out of the catalog's correctness
//! path:
//!
//! - [`capture_all`]: batch process every product, fetch a rendered PNG
//!   of its live URL, save it locally, and write the local thumbnail
//!   path back onto the product document. One failure moves on to the
//!   next product.
//! - [`capture_one`]: single synchronous capture via the Microlink API,
//!   returning a remote image URL rather than a local file.

use crate::collections;
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::store::DocumentStore;
use prodlab_core::Product;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for a batch capture run.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Base URL of the screenshot API
    pub api_url: String,
    /// Directory where thumbnails are written
    pub thumbnail_dir: PathBuf,
    /// Delay between requests, to avoid rate limiting
    pub delay: Duration,
}

impl From<&Config> for CaptureConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.screenshot_api_url.clone(),
            thumbnail_dir: config.thumbnail_dir.clone(),
            delay: Duration::from_millis(config.capture_delay_ms),
        }
    }
}

/// Counts from a completed batch capture run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Build the capture request URL for one target page.
///
/// Fixed render parameters: 1280x720 viewport, PNG, with ads, cookie
/// banners, and trackers blocked.
fn capture_url(api_base: &str, target: &str) -> Result<reqwest::Url> {
    let mut url =
        reqwest::Url::parse(api_base).map_err(|e| SyncError::Capture(e.to_string()))?;

    url.query_pairs_mut()
        .append_pair("url", target)
        .append_pair("viewport_width", "1280")
        .append_pair("viewport_height", "720")
        .append_pair("device_scale_factor", "1")
        .append_pair("format", "png")
        .append_pair("block_ads", "true")
        .append_pair("block_cookie_banners", "true")
        .append_pair("block_trackers", "true");

    Ok(url)
}

/// Capture a screenshot for every product in the store.
///
/// Each successful capture writes `{thumbnail_dir}/{id}.png` and upserts
/// the product with the local `/thumbnails/{id}.png` path and a capture
/// timestamp. Failures are logged and counted; processing continues.
pub async fn capture_all<S: DocumentStore>(
    store: &S,
    http: &reqwest::Client,
    config: &CaptureConfig,
) -> Result<CaptureSummary> {
    let snapshot = store.get_all(collections::PRODUCTS).await?;
    if snapshot.is_empty() {
        tracing::warn!("no products found, nothing to capture");
        return Ok(CaptureSummary::default());
    }

    tracing::info!("found {} products", snapshot.len());
    tokio::fs::create_dir_all(&config.thumbnail_dir).await?;

    let mut summary = CaptureSummary::default();

    for doc in &snapshot {
        let product = match Product::from_fields(&doc.id, doc.fields.clone()) {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!("skipping malformed product document {}: {e}", doc.id);
                summary.failed += 1;
                continue;
            }
        };

        tracing::info!("capturing screenshot for {} ({})", product.name, product.url);

        match capture_product(http, config, &product).await {
            Ok(thumbnail_path) => {
                let mut updated = product.clone();
                updated.thumbnail = Some(thumbnail_path);
                updated.last_screenshot_update = Some(chrono::Utc::now().to_rfc3339());

                match store
                    .upsert(collections::PRODUCTS, &updated.id, updated.to_fields())
                    .await
                {
                    Ok(()) => summary.succeeded += 1,
                    Err(e) => {
                        tracing::error!("failed to record thumbnail for {}: {e}", updated.id);
                        summary.failed += 1;
                    }
                }
            }
            Err(e) => {
                tracing::error!("screenshot failed for {}: {e}", product.url);
                summary.failed += 1;
            }
        }

        tokio::time::sleep(config.delay).await;
    }

    Ok(summary)
}

/// Fetch and save one product's screenshot, returning the local path.
async fn capture_product(
    http: &reqwest::Client,
    config: &CaptureConfig,
    product: &Product,
) -> Result<String> {
    let url = capture_url(&config.api_url, &product.url)?;

    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(SyncError::Capture(format!(
            "download failed ({}) for {}",
            response.status(),
            product.url
        )));
    }

    let bytes = response.bytes().await?;
    let filename = format!("{}.png", product.id);
    tokio::fs::write(config.thumbnail_dir.join(&filename), &bytes).await?;

    tracing::info!("saved {filename} ({:.1} KB)", bytes.len() as f64 / 1024.0);
    Ok(format!("/thumbnails/{filename}"))
}

#[derive(Debug, Deserialize)]
struct MicrolinkResponse {
    status: String,
    #[serde(default)]
    data: Option<MicrolinkData>,
}

#[derive(Debug, Deserialize)]
struct MicrolinkData {
    #[serde(default)]
    screenshot: Option<MicrolinkScreenshot>,
}

#[derive(Debug, Deserialize)]
struct MicrolinkScreenshot {
    url: String,
}

/// Result of a single capture: a remote image URL plus the local path it
/// is intended to land at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleCapture {
    pub screenshot_url: String,
    pub thumbnail_path: String,
    pub timestamp: String,
}

/// Capture one product's screenshot via the Microlink API.
pub async fn capture_one(
    http: &reqwest::Client,
    api_base: &str,
    product_id: &str,
    product_url: &str,
) -> Result<SingleCapture> {
    let mut url =
        reqwest::Url::parse(api_base).map_err(|e| SyncError::Capture(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("url", product_url)
        .append_pair("screenshot", "true")
        .append_pair("meta", "false");

    let response = http.get(url).send().await?;
    let body: MicrolinkResponse = response.json().await?;

    let screenshot_url = screenshot_url_from(body)?;

    Ok(SingleCapture {
        screenshot_url,
        thumbnail_path: format!("/thumbnails/{product_id}.png"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

fn screenshot_url_from(body: MicrolinkResponse) -> Result<String> {
    if body.status != "success" {
        return Err(SyncError::Capture(format!(
            "capture request returned status {}",
            body.status
        )));
    }

    body.data
        .and_then(|data| data.screenshot)
        .map(|shot| shot.url)
        .ok_or_else(|| SyncError::Capture("response carried no screenshot url".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_url_encodes_target_and_render_params() {
        let url = capture_url(
            "https://api.screenshotone.com/take",
            "https://example.com/neostream?tab=1",
        )
        .unwrap();

        let s = url.as_str();
        assert!(s.starts_with("https://api.screenshotone.com/take?"));
        assert!(s.contains("url=https%3A%2F%2Fexample.com%2Fneostream%3Ftab%3D1"));
        assert!(s.contains("viewport_width=1280"));
        assert!(s.contains("viewport_height=720"));
        assert!(s.contains("format=png"));
        assert!(s.contains("block_ads=true"));
    }

    #[test]
    fn capture_url_rejects_bad_base() {
        assert!(matches!(
            capture_url("not a url", "https://example.com"),
            Err(SyncError::Capture(_))
        ));
    }

    #[test]
    fn microlink_success_yields_screenshot_url() {
        let body: MicrolinkResponse = serde_json::from_str(
            r#"{
                "status": "success",
                "data": {
                    "screenshot": { "url": "https://cdn.microlink.io/abc.png" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            screenshot_url_from(body).unwrap(),
            "https://cdn.microlink.io/abc.png"
        );
    }

    #[test]
    fn microlink_failure_is_an_error() {
        let body: MicrolinkResponse =
            serde_json::from_str(r#"{"status": "fail"}"#).unwrap();

        assert!(matches!(
            screenshot_url_from(body),
            Err(SyncError::Capture(_))
        ));
    }

    #[test]
    fn microlink_success_without_screenshot_is_an_error() {
        let body: MicrolinkResponse =
            serde_json::from_str(r#"{"status": "success", "data": {}}"#).unwrap();

        assert!(matches!(
            screenshot_url_from(body),
            Err(SyncError::Capture(_))
        ));
    }
}
