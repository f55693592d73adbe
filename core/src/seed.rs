//! Default product set used to bootstrap an empty catalog.

use crate::product::{Category, Product};

/// The fixed seed products.
///
/// Upserted by catalog initialization if and only if the one-shot read of
/// the `products` collection comes back empty.
pub fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: "product-1".into(),
            name: "NeoStream".into(),
            purpose: "Next-gen streaming experience for creative assets.".into(),
            category: Category::WebApp,
            url: "https://example.com/neostream".into(),
            accent: "#ff3b30".into(),
            created_date: "2026-01-15".into(),
            thumbnail: Some("/thumbnails/neostream.png".into()),
            screenshot_url: None,
            last_screenshot_update: None,
        },
        Product {
            id: "product-2".into(),
            name: "Zenith AI".into(),
            purpose: "Intelligent design companion for spatial computing.".into(),
            category: Category::AiTool,
            url: "https://example.com/zenith".into(),
            accent: "#34c759".into(),
            created_date: "2026-01-10".into(),
            thumbnail: Some("/thumbnails/zenithai.png".into()),
            screenshot_url: None,
            last_screenshot_update: None,
        },
        Product {
            id: "product-3".into(),
            name: "Lumina".into(),
            purpose: "High-end editorial platform for digital fashion.".into(),
            category: Category::Website,
            url: "https://example.com/lumina".into(),
            accent: "#af52de".into(),
            created_date: "2026-01-18".into(),
            thumbnail: Some("/thumbnails/lumina.png".into()),
            screenshot_url: None,
            last_screenshot_update: None,
        },
    ]
}
