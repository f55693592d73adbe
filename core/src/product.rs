//! Product types for catalog entries.

use crate::{error::Result, Error, ProductId};
use serde::{Deserialize, Serialize};

/// Category of a product.
///
/// The known set is `Website` / `Web App` / `AI Tool`, but the field is
/// open to extension: unknown strings are preserved as [`Category::Other`]
/// and round-trip through serialization unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Website,
    WebApp,
    AiTool,
    Other(String),
}

impl Category {
    /// The wire representation of this category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Website => "Website",
            Category::WebApp => "Web App",
            Category::AiTool => "AI Tool",
            Category::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Website" => Category::Website,
            "Web App" => Category::WebApp,
            "AI Tool" => Category::AiTool,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
///
/// The `id` is the stable identity key: assigned once at creation (either
/// a caller-supplied slug or a timestamp-derived token) and never
/// reassigned. Every other field is freely mutable via edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identity key
    pub id: ProductId,
    /// Display title
    pub name: String,
    /// One-line description
    pub purpose: String,
    /// Product category
    pub category: Category,
    /// Absolute URL of the live product
    pub url: String,
    /// Color token (hex) for per-product theming
    pub accent: String,
    /// ISO calendar date; the sort key under date ordering.
    /// Empty means "unset" and sorts with the fixed fallback date.
    #[serde(default)]
    pub created_date: String,
    /// Local path of a cached preview image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Remote URL of an externally generated preview image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
    /// When the screenshot was last refreshed (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_screenshot_update: Option<String>,
}

impl Product {
    /// Generate a timestamp-derived id token for a newly added product.
    pub fn generate_id(unix_millis: i64) -> ProductId {
        format!("product-{unix_millis}")
    }

    /// Today's date in ISO calendar form, the default `created_date` for
    /// products added through an edit session.
    pub fn today() -> String {
        chrono::Utc::now().format("%Y-%m-%d").to_string()
    }

    /// Build a product from a document's field map.
    ///
    /// The document id wins only when the fields carry none of their own,
    /// matching how the original snapshot payloads were spread.
    pub fn from_fields(id: &str, fields: serde_json::Value) -> Result<Self> {
        let mut fields = fields;
        if let Some(map) = fields.as_object_mut() {
            map.entry("id".to_string())
                .or_insert_with(|| serde_json::Value::String(id.to_string()));
        }
        serde_json::from_value(fields).map_err(|e| Error::InvalidProduct(e.to_string()))
    }

    /// Serialize to a document field map for upserting.
    pub fn to_fields(&self) -> serde_json::Value {
        // Serialization of a plain struct cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
