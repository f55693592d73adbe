//! Settings singleton and the load-then-save gate.

use crate::{error::Result, Error};
use serde::{Deserialize, Serialize};

/// Fixed id of the singleton settings document.
pub const SETTINGS_DOC_ID: &str = "app";

/// Display ordering preference for the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first by created date
    #[default]
    Date,
    /// Uniform random permutation, re-drawn on each recomputation
    Random,
}

impl SortOrder {
    /// The wire representation of this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Date => "date",
            SortOrder::Random => "random",
        }
    }

    /// Flip between the two orders.
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Date => SortOrder::Random,
            SortOrder::Random => SortOrder::Date,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "date" => Ok(SortOrder::Date),
            "random" => Ok(SortOrder::Random),
            other => Err(Error::UnknownSortOrder(other.to_string())),
        }
    }
}

/// The app-wide settings record.
///
/// Lives as a single document with id [`SETTINGS_DOC_ID`] in the
/// `settings` collection. Created on first save if absent; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The persisted ordering preference
    pub sort_order: SortOrder,
    /// When the settings were last saved (RFC 3339)
    #[serde(default)]
    pub updated_at: String,
}

impl Settings {
    /// Build settings from a document's field map.
    pub fn from_fields(fields: serde_json::Value) -> Result<Self> {
        serde_json::from_value(fields).map_err(|e| Error::InvalidSettings(e.to_string()))
    }

    /// Serialize to a document field map for upserting.
    pub fn to_fields(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Load state of the settings singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The initial load attempt has not completed yet
    Unloaded,
    /// The initial load attempt completed (success or failure)
    Loaded,
}

/// Gate preventing a save from racing the initial load.
///
/// The transition `Unloaded -> Loaded` fires exactly once, when the
/// initial load attempt completes. A failed load still counts as loaded:
/// the in-memory defaults become authoritative and saving is unblocked.
/// While `Unloaded`, saves must be suppressed so the default value cannot
/// overwrite a persisted one that has not arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadGate {
    state: LoadState,
}

impl LoadGate {
    /// A gate in the `Unloaded` state.
    pub fn new() -> Self {
        Self {
            state: LoadState::Unloaded,
        }
    }

    /// Mark the initial load attempt as completed.
    pub fn complete(&mut self) {
        self.state = LoadState::Loaded;
    }

    /// Whether saves are allowed.
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Current state.
    pub fn state(&self) -> LoadState {
        self.state
    }
}

impl Default for LoadGate {
    fn default() -> Self {
        Self::new()
    }
}
