//! Settings synchronization service.
//!
//! Owns the singleton settings document. The service loads the persisted
//! sort order once, then saves on every change, with the [`LoadGate`]
//! suppressing any save until the initial load attempt has completed.
//! Without the gate, a change fired against the in-memory default could
//! overwrite a persisted non-default value before the load resolves.

use crate::collections;
use crate::error::Result;
use crate::store::DocumentStore;
use prodlab_core::{LoadGate, Settings, SortOrder, SETTINGS_DOC_ID};

/// Owns the sort-order preference and its persistence.
#[derive(Debug)]
pub struct SettingsService<S> {
    store: S,
    gate: LoadGate,
    sort_order: SortOrder,
}

impl<S: DocumentStore> SettingsService<S> {
    /// Create a service with the default sort order, not yet loaded.
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: LoadGate::new(),
            sort_order: SortOrder::default(),
        }
    }

    /// The in-memory sort order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Whether the initial load attempt has completed.
    pub fn is_loaded(&self) -> bool {
        self.gate.is_loaded()
    }

    /// One-shot load of the singleton settings document.
    ///
    /// A present document's sort order is adopted into memory; an absent
    /// document keeps the default. Either way, and on failure too, the
    /// gate transitions to loaded so subsequent changes can persist.
    pub async fn load(&mut self) {
        match self
            .store
            .get_one(collections::SETTINGS, SETTINGS_DOC_ID)
            .await
        {
            Ok(Some(fields)) => match Settings::from_fields(fields) {
                Ok(settings) => {
                    tracing::info!("loaded settings: sort order {}", settings.sort_order.as_str());
                    self.sort_order = settings.sort_order;
                }
                Err(e) => tracing::warn!("ignoring malformed settings document: {e}"),
            },
            Ok(None) => tracing::info!("no settings document found, using defaults"),
            Err(e) => tracing::error!("error loading settings: {e}"),
        }

        self.gate.complete();
    }

    /// Change the sort order, persisting it if the gate allows.
    pub async fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;

        if !self.gate.is_loaded() {
            tracing::debug!("suppressing settings save before initial load");
            return;
        }

        if let Err(e) = self.save().await {
            tracing::error!("error saving settings: {e}");
        }
    }

    /// Flip between date and random order. Returns the new value.
    pub async fn toggle_sort_order(&mut self) -> SortOrder {
        let next = self.sort_order.toggled();
        self.set_sort_order(next).await;
        next
    }

    async fn save(&self) -> Result<()> {
        let settings = Settings {
            sort_order: self.sort_order,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };

        self.store
            .upsert(collections::SETTINGS, SETTINGS_DOC_ID, settings.to_fields())
            .await?;

        tracing::debug!("settings saved: sort order {}", self.sort_order.as_str());
        Ok(())
    }
}
