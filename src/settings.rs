//! Stored-data reset.

use crate::lang::Localizer;
use crate::sender::DisplayPort;
use crate::storage::{KeyValueStore, StorageError};

/// Clears everything the app has persisted and tells the user about it.
pub struct SettingsWorkflow<S, D, L> {
    store: S,
    display: D,
    lang: L,
}

impl<S, D, L> SettingsWorkflow<S, D, L>
where
    S: KeyValueStore,
    D: DisplayPort,
    L: Localizer,
{
    pub fn new(store: S, display: D, lang: L) -> Self {
        Self {
            store,
            display,
            lang,
        }
    }

    /// Drop all stored units and settings, then surface a notice.
    pub async fn reset_to_defaults(&self) -> Result<(), StorageError> {
        self.store.clear()?;
        log::info!("stored data cleared");

        let title = self.lang.lookup("ResetLabel");
        let message = self.lang.lookup("AppReset");
        self.display.alert(&title, &message, "OK").await;
        Ok(())
    }
}
