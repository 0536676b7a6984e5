//! Dashboard settings persistence.

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::db::{RepositoryError, SettingsStore};
use crate::models::{ProfileSettings, SettingsSection, SettingsUpdate, SiteSettings};

/// Load and save the typed settings sections.
pub struct SettingsService<'a, S> {
    store: &'a S,
}

impl<'a, S: SettingsStore> SettingsService<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All sections, with defaults for any never saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a stored section does not
    /// deserialize, or `RepositoryError::Database` if the read fails.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<SiteSettings, RepositoryError> {
        Ok(SiteSettings {
            profile: self.section(SettingsSection::Profile).await?,
            security: self.section(SettingsSection::Security).await?,
            notifications: self.section(SettingsSection::Notifications).await?,
            general: self.section(SettingsSection::General).await?,
        })
    }

    /// Only the profile section, defaulted if never saved.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<ProfileSettings, RepositoryError> {
        self.section(SettingsSection::Profile).await
    }

    /// Replace exactly one section.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    #[instrument(skip(self, update), fields(section = update.section().key()))]
    pub async fn save_section(&self, update: &SettingsUpdate) -> Result<(), RepositoryError> {
        let value = update
            .to_value()
            .map_err(|e| RepositoryError::DataCorruption(format!("unserializable settings: {e}")))?;
        self.store.put_setting(update.section().key(), &value).await?;
        tracing::info!("Settings section saved");
        Ok(())
    }

    async fn section<T: DeserializeOwned + Default>(
        &self,
        section: SettingsSection,
    ) -> Result<T, RepositoryError> {
        let Some(value) = self.store.get_setting(section.key()).await? else {
            return Ok(T::default());
        };

        serde_json::from_value(value).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid {} settings: {e}", section.key()))
        })
    }
}
