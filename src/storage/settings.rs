//! Settings repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::Settings;

use super::file_io::{read_json, write_json_atomic};

/// Repository for user settings
pub struct SettingsRepository {
    path: PathBuf,
    settings: RwLock<Settings>,
}

impl SettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            settings: RwLock::new(Settings::default()),
        }
    }

    /// Load settings from disk (defaults if the file does not exist)
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: Settings = read_json(&self.path)?;
        let mut settings = self
            .settings
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *settings = file_data;
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let settings = self
            .settings
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*settings)
    }

    /// Get a copy of the current settings
    pub fn get(&self) -> Result<Settings, FintrackError> {
        let settings = self
            .settings
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(settings.clone())
    }

    /// Replace the settings (update or bulk import)
    pub fn replace(&self, new_settings: Settings) -> Result<(), FintrackError> {
        let mut settings = self
            .settings
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *settings = new_settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_then_replace_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let repo = SettingsRepository::new(path.clone());
        repo.load().unwrap();
        assert_eq!(repo.get().unwrap().currency, Currency::Usd);

        repo.replace(Settings {
            currency: Currency::Zar,
        })
        .unwrap();
        repo.save().unwrap();

        let repo2 = SettingsRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get().unwrap().currency, Currency::Zar);
    }
}
