use crate::error::{CliError, Result};
use directories::ProjectDirs;
use rnadesign::engine::settings::BrowserSettings;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SETTINGS_FILE: &str = "browser-settings.toml";

/// Where the browser's column set and marks live between runs.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Uses `custom_path` when given, otherwise the OS-specific config directory.
    pub fn new(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = match custom_path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        debug!("Settings store initialized with path: {:?}", &path);
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the default settings; malformed content is sanitized.
    pub fn load(&self) -> Result<BrowserSettings> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(BrowserSettings::from_toml_str(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored settings at {:?}; using defaults.", &self.path);
                Ok(BrowserSettings::default())
            }
            Err(e) => Err(CliError::Io(e)),
        }
    }

    /// Like [`load`](Self::load), but `None` when nothing has been stored yet, so the
    /// configured columns stay in effect.
    pub fn load_stored(&self) -> Result<Option<BrowserSettings>> {
        if self.path.exists() {
            self.load().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn save(&self, settings: &BrowserSettings) -> Result<()> {
        let text = settings
            .to_toml_string()
            .map_err(|e| CliError::Settings(format!("Could not encode settings: {}", e)))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        info!("Saved browser settings to {:?}", &self.path);
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CliError::Io(e)),
        }
    }

    fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "rnadesign", "rnadesign")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .ok_or_else(|| {
                CliError::Settings("Could not determine the settings directory.".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnadesign::core::models::category::DesignCategory;
    use rnadesign::core::models::ids::SolutionId;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("absent.toml"));
        assert_eq!(store.load().unwrap(), BrowserSettings::default());
        assert_eq!(store.load_stored().unwrap(), None);
    }

    #[test]
    fn saved_settings_load_back_and_reset_removes_them() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("nested/settings.toml"));
        let settings = BrowserSettings {
            columns: vec![DesignCategory::Title, DesignCategory::Round],
            marked: vec![SolutionId(5)],
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
        assert_eq!(store.load_stored().unwrap(), Some(settings));

        store.reset().unwrap();
        assert_eq!(store.load().unwrap(), BrowserSettings::default());
        store.reset().unwrap();
    }

    #[test]
    fn corrupt_file_is_sanitized_instead_of_failing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "columns = [\"Nope\"]\nmarked = [\"x\"]\n").unwrap();
        let store = SettingsStore::with_path(path);
        assert_eq!(store.load().unwrap(), BrowserSettings::default());
    }
}
