use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use toml_edit::value;
use toml_edit::Document;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::PreferenceStore;
use crate::domain::models::Preferences;
use crate::domain::models::Theme;

#[cfg(test)]
#[path = "preferences_file_test.rs"]
mod tests;

const DARK_MODE_KEY: &str = "dark-mode";
const FONT_SIZE_KEY: &str = "font-size";

/// Persists the display preferences as a small TOML document under the user's
/// config directory. Both entries are rewritten unconditionally on every save.
pub struct FilePreferenceStore {
    path: PathBuf,
    defaults: Preferences,
}

impl Default for FilePreferenceStore {
    fn default() -> FilePreferenceStore {
        let mut defaults = Preferences::default();
        if let Ok(theme) = Theme::from_str(&Config::get(ConfigKey::Theme)) {
            defaults.theme = theme;
        }

        return FilePreferenceStore {
            path: PathBuf::from(Config::get(ConfigKey::PreferencesFile)),
            defaults,
        };
    }
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> FilePreferenceStore {
        return FilePreferenceStore {
            path,
            defaults: Preferences::default(),
        };
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self) -> Result<Preferences> {
        let mut preferences = self.defaults;

        if !self.path.exists() {
            return Ok(preferences);
        }

        let toml_str = fs::read_to_string(&self.path).await?;
        let doc = toml_str.parse::<Document>()?;

        match doc.get(DARK_MODE_KEY).map(|item| item.as_bool()) {
            Some(Some(dark)) => {
                preferences.theme = if dark { Theme::Dark } else { Theme::Light };
            }
            None => {}
            Some(None) => {
                // Present but unparsable falls back to the default.
                tracing::warn!(key = DARK_MODE_KEY, "ignoring malformed preference");
            }
        }

        match doc.get(FONT_SIZE_KEY).map(|item| item.as_integer()) {
            Some(Some(size)) if u16::try_from(size).is_ok() => {
                preferences.font_size = size as u16;
            }
            Some(_) => {
                tracing::warn!(key = FONT_SIZE_KEY, "ignoring malformed preference");
            }
            None => {}
        }

        return Ok(preferences);
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut doc = Document::new();
        doc[DARK_MODE_KEY] = value(preferences.theme.is_dark());
        doc[FONT_SIZE_KEY] = value(i64::from(preferences.font_size));

        fs::write(&self.path, doc.to_string())
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        return Ok(());
    }
}
