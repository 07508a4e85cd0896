use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::model::{Locale, Units};

/// Persisted user state: API credential, locale, optional unit override and
/// the favorites list. Stored as TOML under the platform config directory;
/// absent on first run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API key for the primary weather provider.
    pub api_key: Option<String>,

    /// Active locale code, e.g. "tr" or "en".
    pub locale: Option<String>,

    /// Explicit unit override; when unset, the locale's default applies.
    pub units: Option<String>,

    /// Favorite identities in insertion order, e.g. "London, GB".
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl Config {
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .and_then(|code| Locale::try_from(code).ok())
            .unwrap_or_default()
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = Some(locale.as_str().to_string());
    }

    /// Active unit system: the explicit override if set, otherwise the
    /// locale's default (imperial for the US locale, metric elsewhere).
    pub fn units(&self) -> Units {
        self.units
            .as_deref()
            .and_then(|value| Units::try_from(value).ok())
            .unwrap_or_else(|| self.locale().default_units())
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = Some(units.as_str().to_string());
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured for the weather provider.\n\
                 Hint: run `weatherly configure` and enter your API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_favorite(&self, identity: &str) -> bool {
        self.favorites.iter().any(|f| f == identity)
    }

    /// Adds the identity unless already present; duplicates are a no-op.
    pub fn add_favorite(&mut self, identity: &str) {
        if !self.is_favorite(identity) {
            self.favorites.push(identity.to_string());
        }
    }

    /// Removes the identity, preserving the order of the remaining entries.
    pub fn remove_favorite(&mut self, identity: &str) {
        self.favorites.retain(|f| f != identity);
    }

    /// Star/unstar. Returns true when the identity is a favorite afterwards.
    pub fn toggle_favorite(&mut self, identity: &str) -> bool {
        if self.is_favorite(identity) {
            self.remove_favorite(identity);
            false
        } else {
            self.add_favorite(identity);
            true
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherly", "weatherly")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_default_by_locale_until_overridden() {
        let mut cfg = Config::default();
        assert_eq!(cfg.units(), Units::Metric);

        cfg.set_locale(Locale::En);
        assert_eq!(cfg.units(), Units::Imperial);

        cfg.set_units(Units::Metric);
        assert_eq!(cfg.units(), Units::Metric);

        cfg.set_locale(Locale::De);
        // Explicit override survives locale changes.
        assert_eq!(cfg.units(), Units::Metric);
    }

    #[test]
    fn unknown_locale_string_falls_back_to_default() {
        let cfg = Config { locale: Some("xx".into()), ..Config::default() };
        assert_eq!(cfg.locale(), Locale::Tr);
    }

    #[test]
    fn api_key_errors_when_missing() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `weatherly configure`"));
    }

    #[test]
    fn add_then_remove_restores_favorites_order() {
        let mut cfg = Config::default();
        cfg.add_favorite("London, GB");
        cfg.add_favorite("Paris, FR");
        cfg.add_favorite("Tokyo, JP");

        cfg.add_favorite("Berlin, DE");
        cfg.remove_favorite("Berlin, DE");

        assert_eq!(cfg.favorites, ["London, GB", "Paris, FR", "Tokyo, JP"]);
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut cfg = Config::default();
        cfg.add_favorite("London, GB");
        cfg.add_favorite("London, GB");
        assert_eq!(cfg.favorites.len(), 1);
    }

    #[test]
    fn toggle_favorite_round_trips() {
        let mut cfg = Config::default();
        assert!(cfg.toggle_favorite("İstanbul, TR"));
        assert!(cfg.is_favorite("İstanbul, TR"));
        assert!(!cfg.toggle_favorite("İstanbul, TR"));
        assert!(cfg.favorites.is_empty());
    }

    #[test]
    fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("config.toml")).expect("load default");
        assert!(cfg.favorites.is_empty());
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_locale(Locale::Fr);
        cfg.set_units(Units::Imperial);
        cfg.add_favorite("Paris, FR");
        cfg.add_favorite("Nice, FR");
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.locale(), Locale::Fr);
        assert_eq!(loaded.units(), Units::Imperial);
        assert_eq!(loaded.favorites, ["Paris, FR", "Nice, FR"]);
    }
}
