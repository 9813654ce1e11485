use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::{CurrencyCode, FormatOptions, LocaleConfig, MoneyFormatter},
    domain::CategoryRegistry,
    errors::{ConfigLoadError, TrackerError},
    utils::ensure_dir,
};

const CONFIG_FILE: &str = "config.json";
const CATEGORIES_FILE: &str = "categories.json";
const TMP_SUFFIX: &str = "json.tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: CurrencyCode,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub format: FormatOptions,
    /// Category registry document; relative paths resolve against the data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            locale: LocaleConfig::default(),
            format: FormatOptions::default(),
            categories_file: None,
        }
    }
}

impl Config {
    pub fn money_formatter(&self) -> MoneyFormatter {
        MoneyFormatter::new(
            self.currency.clone(),
            self.locale.clone(),
            self.format.clone(),
        )
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Reads `config.json`, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config, TrackerError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn registry_path(&self, config: &Config) -> PathBuf {
        match &config.categories_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => self.base.join(CATEGORIES_FILE),
        }
    }
}

/// Loads the category registry document at `path`.
///
/// A missing file means no custom registry was configured and yields the
/// builtin catalog; unreadable or malformed files are errors.
pub fn load_registry(path: &Path) -> Result<CategoryRegistry, ConfigLoadError> {
    match fs::read_to_string(path) {
        Ok(data) => CategoryRegistry::from_json(&data),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no category registry file, using builtin catalog");
            Ok(CategoryRegistry::builtin())
        }
        Err(source) => Err(ConfigLoadError::Unreadable {
            path: path.display().to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::NegativeStyle;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.currency = CurrencyCode::new("eur");
        config.format.negative_style = NegativeStyle::Parentheses;
        config.categories_file = Some(PathBuf::from("my-categories.json"));
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            manager.registry_path(&loaded),
            temp.path().join("my-categories.json")
        );
    }

    #[test]
    fn missing_registry_file_uses_builtin() {
        let temp = TempDir::new().unwrap();
        let registry = load_registry(&temp.path().join(CATEGORIES_FILE)).unwrap();
        assert_eq!(registry, CategoryRegistry::builtin());
    }

    #[test]
    fn registry_directory_is_unreadable() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            load_registry(temp.path()),
            Err(ConfigLoadError::Unreadable { .. })
        ));
    }
}
