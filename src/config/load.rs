use crate::config::types::{Config, SETTINGS_FILE, UserSettings};
use anyhow::{Context, Result, bail};
use log::warn;
use std::fs;
use std::path::Path;

impl Config {
    /// 讀取當前目錄的 settings.json，讀取失敗時使用預設值
    pub fn new() -> Self {
        let path = Path::new(SETTINGS_FILE);
        let settings = Self::load_settings(path).unwrap_or_else(|e| {
            warn!("{e:#}，使用預設設定");
            UserSettings::default()
        });
        Self { settings }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            settings: Self::load_settings(path)?,
        })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: UserSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        if settings.suffix_limit == 0 {
            bail!("suffix_limit 必須大於 0: {}", path.display());
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_EXIFTOOL, DEFAULT_METADATA_DUMP_FILE};
    use crate::tools::DEFAULT_SUFFIX_LIMIT;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_settings_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("settings.json")).unwrap();

        assert_eq!(config.settings.exiftool_path, PathBuf::from(DEFAULT_EXIFTOOL));
        assert_eq!(
            config.settings.metadata_dump_file,
            PathBuf::from(DEFAULT_METADATA_DUMP_FILE)
        );
        assert_eq!(config.settings.suffix_limit, DEFAULT_SUFFIX_LIMIT);
    }

    #[test]
    fn test_partial_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{ "exiftool_path": "/opt/bin/exiftool" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.settings.exiftool_path,
            PathBuf::from("/opt/bin/exiftool")
        );
        assert_eq!(config.settings.suffix_limit, DEFAULT_SUFFIX_LIMIT);
    }

    #[test]
    fn test_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());

        fs::write(&path, r#"{ "suffix_limit": 0 }"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
