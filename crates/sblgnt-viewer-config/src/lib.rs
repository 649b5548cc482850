use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Replacement texts for the viewer's status panel. Unset fields keep the
/// viewer's built-in wording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<String>,
}

impl StatusMessages {
    pub fn is_empty(&self) -> bool {
        self.loading.is_none() && self.error.is_none() && self.empty.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that viewer URLs such as `data/mark.json` resolve against
    pub data_root: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "StatusMessages::is_empty")]
    pub status_messages: StatusMessages,
}

impl Config {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            manifest_url: None,
            data_url: None,
            status_messages: StatusMessages::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the data root
        config.data_root = Self::expand_path(&config.data_root).unwrap_or(config.data_root);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/sblgnt-viewer");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/sblgnt-viewer/config.toml"));
    }

    #[test]
    fn test_minimal_config_only_needs_data_root() {
        let config: Config = toml::from_str(r#"data_root = "/srv/sblgnt""#).unwrap();

        assert_eq!(config, Config::new("/srv/sblgnt"));
    }

    #[test]
    fn test_full_config_parses_every_field() {
        let config: Config = toml::from_str(
            r#"
data_root = "/srv/sblgnt"
manifest_url = "data/manifest.json"
data_url = "data/john.json"

[status_messages]
loading = "Fetching…"
empty = "Nothing here."
"#,
        )
        .unwrap();

        assert_eq!(config.data_url.as_deref(), Some("data/john.json"));
        assert_eq!(config.manifest_url.as_deref(), Some("data/manifest.json"));
        assert_eq!(config.status_messages.loading.as_deref(), Some("Fetching…"));
        assert_eq!(config.status_messages.error, None);
        assert_eq!(config.status_messages.empty.as_deref(), Some("Nothing here."));
    }

    #[test]
    fn test_unset_fields_are_not_written() {
        let content = toml::to_string_pretty(&Config::new("/srv/sblgnt")).unwrap();

        assert_eq!(content.trim(), r#"data_root = "/srv/sblgnt""#);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/sblgnt/data")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("sblgnt/data"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SBLGNT_TEST_ROOT", "/test/env/path");
        }

        let expanded = Config::expand_path(&PathBuf::from("$SBLGNT_TEST_ROOT/viewer")).unwrap();

        assert_eq!(expanded, PathBuf::from("/test/env/path/viewer"));

        unsafe {
            env::remove_var("SBLGNT_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths_alone() {
        for path in ["/absolute/path", "relative/path"] {
            assert_eq!(
                Config::expand_path(&PathBuf::from(path)),
                Some(PathBuf::from(path))
            );
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let result = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "data_root = [").unwrap();

        let error = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
        assert!(error.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut config = Config::new("/tmp/sblgnt");
        config.data_url = Some("data/acts.json".to_string());
        config.status_messages.error = Some("Acts failed to load.".to_string());

        config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_data_root_with_env_var_in_toml() {
        unsafe {
            env::set_var("SBLGNT_DATA_HOME", "/custom/sblgnt");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, r#"data_root = "$SBLGNT_DATA_HOME/viewer""#).unwrap();

        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded.data_root, PathBuf::from("/custom/sblgnt/viewer"));

        unsafe {
            env::remove_var("SBLGNT_DATA_HOME");
        }
    }
}
