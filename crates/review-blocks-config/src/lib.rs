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

    #[error("Invalid value for {field} in {config_path}: {message}")]
    InvalidValue {
        config_path: PathBuf,
        field: &'static str,
        message: String,
    },
}

/// What a new article starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapMode {
    #[default]
    Empty,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of `<id>.json` articles, used when no API is configured
    pub content_dir: PathBuf,
    /// Base URL of the articles API; takes precedence over `content_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub bootstrap: BootstrapMode,
    #[serde(default = "default_min_blocks")]
    pub min_blocks: usize,
}

fn default_min_blocks() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: Self::default_content_dir(),
            api_base_url: None,
            bootstrap: BootstrapMode::default(),
            min_blocks: default_min_blocks(),
        }
    }
}

impl Config {
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

        // Expand shell variables and tilde in the content directory
        config.content_dir = Self::expand_path(&config.content_dir).unwrap_or(config.content_dir);
        config.api_base_url = config
            .api_base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if let Some(url) = &config.api_base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                config_path: config_path.to_path_buf(),
                field: "api_base_url",
                message: format!("expected an http(s) URL, got {url}"),
            });
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config file if present, otherwise the defaults
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
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
        let config_dir = shellexpand::tilde("~/.config/review-blocks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn default_content_dir() -> PathBuf {
        let dir = shellexpand::tilde("~/.local/share/review-blocks/articles");
        PathBuf::from(dir.as_ref())
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
    use std::env;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, content).unwrap();
        (temp_dir, config_file)
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/review-blocks/config.toml"));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let (_dir, config_file) = write_config(r#"content_dir = "/srv/articles""#);

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.content_dir, PathBuf::from("/srv/articles"));
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.bootstrap, BootstrapMode::Empty);
        assert_eq!(config.min_blocks, 1);
    }

    #[test]
    fn test_full_config() {
        let (_dir, config_file) = write_config(
            r#"
content_dir = "/srv/articles"
api_base_url = "https://cms.example.com/api"
bootstrap = "paragraph"
min_blocks = 2
"#,
        );

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://cms.example.com/api")
        );
        assert_eq!(config.bootstrap, BootstrapMode::Paragraph);
        assert_eq!(config.min_blocks, 2);
    }

    #[test]
    fn test_blank_api_url_is_ignored() {
        let (_dir, config_file) = write_config(
            r#"
content_dir = "/srv/articles"
api_base_url = "   "
"#,
        );

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.api_base_url, None);
    }

    #[test]
    fn test_non_http_api_url_is_rejected() {
        let (_dir, config_file) = write_config(
            r#"
content_dir = "/srv/articles"
api_base_url = "ftp://cms.example.com"
"#,
        );

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "api_base_url",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_bootstrap_mode_is_parse_error() {
        let (_dir, config_file) = write_config(
            r#"
content_dir = "/srv/articles"
bootstrap = "template"
"#,
        );

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_content_dir_with_env_var_in_toml() {
        unsafe {
            env::set_var("REVIEW_BLOCKS_TEST_ROOT", "/custom/content");
        }

        let (_dir, config_file) =
            write_config(r#"content_dir = "$REVIEW_BLOCKS_TEST_ROOT/articles""#);
        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.content_dir, PathBuf::from("/custom/content/articles"));

        unsafe {
            env::remove_var("REVIEW_BLOCKS_TEST_ROOT");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            content_dir: PathBuf::from("/tmp/articles"),
            api_base_url: Some("http://localhost:3000/api".to_string()),
            bootstrap: BootstrapMode::Paragraph,
            min_blocks: 1,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
