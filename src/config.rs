use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub word_bank: Option<PathBuf>,
    #[serde(default = "default_show_pinyin")]
    pub show_pinyin: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_show_pinyin() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shizi")
        .join("logs")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            word_bank: None,
            show_pinyin: default_show_pinyin(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shizi")
            .join("config.toml")
    }

    pub fn word_bank_path(&self) -> Option<PathBuf> {
        self.word_bank
            .clone()
            .filter(|p| p.to_str().is_none_or(|s| !s.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert!(config.word_bank.is_none());
        assert!(config.show_pinyin);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.contains("logs"));
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
theme = "catppuccin-mocha"
word_bank = "/srv/words/part_1.csv"
show_pinyin = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(
            config.word_bank_path(),
            Some(PathBuf::from("/srv/words/part_1.csv"))
        );
        assert!(!config.show_pinyin);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_blank_word_bank_means_bundled() {
        let config: Config = toml::from_str("word_bank = \"  \"").unwrap();
        assert!(config.word_bank_path().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_word_bank_path_is_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = PathBuf::from(OsStr::from_bytes(b"/srv/words/\xffbank.csv"));
        let config = Config {
            word_bank: Some(raw.clone()),
            ..Config::default()
        };
        assert_eq!(config.word_bank_path(), Some(raw));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.log_dir, deserialized.log_dir);
        assert_eq!(config.show_pinyin, deserialized.show_pinyin);
    }
}
