//! Configuration file handling for wikidoc.
//!
//! This module defines the `.wikidoc.toml` configuration schema and provides
//! functions for loading, validating, and locating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::parser::ParseOptions;
use crate::substitutions::Substitutions;

/// The default configuration filename.
pub const CONFIG_FILENAME: &str = ".wikidoc.toml";

/// Root configuration structure for a wiki.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WikiConfig {
    /// Tool metadata.
    #[serde(default)]
    pub wiki: WikiSection,
    /// Article location and parse defaults.
    #[serde(default)]
    pub articles: ArticlesSection,
    /// Emoji shortcode (without colons) to platform emoji token.
    #[serde(default)]
    pub emoji: BTreeMap<String, String>,
    /// Channel shortcut name to channel id.
    #[serde(default)]
    pub channels: BTreeMap<String, String>,
}

/// Tool metadata section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WikiSection {
    /// Configuration schema version.
    pub version: String,
}

/// Article settings section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticlesSection {
    /// Directory holding the `*.md` articles.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Parse without platform context (no emoji or channel links).
    #[serde(default)]
    pub freestanding: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from("wiki/articles")
}

impl Default for WikiSection {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
        }
    }
}

impl Default for ArticlesSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            freestanding: false,
        }
    }
}

impl WikiConfig {
    /// Load configuration from a file path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: WikiConfig = toml::from_str(content).context("failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the nearest config above the current directory, or defaults.
    ///
    /// Returns the directory relative paths in the config resolve against.
    pub fn discover() -> Result<(Self, PathBuf)> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        match find_config_path_from(&cwd) {
            Some(path) => {
                let config = Self::load(&path)?;
                let dir = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                log::debug!("using config {}", path.display());
                Ok((config, dir))
            }
            None => {
                log::debug!("no {CONFIG_FILENAME} found, using defaults");
                Ok((Self::default(), cwd))
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.wiki.version.is_empty() {
            anyhow::bail!("wiki.version cannot be empty");
        }

        if self.articles.root.as_os_str().is_empty() {
            anyhow::bail!("articles.root cannot be empty");
        }

        for (table, entries) in [("emoji", &self.emoji), ("channels", &self.channels)] {
            for (name, value) in entries {
                if !is_shortcut_name(name) {
                    anyhow::bail!("{table}: invalid name '{name}'");
                }
                if value.trim().is_empty() {
                    anyhow::bail!("{table}.{name} cannot be empty");
                }
            }
        }

        Ok(())
    }

    /// Parse options built from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            freestanding: self.articles.freestanding,
            substitutions: Substitutions {
                emoji: self.emoji.clone(),
                channels: self.channels.clone(),
            },
        }
    }
}

fn is_shortcut_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Find the config file by walking up from the current directory.
pub fn find_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    find_config_path_from(&cwd).ok_or_else(|| {
        anyhow::anyhow!(
            "no {} found in current directory or any parent directory",
            CONFIG_FILENAME
        )
    })
}

fn find_config_path_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_valid_config() {
        let toml = r#"
[wiki]
version = "0.1"

[articles]
root = "articles"
freestanding = true

[emoji]
tux = "<:tux:1001>"

[channels]
resources = "2001"
"#;
        let config = WikiConfig::parse(toml).unwrap();
        assert_eq!(config.wiki.version, "0.1");
        assert_eq!(config.articles.root, PathBuf::from("articles"));
        assert!(config.articles.freestanding);
        assert_eq!(config.emoji.get("tux").map(String::as_str), Some("<:tux:1001>"));
        assert_eq!(config.channels.get("resources").map(String::as_str), Some("2001"));
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config = WikiConfig::parse("").unwrap();
        assert_eq!(config, WikiConfig::default());
        assert_eq!(config.articles.root, PathBuf::from("wiki/articles"));
        assert!(!config.articles.freestanding);
    }

    #[test]
    fn reject_config_with_empty_version() {
        let toml = r#"
[wiki]
version = ""
"#;
        let result = WikiConfig::parse(toml);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("version cannot be empty")
        );
    }

    #[test]
    fn reject_config_with_empty_root() {
        let toml = r#"
[articles]
root = ""
"#;
        let result = WikiConfig::parse(toml);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("articles.root cannot be empty")
        );
    }

    #[test]
    fn reject_invalid_shortcut_names() {
        let toml = r#"
[emoji]
"bad name" = "<:x:1>"
"#;
        assert!(
            WikiConfig::parse(toml)
                .unwrap_err()
                .to_string()
                .contains("invalid name")
        );
    }

    #[test]
    fn reject_empty_channel_id() {
        let toml = r#"
[channels]
resources = " "
"#;
        assert!(
            WikiConfig::parse(toml)
                .unwrap_err()
                .to_string()
                .contains("channels.resources cannot be empty")
        );
    }

    #[test]
    fn parse_options_carry_tables() {
        let mut config = WikiConfig::default();
        config.emoji.insert("tux".to_string(), "<:tux:1>".to_string());
        config.articles.freestanding = true;

        let options = config.parse_options();
        assert!(options.freestanding);
        assert_eq!(options.substitutions.emoji.len(), 1);
        assert!(options.substitutions.channels.is_empty());
    }

    #[test]
    fn config_roundtrip() {
        let mut config = WikiConfig::default();
        config.channels.insert("resources".to_string(), "2001".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = WikiConfig::parse(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn finds_config_in_parent_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            find_config_path_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
