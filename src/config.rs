use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::tfidf::TfidfOptions;
use crate::tokenize::StopWordFilter;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub paste: PasteConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatcherConfig {
    #[serde(default = "default_stop_words")]
    pub stop_words: String,
    #[serde(default)]
    pub max_features: Option<usize>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            stop_words: "none".to_string(),
            max_features: None,
        }
    }
}

fn default_stop_words() -> String {
    "none".to_string()
}

impl MatcherConfig {
    pub fn stop_word_filter(&self) -> Result<StopWordFilter> {
        StopWordFilter::from_name(&self.stop_words).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown stop_words setting: '{}'. Must be none or english.",
                self.stop_words
            )
        })
    }

    pub fn tfidf_options(&self) -> Result<TfidfOptions> {
        Ok(TfidfOptions {
            stop_words: self.stop_word_filter()?,
            max_features: self.max_features,
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasteConfig {
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

fn default_separator() -> String {
    "---RESUME-SEPARATOR---".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct IntakeConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec![
        "**/*.txt".to_string(),
        "**/*.pdf".to_string(),
        "**/*.docx".to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7700".to_string()
}

/// Loads configuration from `path`. A missing file is not an error; every
/// setting has a default, so the tool runs without any config at all.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate matcher
    config.matcher.stop_word_filter()?;
    if config.matcher.max_features == Some(0) {
        anyhow::bail!("matcher.max_features must be > 0 when set");
    }

    // Validate paste
    if config.paste.separator.is_empty() {
        anyhow::bail!("paste.separator must not be empty");
    }

    // Validate limits
    if config.limits.max_file_bytes == 0 {
        anyhow::bail!("limits.max_file_bytes must be > 0");
    }

    Ok(config)
}
