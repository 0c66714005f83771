use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code (ISO 639-1) of the page and the pictogram search
    #[serde(default = "default_language")]
    pub language: String,

    /// Generation config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Pictogram lookup config
    #[serde(default)]
    pub pictograms: PictogramConfig,

    /// Text extraction config
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Model name (e.g., "gpt-4o-mini")
    #[serde(default = "default_model")]
    pub model: String,

    /// Service endpoint URL (OpenAI-compatible; empty uses the public API)
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,

    /// API key for the service (normally resolved from the credential store)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token bound per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum words per simplified sentence
    #[serde(default = "default_max_words_per_sentence")]
    pub max_words_per_sentence: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_generation_endpoint(),
            api_key: String::new(),
            timeout_secs: default_generation_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_words_per_sentence: default_max_words_per_sentence(),
        }
    }
}

/// Pictogram lookup configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PictogramConfig {
    /// Whether to look up pictograms at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Search API base URL
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Image asset base URL
    #[serde(default = "default_static_endpoint")]
    pub static_endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_pictogram_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PictogramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search_endpoint: default_search_endpoint(),
            static_endpoint: default_static_endpoint(),
            timeout_secs: default_pictogram_timeout_secs(),
        }
    }
}

/// Text extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Attribute marking content elements
    #[serde(default = "default_content_attribute")]
    pub attribute: String,

    /// Optional container element id to scope extraction to
    #[serde(default)]
    pub container_id: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            attribute: default_content_attribute(),
            container_id: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generation_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_words_per_sentence() -> u32 {
    15
}

fn default_true() -> bool {
    true
}

fn default_search_endpoint() -> String {
    crate::pictograms::DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_static_endpoint() -> String {
    crate::pictograms::DEFAULT_STATIC_ENDPOINT.to_string()
}

fn default_pictogram_timeout_secs() -> u64 {
    30
}

fn default_content_attribute() -> String {
    crate::extractor::DEFAULT_CONTENT_ATTRIBUTE.to_string()
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Load a configuration file, or write the defaults there if it does
    /// not exist yet.
    pub fn from_file_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.save_to_file(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate language code
        if isolang::Language::from_639_1(&self.language).is_none() {
            return Err(anyhow!(
                "Invalid language code: {} (expected ISO 639-1, e.g. \"en\")",
                self.language
            ));
        }

        if self.generation.model.trim().is_empty() {
            return Err(anyhow!("Generation model must not be empty"));
        }

        if self.generation.temperature <= 0.0 || self.generation.temperature > 1.0 {
            return Err(anyhow!(
                "Temperature must be in (0.0, 1.0], got {}",
                self.generation.temperature
            ));
        }

        if self.generation.max_words_per_sentence == 0 {
            return Err(anyhow!("Max words per sentence must be at least 1"));
        }

        if self.extraction.attribute.trim().is_empty() {
            return Err(anyhow!("Extraction attribute must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            generation: GenerationConfig::default(),
            pictograms: PictogramConfig::default(),
            extraction: ExtractionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
