//! Configuration loading from toolbridge.toml and the environment.

use mcp::Interpreters;
use runtime::providers::DEFAULT_BASE_URL;
use runtime::{DEFAULT_MAX_TOOL_ROUNDS, OpenAiBackend};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "toolbridge.toml";

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Query processing limits.
    #[serde(default)]
    pub session: SessionConfig,

    /// How server scripts are launched.
    #[serde(default)]
    pub server: ServerSection,
}

/// Chat-completion backend configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// API key. `OPENAI_API_KEY` takes precedence when set.
    pub api_key: Option<String>,

    /// Model to use. `TOOLBRIDGE_MODEL` takes precedence when set.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root. `OPENAI_BASE_URL` takes precedence when set.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub max_tokens: Option<u32>,

    pub system_prompt: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: None,
            system_prompt: None,
        }
    }
}

/// Query processing configuration.
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Tool rounds a single query may run.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

/// Server launch configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ServerSection {
    /// Interpreter for `.py` scripts.
    pub python: Option<String>,

    /// Runtime for `.js` scripts.
    pub node: Option<String>,

    /// Extra environment variables for the server process.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl ServerSection {
    pub fn interpreters(&self) -> Interpreters {
        let defaults = Interpreters::default();
        Interpreters {
            python: self.python.clone().unwrap_or(defaults.python),
            node: self.node.clone().unwrap_or(defaults.node),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_tool_rounds() -> usize {
    DEFAULT_MAX_TOOL_ROUNDS
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the configuration for this run, then apply environment overrides.
    ///
    /// An explicit path must exist. Without one, `toolbridge.toml` in the
    /// working directory is used if present, defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from environment variables.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("OPENAI_API_KEY") {
            self.backend.api_key = Some(key);
        }
        if let Some(url) = var("OPENAI_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Some(model) = var("TOOLBRIDGE_MODEL") {
            self.backend.model = model;
        }
    }

    /// The API key. Required before anything is spawned.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.backend
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Build the model backend.
    pub fn backend(&self) -> Result<OpenAiBackend, ConfigError> {
        let mut builder = OpenAiBackend::builder(self.api_key()?, &self.backend.model)
            .base_url(&self.backend.base_url);
        if let Some(max_tokens) = self.backend.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(system) = &self.backend.system_prompt {
            builder = builder.system(system);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("API key not configured: set OPENAI_API_KEY or backend.api_key")]
    MissingApiKey,
}
