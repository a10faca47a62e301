//! src/config.rs

use crate::errors::CommitError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "CLAUDE_API_KEY";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Represents the main configuration for the application.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Remote assistant settings.
    pub llm: LLMConfig,
    /// Interactive loop settings.
    pub session: SessionConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on generated tokens per reply.
    pub max_tokens: u32,
    /// Full URL of the messages endpoint.
    pub api_url: String,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Editor command for the edit choice. `None` defers to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// On reject, tell the assistant the suggestion was turned down instead
    /// of resending the identical request.
    pub reject_hint: bool,
}

/// Returns the path of the config file: $GITCOMMIT_CONFIG, else
/// `<config_dir>/gitcommit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("GITCOMMIT_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("gitcommit").join("config.toml"))
}

impl Config {
    /// Loads the config file if one exists and applies environment overrides.
    /// A missing file is not an error; nothing is written to disk.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Could not read config file {}", path.display()))?;
                log::debug!("loaded config from {}", path.display());
                Self::parse(&content, &path.display().to_string())?
            }
            _ => Config::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            CommitError::InvalidConfig {
                path: origin.to_string(),
                reason: e.message().to_string(),
            }
            .into()
        })
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(model) = lookup("CLAUDE_MODEL") {
            self.llm.model = model;
        }
        if let Some(url) = lookup("CLAUDE_API_URL") {
            self.llm.api_url = url;
        }
        if let Some(raw) = lookup("CLAUDE_MAX_TOKENS") {
            self.llm.max_tokens = raw.trim().parse().map_err(|_| CommitError::InvalidConfig {
                path: "CLAUDE_MAX_TOKENS".to_string(),
                reason: format!("expected a positive integer, got {raw:?}"),
            })?;
        }
        if let Some(editor) = lookup("GITCOMMIT_EDITOR") {
            self.session.editor = Some(editor);
        }
        Ok(())
    }

    /// Returns the API credential from the environment.
    pub fn api_key() -> Result<String> {
        read_api_key(|key| env::var(key).ok())
    }
}

fn read_api_key(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    lookup(API_KEY_VAR)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| CommitError::MissingApiKey { var: API_KEY_VAR }.into())
}
