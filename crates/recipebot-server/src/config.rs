//! Server settings read from the process environment.

use recipebot_core::RecipeBotError;
use recipebot_core::config::RecallOptions;
use recipebot_core::error::Result;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7860;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub recall: RecallOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            recall: RecallOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Reads RECIPEBOT_HOST, RECIPEBOT_PORT and RECIPEBOT_TRIM_KEYWORD_PUNCTUATION.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("RECIPEBOT_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(raw) = lookup("RECIPEBOT_PORT") {
            config.port = raw.trim().parse().map_err(|_| {
                RecipeBotError::config(format!("RECIPEBOT_PORT must be a port number, got '{raw}'"))
            })?;
        }

        if let Some(raw) = lookup("RECIPEBOT_TRIM_KEYWORD_PUNCTUATION") {
            config.recall.trim_punctuation = parse_flag(&raw).ok_or_else(|| {
                RecipeBotError::config(format!(
                    "RECIPEBOT_TRIM_KEYWORD_PUNCTUATION must be true or false, got '{raw}'"
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
