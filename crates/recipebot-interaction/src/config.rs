//! Configuration file management for RecipeBot.
//!
//! Supports reading secrets from `~/.config/recipebot/secret.json`.

use recipebot_core::RecipeBotError;
use recipebot_core::config::SecretConfig;
use recipebot_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the secret configuration file from ~/.config/recipebot/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    load_secret_config_from(&secret_config_path()?)
}

/// Loads a secret configuration file from an explicit path.
///
/// A missing or unreadable file is an `Io` error; malformed JSON is a
/// `Serialization` error. Both name the path but never the file contents.
pub fn load_secret_config_from(config_path: &Path) -> Result<SecretConfig> {
    let content = fs::read_to_string(config_path).map_err(|e| {
        RecipeBotError::io(format!("{} ({:?})", config_path.display(), e.kind()))
    })?;

    serde_json::from_str(&content).map_err(|e| RecipeBotError::Serialization {
        format: "JSON".to_string(),
        message: format!("{}: {}", config_path.display(), e),
    })
}

/// ~/.config/recipebot/secret.json
fn secret_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RecipeBotError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("recipebot").join("secret.json"))
}
