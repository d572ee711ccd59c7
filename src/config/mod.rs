mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = load_from_path(&config_path).await?;
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}

/// Overlays deployment values (`PORT`, channel and Face credentials) on top of
/// the file. `lookup` resolves a variable name to its value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("PORT is not a valid port number: '{}'", port)))?;
    }
    if let Some(secret) = lookup("LINE_CHANNEL_SECRET") {
        config.line.channel_secret = secret;
    }
    if let Some(token) = lookup("LINE_CHANNEL_ACCESS_TOKEN") {
        config.line.channel_access_token = token;
    }
    if let Some(endpoint) = lookup("FACE_ENDPOINT") {
        config.face.endpoint = endpoint;
    }
    if let Some(key) = lookup("FACE_API_KEY") {
        config.face.key = key;
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("line.channel_secret", &self.line.channel_secret),
            ("line.channel_access_token", &self.line.channel_access_token),
            ("face.endpoint", &self.face.endpoint),
            ("face.key", &self.face.key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{} must not be empty", name)));
            }
        }
        if self.server.max_concurrent_events == 0 {
            return Err(Error::config("server.max_concurrent_events must be at least 1"));
        }
        Ok(())
    }
}
