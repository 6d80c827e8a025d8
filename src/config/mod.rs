mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, info};

/// Environment variable that takes precedence over `llm.api_key`.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = Config::from_yaml(&config_str)?;

    if let Ok(api_key) = env::var(API_KEY_ENV) {
        info!("Using API key from {}", API_KEY_ENV);
        config.llm.api_key = api_key;
    }

    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Rejects configurations that would reach the upstream API without a
    /// credential or model.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "llm.api_key is empty; set it in the config file or via {}",
                API_KEY_ENV
            )));
        }
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model is empty"));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(Error::config("llm.base_url is empty"));
        }
        Ok(())
    }
}
