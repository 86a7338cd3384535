use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{bail, Context};
use client_core::{config, GatewayConfig};
use url::Url;

pub const CONFIG_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub server_url: String,
    pub api_prefix: String,
    pub token_path: PathBuf,
    pub currency_symbol: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            api_prefix: config::DEFAULT_API_PREFIX.into(),
            token_path: PathBuf::from("./data/session.toml"),
            currency_symbol: config::DEFAULT_CURRENCY_SYMBOL.into(),
        }
    }
}

impl ConsoleSettings {
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            server_url: self.server_url.clone(),
            api_prefix: self.api_prefix.clone(),
            currency_symbol: self.currency_symbol.clone(),
            ..GatewayConfig::default()
        }
    }
}

pub fn load_settings() -> ConsoleSettings {
    resolve_settings(fs::read_to_string(CONFIG_FILE).ok().as_deref(), |key| {
        std::env::var(key).ok()
    })
}

/// Defaults, then the config file, then environment variables.
pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ConsoleSettings {
    let mut settings = ConsoleSettings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("api_prefix") {
                settings.api_prefix = v.clone();
            }
            if let Some(v) = file_cfg.get("token_path") {
                settings.token_path = PathBuf::from(v);
            }
            if let Some(v) = file_cfg.get("currency_symbol") {
                settings.currency_symbol = v.clone();
            }
        }
    }

    if let Some(v) = env("BACKOFFICE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__API_PREFIX") {
        settings.api_prefix = v;
    }
    if let Some(v) = env("APP__TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__CURRENCY_SYMBOL") {
        settings.currency_symbol = v;
    }

    settings
}

pub fn validate_server_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("server url '{raw}' must use http or https");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
