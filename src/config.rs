use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

use crate::provider::KNOWN_PROVIDERS;
use crate::store::IdScheme;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebchatConfig {
    pub gateway: GatewayConfig,
    pub generator: GeneratorConfig,
    pub sessions: SessionsConfig,
}

#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    8000
}
fn default_bind() -> String {
    "0.0.0.0".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Text prepended to the prompt by the echo backend.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            prefix: default_prefix(),
        }
    }
}

fn default_provider() -> String {
    "echo".into()
}
fn default_prefix() -> String {
    "Echo: ".into()
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SessionsConfig {
    #[serde(default)]
    pub id_scheme: IdScheme,
}

/// Load configuration from file or use defaults.
///
/// Search order:
/// 1. `WEBCHAT_CONFIG` env var
/// 2. `~/.webchat/config.toml`
/// 3. Zero-config defaults (no file needed)
pub fn load() -> anyhow::Result<WebchatConfig> {
    let path = config_path();

    if path.exists() {
        let config = load_from(&path)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    } else {
        info!("no config file found, using zero-config defaults");
        Ok(WebchatConfig::default())
    }
}

/// Read, parse and validate a config file.
pub fn load_from(path: &std::path::Path) -> anyhow::Result<WebchatConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let config: WebchatConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;
    validate(&config)?;
    Ok(config)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("WEBCHAT_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".webchat").join("config.toml")
}

/// Validate the config and return clear error messages.
pub fn validate(config: &WebchatConfig) -> anyhow::Result<()> {
    if !KNOWN_PROVIDERS.contains(&config.generator.provider.as_str()) {
        anyhow::bail!(
            "invalid provider '{}': must be one of {:?}",
            config.generator.provider,
            KNOWN_PROVIDERS
        );
    }

    if config.gateway.port == 0 {
        anyhow::bail!("gateway.port must be > 0");
    }

    if config.gateway.bind.trim().is_empty() {
        anyhow::bail!("gateway.bind must not be empty");
    }

    Ok(())
}
