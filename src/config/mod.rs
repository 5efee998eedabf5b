mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Default config file locations, in search order
pub const DEFAULT_PATHS: &[&str] = &["./tvsort.toml", "~/.config/tvsort/config.toml"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::debug!("No config file found, using defaults");
    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    config
        .matcher
        .validate()
        .context("Invalid [matcher] section")?;

    if config.matcher.max_chaff_prefix > 100 {
        tracing::warn!(
            "max_chaff_prefix of {} will anchor on series names deep inside file names",
            config.matcher.max_chaff_prefix
        );
    }

    Ok(())
}
