//! Logging setup for embedders that want tvsort's diagnostics.

use anyhow::Result;

use crate::config::LoggingConfig;

/// Filter directives used when neither `RUST_LOG` nor a configured filter is set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "tvsort=trace,tvsort_matcher=trace,tvsort_common=debug"
    } else {
        "tvsort=debug,tvsort_matcher=debug"
    }
}

/// Resolve the filter directives for `config`.
///
/// `RUST_LOG` wins over the configured filter, which wins over the defaults.
pub fn filter_directives(config: &LoggingConfig) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .or_else(|| config.filter.clone())
        .unwrap_or_else(|| default_filter(config.verbose).to_string())
}

/// Install a global `fmt` subscriber.
pub fn init(verbose: bool) -> Result<()> {
    init_with(&LoggingConfig {
        verbose,
        filter: None,
    })
}

/// Install a global `fmt` subscriber configured by `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_with(config: &LoggingConfig) -> Result<()> {
    let env_filter = filter_directives(config);

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters() {
        assert_eq!(default_filter(false), "tvsort=debug,tvsort_matcher=debug");
        assert!(default_filter(true).contains("tvsort_matcher=trace"));
    }

    #[test]
    fn test_configured_filter_used_without_rust_log() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            verbose: false,
            filter: Some("tvsort_matcher=trace".into()),
        };
        assert_eq!(filter_directives(&config), "tvsort_matcher=trace");
        assert_eq!(
            filter_directives(&LoggingConfig::default()),
            default_filter(false)
        );
    }
}
