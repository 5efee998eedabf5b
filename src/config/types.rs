use serde::{Deserialize, Serialize};
use tvsort_matcher::MatcherConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Trace-level output for the tvsort crates
    #[serde(default)]
    pub verbose: bool,

    /// Explicit `EnvFilter` directives; `RUST_LOG` still takes precedence
    #[serde(default)]
    pub filter: Option<String>,
}
