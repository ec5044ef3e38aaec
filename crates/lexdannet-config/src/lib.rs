use std::env;

use serde::{Deserialize, Serialize};

use self::dannet::DanNetConfig;
use self::matcher::MatcherConfig;
use self::wikibase::WikibaseConfig;

pub mod dannet;
pub mod matcher;
pub mod wikibase;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dannet: DanNetConfig,
    pub wikibase: WikibaseConfig,
    pub matcher: MatcherConfig,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dannet: DanNetConfig::default(),
            wikibase: WikibaseConfig::default(),
            matcher: MatcherConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn new() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Overlay values from `lookup`, keyed by env var name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.dannet.apply_overrides(&lookup);
        self.wikibase.apply_overrides(&lookup);

        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }

        self
    }
}
