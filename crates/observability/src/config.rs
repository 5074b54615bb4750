//! Configuration for logging

use serde::{Deserialize, Serialize};

/// Default filter when neither the config nor the environment sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Filter directive (e.g. "info", "ketname_core=debug")
    /// Defaults to "warn" if not set
    #[serde(default)]
    pub log_level: Option<String>,

    /// Colored output on stderr
    #[serde(default = "default_ansi")]
    pub ansi: bool,

    /// Print the event target (module path) on each line
    #[serde(default)]
    pub with_target: bool,
}

fn default_service_name() -> String {
    "ketname".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: None,
            ansi: default_ansi(),
            with_target: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `KETNAME_LOG` or `RUST_LOG` → log_level
    /// - `NO_COLOR` → disables ansi
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("KETNAME_LOG").or_else(|| lookup("RUST_LOG"));
        let ansi = lookup("NO_COLOR").is_none();

        Self {
            log_level,
            ansi,
            ..Default::default()
        }
    }

    /// Filter directive that will actually be used.
    pub fn effective_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
