//! ketname observability - logging setup shared by the ketname binaries
//!
//! Installs a `tracing-subscriber` registry with an env filter and a stderr
//! fmt layer. Stdout stays free for command output.
//!
//! # Quick Start
//!
//! ```no_run
//! use ketname_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("ketname").with_log_level("debug");
//! init(config)?;
//!
//! // Or read the settings from environment variables
//! // init(ObservabilityConfig::from_env())?;
//!
//! tracing::info!("ready");
//! # Ok::<(), ketname_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `KETNAME_LOG` or `RUST_LOG` - Log level filter (default `warn`)
//! - `NO_COLOR` - disable ANSI colors in log lines

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::init;
pub use self::tracing::{record_duration, record_error};
