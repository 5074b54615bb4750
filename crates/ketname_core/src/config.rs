//! Layered configuration: defaults, `.ketname.toml`, environment, flags.
//!
//! ```toml
//! provider = "gemini"
//! model = "gemini-2.5-flash-lite"
//! base_url = "http://localhost:8080/v1beta/"
//! domain_knowledge = ["docs/glossary.md", "/abs/terms.txt"]
//! ```
//!
//! Relative `domain_knowledge` paths resolve against the directory holding
//! the config file. Credentials never live here.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ketname_llms::providers::gemini::GeminiConfig;
use ketname_llms::providers::openai::OpenAiConfig;
use ketname_llms::{GeminiProvider, OpenAiProvider, Provider};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".ketname.toml";
pub const DEFAULT_PROVIDER: &str = GeminiProvider::ID;

pub const ENV_PROVIDER: &str = "KETNAME_PROVIDER";
pub const ENV_MODEL: &str = "KETNAME_MODEL";
pub const ENV_BASE_URL: &str = "KETNAME_BASE_URL";
pub const ENV_DOMAIN_KNOWLEDGE: &str = "KETNAME_DOMAIN_KNOWLEDGE";

const MAX_SEARCH_DEPTH: usize = 32;

/// On-disk shape of `.ketname.toml`. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
struct ConfigFile {
    provider: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    domain_knowledge: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KetnameConfig {
    /// Provider ID, `gemini` or `openai`.
    pub provider: String,
    /// Model override; `None` means the provider's default.
    pub model: Option<String>,
    /// Endpoint override for the provider.
    pub base_url: Option<String>,
    /// Domain-knowledge documents, in prompt order.
    pub domain_knowledge: Vec<PathBuf>,
    /// Base for relative knowledge paths.
    pub workspace_root: PathBuf,
    /// The config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
}

impl KetnameConfig {
    /// Defaults rooted at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: None,
            base_url: None,
            domain_knowledge: Vec::new(),
            workspace_root: workspace_root.into(),
            config_path: None,
        }
    }

    /// Load the config file above `start_dir` (if any), then apply the
    /// process environment. Without a config file the workspace root is
    /// `default_root`.
    pub fn load(start_dir: &Path, default_root: &Path) -> Result<Self, ConfigError> {
        Self::load_with(start_dir, default_root, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load) with a custom environment lookup.
    pub fn load_with<F>(
        start_dir: &Path,
        default_root: &Path,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match find_config_file(start_dir) {
            Some(path) => Self::from_file(&path)?,
            None => Self::new(default_root),
        };
        config.apply_lookup(lookup);
        tracing::debug!(
            provider = %config.provider,
            root = %config.workspace_root.display(),
            file = ?config.config_path,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Read one config file. Its parent directory becomes the workspace root.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&contents)?;

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::new(root);
        config.config_path = Some(path.to_path_buf());
        if let Some(provider) = file.provider {
            config.provider = provider;
        }
        config.model = file.model;
        config.base_url = file.base_url;
        config.domain_knowledge = file.domain_knowledge.unwrap_or_default();
        Ok(config)
    }

    /// Apply `KETNAME_*` overrides. Empty values are ignored.
    pub fn apply_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(provider) = get(ENV_PROVIDER) {
            self.provider = provider;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = Some(model);
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Some(paths) = get(ENV_DOMAIN_KNOWLEDGE) {
            self.domain_knowledge = std::env::split_paths(&OsString::from(paths)).collect();
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_domain_knowledge(mut self, paths: Vec<PathBuf>) -> Self {
        self.domain_knowledge = paths;
        self
    }

    /// The model that will actually be requested.
    pub fn effective_model(&self) -> Result<&str, ConfigError> {
        if let Some(model) = &self.model {
            return Ok(model);
        }
        match self.provider.as_str() {
            GeminiProvider::ID => Ok(GeminiConfig::DEFAULT_MODEL),
            OpenAiProvider::ID => Ok(OpenAiConfig::DEFAULT_MODEL),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    /// Instantiate the configured provider with its endpoint and model.
    pub fn build_provider(&self) -> Result<Arc<dyn Provider>, ConfigError> {
        let provider: Arc<dyn Provider> = match self.provider.as_str() {
            GeminiProvider::ID => {
                let mut config = GeminiConfig::new();
                if let Some(url) = &self.base_url {
                    config = config.with_base_url(url.clone());
                }
                if let Some(model) = &self.model {
                    config = config.with_model(model.clone());
                }
                Arc::new(GeminiProvider::new(config))
            }
            OpenAiProvider::ID => {
                let mut config = OpenAiConfig::new();
                if let Some(url) = &self.base_url {
                    config = config.with_base_url(url.clone());
                }
                if let Some(model) = &self.model {
                    config = config.with_model(model.clone());
                }
                Arc::new(OpenAiProvider::new(config))
            }
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };
        Ok(provider)
    }
}

/// Walk up from `start` looking for [`CONFIG_FILE_NAME`].
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_SEARCH_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
