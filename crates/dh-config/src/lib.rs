//! Configuration management for docshelp.
//!
//! Parses `docshelp.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.base_url`
//! - every value of `help.credentials`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the help extraction enabled flag.
    pub enabled: Option<bool>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
    /// Override cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Override document API base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docshelp.toml";

/// Default cache tag the extraction pass is stored under.
pub const DEFAULT_CACHE_TAG: &str = "google_docs_help";

/// Default lifetime of a cached extraction pass (one hour).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Help extraction configuration.
    pub help: HelpConfig,
    /// Document API configuration.
    pub api: ApiConfig,
    /// Cache configuration (paths are relative strings from TOML).
    cache: CacheConfigRaw,

    /// Resolved cache configuration (set after loading).
    #[serde(skip)]
    pub cache_resolved: CacheConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Help extraction configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Whether help extraction runs at all.
    pub enabled: bool,
    /// Opaque credentials for the document API.
    pub credentials: CredentialsConfig,
    /// Documents to extract, in order.
    pub documents: Vec<DocumentEntry>,
    /// Cache key the extraction pass is stored under.
    pub cache_tag: String,
    /// Lifetime of a cached extraction pass in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            credentials: CredentialsConfig::default(),
            documents: Vec::new(),
            cache_tag: DEFAULT_CACHE_TAG.to_owned(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Role a configured document plays for its locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// Administrative help document.
    Admin,
    /// End-user help document.
    Client,
}

/// A resolved document reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef<'a> {
    /// Locale the document is written in.
    pub locale: &'a str,
    /// Which subsystem the document documents.
    pub role: DocumentRole,
    /// Remote document ID.
    pub document_id: &'a str,
}

impl HelpConfig {
    /// Resolve configured documents into `(locale, role, id)` references.
    ///
    /// Entries without a locale are skipped, as are empty document IDs.
    /// Order follows the configuration, admin before client per entry.
    #[must_use]
    pub fn document_ids(&self) -> Vec<DocumentRef<'_>> {
        let mut refs = Vec::new();
        for entry in &self.documents {
            if entry.locale.is_empty() {
                continue;
            }
            let slots = [
                (DocumentRole::Admin, entry.admin_doc_id.as_deref()),
                (DocumentRole::Client, entry.client_doc_id.as_deref()),
            ];
            for (role, id) in slots {
                if let Some(id) = id.filter(|id| !id.is_empty()) {
                    refs.push(DocumentRef {
                        locale: &entry.locale,
                        role,
                        document_id: id,
                    });
                }
            }
        }
        refs
    }
}

/// One `[[help.documents]]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentEntry {
    /// Locale code (e.g. "en").
    pub locale: String,
    /// Document holding administrative help.
    pub admin_doc_id: Option<String>,
    /// Document holding end-user help.
    pub client_doc_id: Option<String>,
}

/// Document API credentials.
///
/// Only `access_token` is interpreted. The remaining keys (service-account
/// fields such as `client_email` or `private_key`) are carried opaquely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    /// Bearer token sent with every API request.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Other credential fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Document API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL.
    pub base_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.googleapis.com/v1".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Raw cache configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CacheConfigRaw {
    enabled: Option<bool>,
    dir: Option<String>,
}

/// Resolved cache configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CacheConfig {
    /// Whether the extraction pass is cached on disk.
    pub enabled: bool,
    /// Cache root directory.
    pub dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`help.credentials.access_token`").
        field: String,
        /// Error message (e.g., "${`DOCS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docshelp.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(enabled) = settings.enabled {
            self.help.enabled = enabled;
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache_resolved.enabled = cache_enabled;
        }
        if let Some(cache_dir) = &settings.cache_dir {
            self.cache_resolved.dir.clone_from(cache_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.api.base_url.clone_from(base_url);
        }
    }

    /// Get validated credentials.
    ///
    /// Use this instead of accessing `help.credentials` directly when a real
    /// API client is about to be built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no access token is configured.
    pub fn require_credentials(&self) -> Result<&CredentialsConfig, ConfigError> {
        let credentials = &self.help.credentials;
        let token = credentials.access_token.as_deref().ok_or_else(|| {
            ConfigError::Validation("help.credentials.access_token is required".into())
        })?;
        require_non_empty(token, "help.credentials.access_token")?;
        Ok(credentials)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            help: HelpConfig::default(),
            api: ApiConfig::default(),
            cache: CacheConfigRaw::default(),
            cache_resolved: CacheConfig {
                enabled: true,
                dir: base.join(".docshelp").join("cache"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_api()?;
        self.validate_help()?;
        Ok(())
    }

    fn validate_api(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_help(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.help.cache_tag, "help.cache_tag")?;
        if self.help.cache_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "help.cache_ttl_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;

        let credentials = &mut self.help.credentials;
        if let Some(ref token) = credentials.access_token {
            credentials.access_token = Some(expand::expand_env(
                token,
                "help.credentials.access_token",
            )?);
        }
        for (key, value) in &mut credentials.extra {
            *value = expand::expand_env(value, &format!("help.credentials.{key}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let dir = self
            .cache
            .dir
            .as_deref()
            .map_or_else(|| config_dir.join(".docshelp").join("cache"), |d| config_dir.join(d));

        self.cache_resolved = CacheConfig {
            enabled: self.cache.enabled.unwrap_or(true),
            dir,
        };
    }
}
