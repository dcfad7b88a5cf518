//! CLI error types.

use dh_cache::CacheError;
use dh_config::ConfigError;
use dh_gdocs::DocsError;
use dh_help::HelpError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Docs(#[from] DocsError),

    #[error("{0}")]
    Help(#[from] HelpError),

    #[error("{0}")]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
