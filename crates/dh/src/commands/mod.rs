//! CLI command implementations.

mod headings;
mod route;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use dh_cache::{Cache, CacheBucket, FileCache, NullCache};
use dh_config::{CliSettings, Config};
use dh_gdocs::types::Document;
use dh_gdocs::{DocsClient, DocsError, DocumentSource};
use dh_help::HelpService;
use serde_json::Value;

use crate::VERSION;
use crate::error::CliError;
use crate::output::Output;

pub(crate) use headings::HeadingsArgs;
pub(crate) use route::RouteArgs;

/// Cache bucket the extraction pass lives in.
const CACHE_BUCKET: &str = "help";

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover docshelp.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Bypass the on-disk cache.
    #[arg(long, global = true)]
    no_cache: bool,
}

impl GlobalArgs {
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            cache_enabled: self.no_cache.then_some(false),
            ..Default::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Build the help service from configuration.
    fn service(&self) -> Result<HelpService, CliError> {
        let config = self.load_config()?;
        let source = document_source(&config)?;
        Ok(HelpService::new(&config, source, cache_bucket(&config)))
    }
}

/// Document source for the configured API.
///
/// Credentials are only required when extraction is enabled.
fn document_source(config: &Config) -> Result<Arc<dyn DocumentSource>, CliError> {
    if !config.help.enabled {
        return Ok(Arc::new(DisabledSource));
    }
    let credentials = config.require_credentials()?;
    let client = DocsClient::from_config(
        &config.api.base_url,
        credentials.access_token.as_deref().unwrap_or_default(),
        Duration::from_secs(config.api.timeout_secs),
    )?;
    Ok(Arc::new(client))
}

fn cache_bucket(config: &Config) -> Box<dyn CacheBucket> {
    if config.cache_resolved.enabled {
        FileCache::new(config.cache_resolved.dir.clone(), VERSION).bucket(CACHE_BUCKET)
    } else {
        NullCache.bucket(CACHE_BUCKET)
    }
}

/// Source for a disabled configuration; extraction never reaches it.
struct DisabledSource;

impl DocumentSource for DisabledSource {
    fn fetch_document(&self, _document_id: &str) -> Result<Document, DocsError> {
        Err(DocsError::Config("help extraction is disabled".to_owned()))
    }

    fn fetch_image(&self, _content_uri: &str) -> Result<Vec<u8>, DocsError> {
        Err(DocsError::Config("help extraction is disabled".to_owned()))
    }
}

/// Write a JSON value to stdout.
fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(io::stdout().lock(), "{rendered}")?;
    Ok(())
}

/// Execute the refresh command.
pub(crate) fn refresh(global: &GlobalArgs) -> Result<(), CliError> {
    let output = Output::new();
    let service = global.service()?;

    let extraction = service.refresh()?;
    output.extraction_errors(&extraction.errors);
    if extraction.store.is_empty() {
        output.warning("No help records extracted");
    } else {
        output.success(&format!("Cached {} help record(s)", extraction.store.len()));
    }
    Ok(())
}

/// Execute the clear-cache command.
pub(crate) fn clear_cache(global: &GlobalArgs) -> Result<(), CliError> {
    let output = Output::new();
    let service = global.service()?;

    service.clear_cache()?;
    output.success("Cached help content cleared");
    Ok(())
}
