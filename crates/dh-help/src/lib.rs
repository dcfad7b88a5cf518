//! Help content extraction and lookup.
//!
//! [`extract`] runs one pass over the configured documents and produces an
//! [`Extraction`]: the help store plus an error log of documents that could
//! not be loaded. [`HelpService`] caches that pass and answers per-route and
//! by-heading lookups from it.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dh_cache::{Cache, MemoryCache};
//! use dh_config::Config;
//! use dh_gdocs::DocsClient;
//! use dh_help::HelpService;
//! use dh_render::Subsystem;
//!
//! let config = Config::load(None, None)?;
//! let client = DocsClient::from_config(&config.api.base_url, token, timeout)?;
//! let service = HelpService::new(&config, Arc::new(client), MemoryCache::new().bucket("help"));
//! let lookup = service.help_for_route("en", "admin_users", Subsystem::Admin)?;
//! ```

mod error;
mod extract;
mod service;

pub use error::HelpError;
pub use extract::{Extraction, PERMISSION_DENIED_MESSAGE, classify_fetch_error, extract};
pub use service::{HelpLookup, HelpService};
