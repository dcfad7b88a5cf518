//! Cached help lookups.

use std::sync::Arc;
use std::time::Duration;

use dh_cache::{CacheBucket, CacheBucketExt, CacheError};
use dh_config::{Config, HelpConfig};
use dh_gdocs::DocumentSource;
use dh_render::{HeadingView, HelpRecord, Subsystem};
use serde::Serialize;
use tracing::info;

use crate::error::HelpError;
use crate::extract::{Extraction, extract};

/// Lookup result together with the error log of the pass it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpLookup<T> {
    /// Document fetch failures of the extraction pass.
    pub errors: Vec<String>,
    /// Requested content.
    pub content: T,
}

/// Help content service backed by a cached extraction pass.
///
/// The whole extraction result is stored under one cache key for the
/// configured TTL. Lookups reshape the cached result and never fetch on a
/// cache hit.
pub struct HelpService {
    help: HelpConfig,
    source: Arc<dyn DocumentSource>,
    bucket: Box<dyn CacheBucket>,
}

impl HelpService {
    /// Create a service.
    #[must_use]
    pub fn new(
        config: &Config,
        source: Arc<dyn DocumentSource>,
        bucket: Box<dyn CacheBucket>,
    ) -> Self {
        Self {
            help: config.help.clone(),
            source,
            bucket,
        }
    }

    fn ttl(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.help.cache_ttl_secs))
    }

    /// The cached extraction, running a pass on a miss.
    fn extraction(&self) -> Result<Extraction, HelpError> {
        self.bucket
            .get_or_insert_json(&self.help.cache_tag, self.ttl(), || {
                extract(&self.help, self.source.as_ref())
            })
    }

    /// Records for one route.
    ///
    /// Unknown locales, routes and subsystems yield no records.
    pub fn help_for_route(
        &self,
        locale: &str,
        route: &str,
        subsystem: Subsystem,
    ) -> Result<HelpLookup<Vec<HelpRecord>>, HelpError> {
        let extraction = self.extraction()?;
        let records = extraction
            .store
            .records_for_route(locale, route, subsystem)
            .to_vec();
        Ok(HelpLookup {
            errors: extraction.errors,
            content: records,
        })
    }

    /// All records regrouped by heading.
    ///
    /// With `show_warnings` off the error log is left empty.
    pub fn all_by_heading(
        &self,
        show_warnings: bool,
    ) -> Result<HelpLookup<HeadingView>, HelpError> {
        let extraction = self.extraction()?;
        Ok(HelpLookup {
            errors: if show_warnings {
                extraction.errors
            } else {
                Vec::new()
            },
            content: extraction.store.by_heading(),
        })
    }

    /// Drop the cached extraction so the next lookup runs a new pass.
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        info!("Clearing cached help ({})", self.help.cache_tag);
        self.bucket.delete(&self.help.cache_tag)
    }

    /// Run a new pass now and cache its result.
    pub fn refresh(&self) -> Result<Extraction, HelpError> {
        let extraction = extract(&self.help, self.source.as_ref())?;
        self.bucket.set_json(&self.help.cache_tag, &extraction, self.ttl());
        Ok(extraction)
    }
}
