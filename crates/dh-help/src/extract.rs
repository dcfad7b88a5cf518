//! One extraction pass over all configured documents.
//!
//! The pass runs in four stages:
//!
//! 1. Load every configured document in parallel. Failures are classified
//!    into [`Extraction::errors`] and the document is skipped.
//! 2. Index the headings and route annotations of each loaded document.
//! 3. Resolve embedded images in parallel, once per `(locale, image id)`.
//! 4. Walk each document and merge its records into one [`HelpStore`].

use std::collections::BTreeMap;

use dh_config::{DocumentRole, HelpConfig};
use dh_gdocs::types::{Document, InlineObject};
use dh_gdocs::{DocsError, DocumentSource};
use dh_render::{
    DocumentIndex, HelpStore, ImageAsset, ImageAssets, Subsystem, WalkContext, walk_document,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::HelpError;

/// Message recorded for documents the credentials cannot read.
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to access the document";

/// Result of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Document fetch failures, in configuration order.
    pub errors: Vec<String>,
    /// Help records built from the documents that loaded.
    pub store: HelpStore,
}

/// A fetched document and where it belongs.
struct LoadedDocument<'a> {
    locale: &'a str,
    subsystem: Subsystem,
    document: Document,
}

/// Turn a document fetch failure into an error log entry.
#[must_use]
pub fn classify_fetch_error(err: &DocsError) -> String {
    let message = err.to_string();
    if message.contains("permission") {
        PERMISSION_DENIED_MESSAGE.to_owned()
    } else {
        message
    }
}

fn subsystem_for(role: DocumentRole) -> Subsystem {
    match role {
        DocumentRole::Admin => Subsystem::Admin,
        DocumentRole::Client => Subsystem::Client,
    }
}

/// Run an extraction pass.
///
/// A disabled configuration yields an empty result without touching
/// `source`.
///
/// # Errors
///
/// Returns [`HelpError::ImageFetch`] if an embedded image cannot be
/// downloaded.
pub fn extract(help: &HelpConfig, source: &dyn DocumentSource) -> Result<Extraction, HelpError> {
    if !help.enabled {
        return Ok(Extraction::default());
    }

    let (documents, errors) = load_documents(help, source);

    let indexes: BTreeMap<(&str, &str), DocumentIndex> = documents
        .iter()
        .map(|loaded| {
            let key = (loaded.locale, loaded.document.document_id.as_str());
            (key, DocumentIndex::build(&loaded.document.body.content))
        })
        .collect();

    let images = resolve_images(&documents, source)?;
    let no_images = ImageAssets::new();

    let mut store = HelpStore::new();
    for loaded in &documents {
        let key = (loaded.locale, loaded.document.document_id.as_str());
        let Some(index) = indexes.get(&key) else {
            continue;
        };
        let ctx = WalkContext {
            index,
            images: images.get(loaded.locale).unwrap_or(&no_images),
            subsystem: loaded.subsystem,
        };
        store.extend(
            loaded.locale,
            loaded.subsystem,
            walk_document(&loaded.document, &ctx),
        );
    }

    info!(
        "Extracted {} help record(s) from {} document(s), {} error(s)",
        store.len(),
        documents.len(),
        errors.len()
    );
    Ok(Extraction { errors, store })
}

/// Fetch every configured document, keeping configuration order.
fn load_documents<'a>(
    help: &'a HelpConfig,
    source: &dyn DocumentSource,
) -> (Vec<LoadedDocument<'a>>, Vec<String>) {
    let refs = help.document_ids();
    info!("Loading {} help document(s)", refs.len());

    let results: Vec<_> = refs
        .par_iter()
        .map(|r| source.fetch_document(r.document_id))
        .collect();

    let mut documents = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for (r, result) in refs.iter().zip(results) {
        match result {
            Ok(document) => documents.push(LoadedDocument {
                locale: r.locale,
                subsystem: subsystem_for(r.role),
                document,
            }),
            Err(err) => {
                warn!("Failed to load document {}: {}", r.document_id, err);
                errors.push(classify_fetch_error(&err));
            }
        }
    }
    (documents, errors)
}

/// Download and encode every image referenced by the loaded documents.
fn resolve_images<'a>(
    documents: &[LoadedDocument<'a>],
    source: &dyn DocumentSource,
) -> Result<BTreeMap<&'a str, ImageAssets>, HelpError> {
    let mut unique: BTreeMap<(&'a str, &str), &InlineObject> = BTreeMap::new();
    for loaded in documents {
        for (id, object) in &loaded.document.inline_objects {
            if object.content_uri().is_some() {
                unique.entry((loaded.locale, id.as_str())).or_insert(object);
            }
        }
    }
    if unique.is_empty() {
        return Ok(BTreeMap::new());
    }
    info!("Resolving {} image(s)", unique.len());

    let jobs: Vec<_> = unique.into_iter().collect();
    let resolved: Vec<_> = jobs
        .par_iter()
        .map(|&((locale, id), object)| {
            let uri = object.content_uri().unwrap_or_default();
            let bytes = source
                .fetch_image(uri)
                .map_err(|err| HelpError::ImageFetch {
                    image_id: id.to_owned(),
                    source: err,
                })?;
            Ok((locale, id, ImageAsset::for_object(object, &bytes)))
        })
        .collect::<Result<_, HelpError>>()?;

    let mut images: BTreeMap<&str, ImageAssets> = BTreeMap::new();
    for (locale, id, asset) in resolved {
        if let Some(asset) = asset {
            images
                .entry(locale)
                .or_default()
                .insert(id.to_owned(), asset);
        }
    }
    Ok(images)
}
