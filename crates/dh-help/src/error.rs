//! Error types for help extraction.

use dh_gdocs::DocsError;

/// Error that aborts an extraction pass.
///
/// Document fetch failures are not errors: they are collected into
/// [`Extraction::errors`](crate::Extraction::errors) and the pass goes on.
#[derive(Debug, thiserror::Error)]
pub enum HelpError {
    /// An embedded image could not be downloaded.
    #[error("failed to fetch image {image_id}")]
    ImageFetch {
        /// Inline object ID of the image.
        image_id: String,
        /// Underlying fetch error.
        #[source]
        source: DocsError,
    },
}
