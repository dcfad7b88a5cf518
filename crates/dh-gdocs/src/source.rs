//! Document source abstraction.

use crate::client::DocsClient;
use crate::error::DocsError;
use crate::types::Document;

/// Where documents and their embedded images come from.
///
/// Implementations must be shareable across threads: documents and images
/// are fetched concurrently.
pub trait DocumentSource: Send + Sync {
    /// Fetch a document tree by ID.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] if the document cannot be retrieved or parsed.
    fn fetch_document(&self, document_id: &str) -> Result<Document, DocsError>;

    /// Fetch raw bytes of an embedded image.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] if the download fails.
    fn fetch_image(&self, content_uri: &str) -> Result<Vec<u8>, DocsError>;
}

impl DocumentSource for DocsClient {
    fn fetch_document(&self, document_id: &str) -> Result<Document, DocsError> {
        self.get_document(document_id)
    }

    fn fetch_image(&self, content_uri: &str) -> Result<Vec<u8>, DocsError> {
        self.get_content(content_uri)
    }
}
