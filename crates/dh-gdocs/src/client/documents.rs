//! Document retrieval.

use tracing::info;

use super::{DocsClient, checked_body};
use crate::error::DocsError;
use crate::types::Document;

impl DocsClient {
    /// Get a document with pending suggestions inlined and marked.
    pub(crate) fn get_document(&self, document_id: &str) -> Result<Document, DocsError> {
        let url = format!(
            "{}/documents/{}?suggestionsViewMode=SUGGESTIONS_INLINE",
            self.base_url, document_id
        );

        info!("Getting document {}", document_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()?;

        let document: Document = checked_body(response)?.read_json()?;
        info!(
            "Loaded document {} ({} elements, {} inline objects)",
            document_id,
            document.body.content.len(),
            document.inline_objects.len()
        );
        Ok(document)
    }
}
