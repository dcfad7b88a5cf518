//! Embedded content download.

use tracing::info;

use super::{DocsClient, checked_body};
use crate::error::DocsError;

impl DocsClient {
    /// Download raw bytes of an embedded image.
    ///
    /// Content URIs are pre-signed, so no `Authorization` header is sent.
    pub(crate) fn get_content(&self, uri: &str) -> Result<Vec<u8>, DocsError> {
        info!("Downloading content {}", uri);

        let response = self.agent.get(uri).call()?;
        let bytes = checked_body(response)?.read_to_vec()?;
        Ok(bytes)
    }
}
