//! Document API REST client.
//!
//! Sync HTTP client for the documents endpoint with bearer-token
//! authentication.

mod content;
mod documents;

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::error::DocsError;

/// Document API client.
pub struct DocsClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl DocsClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g. `https://docs.googleapis.com/v1`)
    /// * `access_token` - OAuth bearer token
    /// * `timeout` - Global timeout applied to every request
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Config`] if the base URL or token is empty.
    pub fn from_config(
        base_url: &str,
        access_token: &str,
        timeout: Duration,
    ) -> Result<Self, DocsError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DocsError::Config("base URL is empty".to_owned()));
        }
        if access_token.is_empty() {
            return Err(DocsError::Config("access token is empty".to_owned()));
        }

        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            base_url: base_url.to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    /// Value of the `Authorization` header.
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Turn an error status into [`DocsError::HttpResponse`], otherwise hand back the body.
fn checked_body(response: Response<ureq::Body>) -> Result<ureq::Body, DocsError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(DocsError::HttpResponse {
            status,
            body: error_body,
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let client = DocsClient::from_config(
            "https://docs.googleapis.com/v1/",
            "token",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://docs.googleapis.com/v1");
        assert_eq!(client.auth_header(), "Bearer token");
    }

    #[test]
    fn test_from_config_rejects_empty_token() {
        let result = DocsClient::from_config("https://example.com", "", Duration::from_secs(5));
        assert!(matches!(result, Err(DocsError::Config(_))));
    }

    #[test]
    fn test_from_config_rejects_empty_base_url() {
        let result = DocsClient::from_config("/", "token", Duration::from_secs(5));
        assert!(matches!(result, Err(DocsError::Config(_))));
    }
}
