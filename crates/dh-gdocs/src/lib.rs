//! Document API integration for docshelp.
//!
//! This crate provides:
//! - [`types`]: the document tree as tagged variants, deserialized from the API
//! - [`DocumentSource`]: the fetch contract consumed by the extraction pass
//! - [`DocsClient`]: a blocking HTTP implementation of [`DocumentSource`]
//! - `mock::MockDocs` and `mock::DocumentBuilder` for testing (behind `mock` feature flag)

mod client;
mod error;
#[cfg(feature = "mock")]
pub mod mock;
mod source;
pub mod types;

pub use client::DocsClient;
pub use error::DocsError;
pub use source::DocumentSource;
