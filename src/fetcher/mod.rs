//! Page fetching for the resolver
//!
//! The resolver only needs "give me the text behind this URL". That seam
//! is the [`PageFetcher`] trait; [`HttpFetcher`] is the reqwest-backed
//! implementation used in production.

pub mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use std::sync::Arc;

use crate::utils::error::FetchError;

/// Source of wiki pages and RDF exports
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the decoded body behind `url`
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure or non-success status.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}
