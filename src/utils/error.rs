//! Error types for the smwgeo resolver
//!
//! This module defines the domain error types used throughout the crate.
//! "Not found" outcomes (missing label, attribute or coordinate) are never
//! errors; they are represented with `Option` by the callers.

use thiserror::Error;

/// Errors that can occur while fetching wiki pages and RDF exports
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while parsing HTML pages or RDF documents
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed RDF/XML document
    #[error("Malformed RDF/XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader error message
        message: String,
    },

    /// RDF document ended before all elements were closed
    #[error("Unexpected end of RDF document inside <{0}>")]
    UnexpectedEof(String),

    /// Invalid CSS selector built from a MIME type
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised while constructing a resolver
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The page URL template must contain the placeholder exactly once
    #[error("Format URL must contain '%s' exactly once, found {found} in {template}")]
    InvalidFormatUrl {
        /// The rejected template
        template: String,
        /// Number of placeholders found
        found: usize,
    },

    /// HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
