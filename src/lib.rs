//! smwgeo - Semantic MediaWiki geocoder
//!
//! Resolves place names to coordinates using the RDF exports published by
//! Semantic MediaWiki sites, following "located in" style relations when
//! an article carries no coordinates of its own.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`fetcher`] - Page fetching with rate limiting
//! - [`parser`] - RDF link discovery, RDF/XML parsing, coordinate parsing
//! - [`geocoder`] - The resolver and its traversal
//! - [`models`] - Core data structures and types
//! - [`utils`] - Name normalization and URL helpers
//!
//! # Example
//!
//! ```no_run
//! use smwgeo::config::Config;
//! use smwgeo::geocoder::SemanticWikiResolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let resolver = SemanticWikiResolver::from_config(&config)?;
//!     let (label, (latitude, longitude)) = resolver.geocode("Berlin").await?.into_parts();
//!     println!("{label:?}: {latitude:?}, {longitude:?}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod geocoder;
pub mod models;
pub mod parser;
pub mod utils;

// Direct re-exports for convenience
pub use geocoder::SemanticWikiResolver;
pub use models::{Location, Point};
