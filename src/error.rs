//! Unified error handling for the smwgeo crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum, while keeping the
//! domain errors usable on their own.
//!
//! # Architecture
//!
//! - [`SmwErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use smwgeo::error::{Error, SmwErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         eprintln!("Transient failure, try again later: {}", err.summary());
//!     } else {
//!         eprintln!("Fatal error: {err}");
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{ConfigError, FetchError, ParseError};

/// Common trait for all smwgeo error types
pub trait SmwErrorTrait: std::error::Error {
    /// Check if this error is recoverable (a later attempt may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get a short user-facing description
    fn summary(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, status)
    Network,
    /// HTML and RDF parsing errors
    Parsing,
    /// Configuration and construction errors
    Config,
}

impl ErrorCategory {
    /// Get a human-readable name for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parse error",
            Self::Config => "configuration error",
        }
    }
}

impl SmwErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::Status { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }

    fn summary(&self) -> String {
        format!("{}: {self}", self.category().as_str())
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

impl SmwErrorTrait for ParseError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn summary(&self) -> String {
        format!("{}: {self}", self.category().as_str())
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

impl SmwErrorTrait for ConfigError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn summary(&self) -> String {
        format!("{}: {self}", self.category().as_str())
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Config
    }
}

/// Unified error type for the smwgeo crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse-specific errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Construction and configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SmwErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(e) => e.is_recoverable(),
            Self::Config(e) => e.is_recoverable(),
        }
    }

    fn summary(&self) -> String {
        match self {
            Self::Fetch(e) => e.summary(),
            Self::Parse(e) => e.summary(),
            Self::Config(e) => e.summary(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Parse(e) => e.category(),
            Self::Config(e) => e.category(),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
