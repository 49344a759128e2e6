pub mod geocode;
pub mod inspect;

// Re-export command functions for convenience
pub use geocode::{geocode, resolve, ResolverArgs};
pub use inspect::inspect;
