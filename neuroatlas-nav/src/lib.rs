pub mod entry;
pub mod navigator;
mod resolver_bridge;

// Re-export primary types for convenience.
pub use entry::EntryError;
pub use navigator::{Navigator, NavigatorStatus, Snapshot};
