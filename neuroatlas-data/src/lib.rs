pub mod cache;
pub mod catalogue;
pub mod error;
pub mod lookup;
pub mod masks;
pub mod regions;

// Re-export primary types for convenience.
pub use cache::SessionCache;
pub use catalogue::Catalogue;
pub use error::DataError;
pub use lookup::{table_from_file, table_from_json};
pub use masks::MaskKey;
pub use regions::RegionIndex;

/// Convenience result type for the data crate.
pub type Result<T> = std::result::Result<T, DataError>;
