//! Offline cache domain.
//!
//! A headless rendition of the site's service-worker contract: versioned
//! cache partitions, an install/activate lifecycle, per-class fetch
//! strategies, and page-posted control messages. The cache manager only
//! sees requests that its scope rules accept; everything else passes
//! through to the host untouched.

mod error;
mod policy;
mod service;
mod store;

pub use error::CacheError;
pub use policy::{RequestClass, classify, in_scope};
pub use service::{CacheManager, ControlMessage, FetchOutcome, PartitionNames};
pub use store::{CacheStore, CachedEntry, MemoryCacheStore};
