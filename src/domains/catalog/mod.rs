//! Tool catalog domain.
//!
//! Static tool and category metadata plus pure, synchronous lookup and
//! search operations. The catalog has no I/O and no async surface; every
//! page component reads from it through `Arc<ToolCatalog>`.

mod data;
mod model;
mod service;

pub use model::{Category, Tool};
pub use service::ToolCatalog;
