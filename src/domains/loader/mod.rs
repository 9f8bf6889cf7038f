//! Legacy tool-page loader domain.
//!
//! Fetches standalone tool documents, extracts their content, and
//! re-hosts their scripts inside the shell with strict ordering,
//! once-only external loading, and per-tool cleanup. This domain exists
//! to keep unported tools working; tools ported to
//! [`ToolModule`](crate::domains::pages::ToolModule) bypass it entirely.

mod error;
mod extract;
mod standin;
mod service;

pub use error::LoaderError;
pub use extract::{LegacyDocument, RawScript, extract};
pub use service::{PreparedToolScripts, ToolPageLoader};
pub use standin::{DeliveredCall, StandInRegistry};
