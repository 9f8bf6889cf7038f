//! Hash router domain.
//!
//! Maps fragment paths to page components, owns the route table and the
//! current-route state, and drives the full navigation sequence
//! including document metadata. Navigation failures never escape; the
//! worst outcome a caller sees is [`NavigationOutcome::RenderedError`].

mod metadata;
pub(crate) mod route;
mod service;

pub use metadata::PageMetadata;
pub use route::{ResolvedRoute, Route, RoutePattern, normalize_path};
pub use service::{
    NavigationOutcome, NavigationSequence, PostRender, Router, default_routes,
};
