//! Catalog entry types.

use serde::Serialize;

/// A single utility in the tool catalog.
///
/// Tools are immutable catalog entries; the interactive implementation
/// lives either in a registered [`ToolModule`](crate::domains::pages) or
/// in a legacy static page loaded on demand.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    /// Stable identifier used in routes (`/tool/<id>`) and page URLs.
    pub id: &'static str,

    /// Human-readable name.
    pub name: &'static str,

    /// One-line description shown on cards and in metadata.
    pub description: &'static str,

    /// Identifier of the category this tool belongs to.
    pub category: &'static str,

    /// Whether the tool is featured on the home page.
    pub popular: bool,
}

/// A tool category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Stable identifier used in routes (`/category/<id>`).
    pub id: &'static str,

    /// Human-readable name.
    pub name: &'static str,

    /// Emoji icon shown on category cards.
    pub icon: &'static str,

    /// One-line description.
    pub description: &'static str,

    /// Number of tools in this category. Derived: always recomputed from
    /// the tool list, never taken from static data.
    pub count: usize,
}
