//! Tool catalog service.
//!
//! The catalog is the read-mostly data store behind every page: tool and
//! category metadata plus pure lookup, filter, and search operations.
//! It is populated once at startup from the static tables in `data.rs`
//! and mutated only through explicit calls (never during a render), so
//! shared access is plain `Arc<ToolCatalog>` reads.

use tracing::info;

use super::data::{default_categories, default_tools};
use super::model::{Category, Tool};

/// In-memory catalog of tools and categories.
pub struct ToolCatalog {
    tools: Vec<Tool>,
    categories: Vec<Category>,
}

impl ToolCatalog {
    /// Build the catalog from the built-in data tables and derive
    /// category counts.
    pub fn new() -> Self {
        let mut catalog = Self {
            tools: default_tools(),
            categories: default_categories(),
        };
        catalog.refresh_counts();

        info!(
            "Catalog initialized: {} tools in {} categories",
            catalog.tools.len(),
            catalog.categories.len()
        );

        catalog
    }

    /// All tools, in catalog order.
    pub fn all_tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Tools flagged as popular, in catalog order.
    pub fn popular_tools(&self) -> Vec<&Tool> {
        self.tools.iter().filter(|t| t.popular).collect()
    }

    /// Look up a tool by id.
    pub fn tool_by_id(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// All tools in the given category.
    pub fn tools_by_category(&self, category_id: &str) -> Vec<&Tool> {
        self.tools
            .iter()
            .filter(|t| t.category == category_id)
            .collect()
    }

    /// All categories, in catalog order.
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Up to `limit` tools sharing the given tool's category, excluding
    /// the tool itself. Unknown ids yield an empty list.
    pub fn related_tools(&self, tool_id: &str, limit: usize) -> Vec<&Tool> {
        let Some(tool) = self.tool_by_id(tool_id) else {
            return Vec::new();
        };

        self.tools
            .iter()
            .filter(|t| t.category == tool.category && t.id != tool_id)
            .take(limit)
            .collect()
    }

    /// Case-insensitive substring search over name, description, and
    /// category. An empty or whitespace-only query returns every tool.
    pub fn search(&self, query: &str) -> Vec<&Tool> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.tools.iter().collect();
        }

        self.tools
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
                    || t.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Add a tool to the catalog and re-derive category counts.
    ///
    /// Used by startup registration and tests; never called during a
    /// render.
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.push(tool);
        self.refresh_counts();
    }

    /// Recompute every category's `count` from the live tool list.
    pub fn refresh_counts(&mut self) {
        for category in &mut self.categories {
            category.count = self
                .tools
                .iter()
                .filter(|t| t.category == category.id)
                .count();
        }
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_tools_and_categories() {
        let catalog = ToolCatalog::new();
        assert!(!catalog.all_tools().is_empty());
        assert_eq!(catalog.all_categories().len(), 9);
    }

    #[test]
    fn test_tool_by_id() {
        let catalog = ToolCatalog::new();
        let tool = catalog.tool_by_id("json-formatter").unwrap();
        assert_eq!(tool.name, "JSON Formatter");
        assert_eq!(tool.category, "data");
        assert!(catalog.tool_by_id("no-such-tool").is_none());
    }

    #[test]
    fn test_popular_tools_are_flagged() {
        let catalog = ToolCatalog::new();
        let popular = catalog.popular_tools();
        assert!(!popular.is_empty());
        assert!(popular.iter().all(|t| t.popular));
    }

    #[test]
    fn test_counts_derived_from_tool_list() {
        let catalog = ToolCatalog::new();
        for category in catalog.all_categories() {
            assert_eq!(
                category.count,
                catalog.tools_by_category(category.id).len(),
                "count drift for category {}",
                category.id
            );
        }
    }

    #[test]
    fn test_counts_follow_catalog_mutation() {
        let mut catalog = ToolCatalog::new();
        let before = catalog.category_by_id("time").unwrap().count;

        catalog.add_tool(Tool {
            id: "stopwatch",
            name: "Stopwatch",
            description: "Measure elapsed time",
            category: "time",
            popular: false,
        });

        assert_eq!(catalog.category_by_id("time").unwrap().count, before + 1);
    }

    #[test]
    fn test_related_tools_excludes_self_and_respects_limit() {
        let catalog = ToolCatalog::new();
        let related = catalog.related_tools("json-formatter", 3);

        assert!(related.len() <= 3);
        assert!(related.iter().all(|t| t.id != "json-formatter"));
        assert!(related.iter().all(|t| t.category == "data"));
    }

    #[test]
    fn test_related_tools_unknown_id() {
        let catalog = ToolCatalog::new();
        assert!(catalog.related_tools("no-such-tool", 3).is_empty());
    }

    #[test]
    fn test_search_matches_name_description_category() {
        let catalog = ToolCatalog::new();

        let by_name = catalog.search("JSON");
        assert!(by_name.iter().any(|t| t.id == "json-formatter"));

        let by_category = catalog.search("productivity");
        assert!(by_category.iter().any(|t| t.id == "qr-generator"));

        assert!(catalog.search("zzzzzz").is_empty());
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let catalog = ToolCatalog::new();
        assert_eq!(catalog.search("  ").len(), catalog.all_tools().len());
    }
}
