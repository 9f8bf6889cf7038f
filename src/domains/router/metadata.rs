//! Per-navigation document metadata.
//!
//! Every successful navigation recomputes the full metadata set (title,
//! description, social tags, canonical URL, structured data, breadcrumb,
//! body class) and applies it to the document in one pass.

use serde_json::{Value, json};

use crate::core::config::SiteConfig;
use crate::core::host::DocumentHost;
use crate::domains::catalog::ToolCatalog;
use crate::domains::pages::PageComponent;

use super::route::ResolvedRoute;

/// The computed metadata for one navigation.
#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub structured_data: Value,
    pub breadcrumb: String,
    pub body_class: &'static str,
}

impl PageMetadata {
    /// Compute metadata for a resolved route. Tool and category pages
    /// specialize the title and structured data from catalog lookups.
    pub fn compute(resolved: &ResolvedRoute, catalog: &ToolCatalog, site: &SiteConfig) -> Self {
        let id = resolved.params.get("id").map(String::as_str);

        let mut title = resolved.route.title.clone();
        if let Some(id) = id {
            if let Some(tool) = catalog.tool_by_id(id) {
                title = format!("{} - {}", tool.name, site.name);
            } else if let Some(category) = catalog.category_by_id(id) {
                title = format!("{} Tools - {}", category.name, site.name);
            }
        }

        let canonical = format!("{}/#{}", site.origin, resolved.path);

        let known_tool = match (resolved.route.component, id) {
            (PageComponent::Tool, Some(id)) => catalog.tool_by_id(id),
            _ => None,
        };
        let structured_data = match known_tool {
            Some(tool) => json!({
                "@context": "https://schema.org",
                "@type": "WebApplication",
                "name": tool.name,
                "description": tool.description,
                "url": canonical,
            }),
            None => json!({
                "@context": "https://schema.org",
                "@type": "WebSite",
                "name": site.name,
                "url": canonical,
            }),
        };

        Self {
            title,
            description: resolved.route.description.clone(),
            canonical,
            structured_data,
            breadcrumb: breadcrumb_fragment(resolved, catalog),
            body_class: body_class(resolved),
        }
    }

    /// Apply the full metadata set to the document.
    pub fn apply(&self, document: &dyn DocumentHost, resolved: &ResolvedRoute) {
        document.set_title(&self.title);
        document.set_meta("description", &self.description);
        document.set_meta_property("og:title", &self.title);
        document.set_meta_property("og:description", &self.description);
        document.set_meta_property("og:url", &self.canonical);
        document.set_meta("twitter:title", &self.title);
        document.set_meta("twitter:description", &self.description);
        document.set_canonical(&self.canonical);
        document.set_structured_data(self.structured_data.clone());
        document.set_breadcrumb(&self.breadcrumb);
        document.set_active_nav(&resolved.path);
        document.set_body_class(self.body_class);
    }
}

/// Breadcrumb trail fragment. The home page gets an empty trail (hidden
/// container); every other page starts from Home.
fn breadcrumb_fragment(resolved: &ResolvedRoute, catalog: &ToolCatalog) -> String {
    let path = resolved.path.as_str();
    let id = resolved.params.get("id").map(String::as_str);

    let mut crumbs: Vec<(String, String)> = vec![("Home".to_string(), "/".to_string())];

    match resolved.route.component {
        PageComponent::Home => return String::new(),
        PageComponent::Tool => {
            crumbs.push(("Tools".to_string(), "/tools".to_string()));
            if let Some(tool) = id.and_then(|id| catalog.tool_by_id(id)) {
                crumbs.push((tool.name.to_string(), path.to_string()));
            }
        }
        PageComponent::Category => {
            crumbs.push(("Categories".to_string(), "/categories".to_string()));
            if let Some(category) = id.and_then(|id| catalog.category_by_id(id)) {
                crumbs.push((category.name.to_string(), path.to_string()));
            }
        }
        PageComponent::Tools => crumbs.push(("All Tools".to_string(), path.to_string())),
        PageComponent::Categories => crumbs.push(("Categories".to_string(), path.to_string())),
        PageComponent::About => crumbs.push(("About".to_string(), path.to_string())),
        PageComponent::NotFound => crumbs.push(("Not Found".to_string(), path.to_string())),
    }

    if crumbs.len() <= 1 {
        return String::new();
    }

    let last = crumbs.len() - 1;
    crumbs
        .iter()
        .enumerate()
        .map(|(i, (title, path))| {
            if i == last {
                format!(r#"<span class="breadcrumb-current">{title}</span>"#)
            } else {
                format!(r##"<a href="#{path}" class="breadcrumb-link">{title}</a>"##)
            }
        })
        .collect::<Vec<_>>()
        .join(r#"<span class="breadcrumb-separator">/</span>"#)
}

/// CSS class describing the active route, applied to the body element.
fn body_class(resolved: &ResolvedRoute) -> &'static str {
    match resolved.route.component {
        PageComponent::Home => "route-home",
        PageComponent::Tools => "route-tools",
        PageComponent::Categories => "route-categories",
        PageComponent::About => "route-about",
        PageComponent::Tool => "route-tool",
        PageComponent::Category => "route-category",
        PageComponent::NotFound => "route-other",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::domains::router::route::Route;

    fn site() -> SiteConfig {
        SiteConfig::default()
    }

    fn resolved(pattern: &str, path: &str, component: PageComponent) -> ResolvedRoute {
        let route = Arc::new(Route::new(pattern, "Default Title", "Default description", component));
        let params = route.pattern.match_path(path).unwrap_or_default();
        ResolvedRoute {
            route,
            path: path.to_string(),
            params: if params.is_empty() {
                HashMap::new()
            } else {
                params
            },
        }
    }

    #[test]
    fn test_tool_title_specialization() {
        let catalog = ToolCatalog::new();
        let resolved = resolved("/tool/:id", "/tool/json-formatter", PageComponent::Tool);
        let meta = PageMetadata::compute(&resolved, &catalog, &site());

        assert!(meta.title.starts_with("JSON Formatter"));
        assert_eq!(meta.structured_data["@type"], "WebApplication");
    }

    #[test]
    fn test_unknown_tool_keeps_route_title() {
        let catalog = ToolCatalog::new();
        let resolved = resolved("/tool/:id", "/tool/nope", PageComponent::Tool);
        let meta = PageMetadata::compute(&resolved, &catalog, &site());

        assert_eq!(meta.title, "Default Title");
        assert_eq!(meta.structured_data["@type"], "WebSite");
    }

    #[test]
    fn test_home_has_no_breadcrumb() {
        let catalog = ToolCatalog::new();
        let resolved = resolved("/", "/", PageComponent::Home);
        let meta = PageMetadata::compute(&resolved, &catalog, &site());

        assert!(meta.breadcrumb.is_empty());
        assert_eq!(meta.body_class, "route-home");
    }

    #[test]
    fn test_category_breadcrumb_trail() {
        let catalog = ToolCatalog::new();
        let resolved = resolved("/category/:id", "/category/time", PageComponent::Category);
        let meta = PageMetadata::compute(&resolved, &catalog, &site());

        assert!(meta.breadcrumb.contains("Home"));
        assert!(meta.breadcrumb.contains("Categories"));
        assert!(meta.breadcrumb.contains("breadcrumb-current"));
        assert!(meta.breadcrumb.contains("Time &amp; Date") || meta.breadcrumb.contains("Time & Date"));
    }

    #[test]
    fn test_canonical_carries_fragment_path() {
        let catalog = ToolCatalog::new();
        let resolved = resolved("/tools", "/tools", PageComponent::Tools);
        let meta = PageMetadata::compute(&resolved, &catalog, &site());

        assert!(meta.canonical.ends_with("/#/tools"));
    }
}
