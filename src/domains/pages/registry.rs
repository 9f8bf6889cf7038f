//! Component registry - typed dispatch from page tags to render functions.
//!
//! The registry is the single place where a [`PageComponent`] becomes
//! markup. Page render functions live in `render.rs`; per-tool modules
//! are registered here at startup (last registration for an id wins).
//! Rendering never touches the network and never fails for a missing
//! catalog id - those delegate to the not-found fragment.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::domains::catalog::ToolCatalog;

use super::component::{Fragment, PageComponent, ToolModule};
use super::error::PageError;
use super::render;

/// Registry of page render functions and tool modules.
pub struct ComponentRegistry {
    catalog: Arc<ToolCatalog>,

    /// Tool id -> in-app module. Tools absent from this map fall back to
    /// the legacy static-page loader.
    modules: RwLock<HashMap<String, Arc<dyn ToolModule>>>,
}

impl ComponentRegistry {
    /// Create a registry over the given catalog with no tool modules.
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self {
            catalog,
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Register an in-app module for a tool id. Replaces any previous
    /// registration for the same id.
    pub fn register_tool_module(&self, tool_id: impl Into<String>, module: Arc<dyn ToolModule>) {
        let tool_id = tool_id.into();
        info!("Registering tool module: {}", tool_id);
        self.modules
            .write()
            .expect("module registry lock poisoned")
            .insert(tool_id, module);
    }

    /// Look up the module registered for a tool id, if any.
    pub fn module_for(&self, tool_id: &str) -> Option<Arc<dyn ToolModule>> {
        self.modules
            .read()
            .expect("module registry lock poisoned")
            .get(tool_id)
            .cloned()
    }

    /// Render the fragment for a page component.
    ///
    /// For [`PageComponent::Tool`] this covers the module-backed path
    /// only; the router invokes the legacy loader for unregistered tools
    /// and passes the resulting content through [`render::tool_page`]
    /// itself.
    pub async fn render(
        &self,
        component: PageComponent,
        params: &HashMap<String, String>,
    ) -> Result<Fragment, PageError> {
        debug!("Rendering component: {}", component.name());

        let catalog = &self.catalog;
        let fragment = match component {
            PageComponent::Home => render::home_page(catalog),
            PageComponent::Tools => render::tools_page(catalog),
            PageComponent::Categories => render::categories_page(catalog),
            PageComponent::Category => {
                let id = params.get("id").map(String::as_str).unwrap_or_default();
                render::category_page(catalog, id)
            }
            PageComponent::Tool => {
                let id = params.get("id").map(String::as_str).unwrap_or_default();
                match (catalog.tool_by_id(id), self.module_for(id)) {
                    (Some(tool), Some(module)) => {
                        let content = module.render().await?;
                        render::tool_page(catalog, tool, &content)
                    }
                    (Some(tool), None) => {
                        render::tool_page(catalog, tool, &render::tool_placeholder(tool))
                    }
                    (None, _) => render::not_found_page(),
                }
            }
            PageComponent::About => render::about_page(catalog),
            PageComponent::NotFound => render::not_found_page(),
        };

        Ok(fragment)
    }

    /// The catalog this registry renders from.
    pub fn catalog(&self) -> &Arc<ToolCatalog> {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pages::component::StaticToolModule;

    fn registry() -> ComponentRegistry {
        ComponentRegistry::new(Arc::new(ToolCatalog::new()))
    }

    fn params(id: &str) -> HashMap<String, String> {
        HashMap::from([("id".to_string(), id.to_string())])
    }

    #[tokio::test]
    async fn test_render_home() {
        let html = registry()
            .render(PageComponent::Home, &HashMap::new())
            .await
            .unwrap();
        assert!(html.contains("Development Station"));
    }

    #[tokio::test]
    async fn test_render_category_missing_id_falls_back() {
        let html = registry()
            .render(PageComponent::Category, &params("nope"))
            .await
            .unwrap();
        assert!(html.contains("404"));
    }

    #[tokio::test]
    async fn test_render_tool_uses_registered_module() {
        let registry = registry();
        registry.register_tool_module(
            "json-formatter",
            Arc::new(StaticToolModule::new("<div id=\"module-content\"></div>")),
        );

        let html = registry
            .render(PageComponent::Tool, &params("json-formatter"))
            .await
            .unwrap();
        assert!(html.contains("module-content"));
    }

    #[tokio::test]
    async fn test_render_tool_unknown_id_is_not_found() {
        let html = registry()
            .render(PageComponent::Tool, &params("no-such-tool"))
            .await
            .unwrap();
        assert!(html.contains("404"));
    }

    #[test]
    fn test_last_module_registration_wins() {
        let registry = registry();
        registry.register_tool_module("x", Arc::new(StaticToolModule::new("first")));
        registry.register_tool_module("x", Arc::new(StaticToolModule::new("second")));

        let module = registry.module_for("x").unwrap();
        let html = tokio_test::block_on(module.render()).unwrap();
        assert_eq!(html, "second");
    }
}
