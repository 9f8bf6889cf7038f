//! Application shell wiring and lifecycle.
//!
//! [`SpaApp`] builds every domain service over one shared set of host
//! collaborators and exposes the handful of entry points the embedding
//! page calls: startup, navigation, live search, and the offline cache's
//! fetch/message hooks.

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::host::{DocumentHost, Network, Notifier};
use crate::domains::cache::{CacheManager, FetchOutcome, MemoryCacheStore};
use crate::domains::catalog::ToolCatalog;
use crate::domains::loader::ToolPageLoader;
use crate::domains::pages::{ComponentRegistry, Fragment, ToolModule, render};
use crate::domains::router::{NavigationOutcome, NavigationSequence, Router};

/// The assembled application shell.
pub struct SpaApp {
    config: Config,
    catalog: Arc<ToolCatalog>,
    registry: Arc<ComponentRegistry>,
    router: Arc<Router>,
    loader: Arc<ToolPageLoader>,
    cache: Arc<CacheManager>,
    document: Arc<dyn DocumentHost>,
}

impl SpaApp {
    /// Wire the full shell over the given host collaborators.
    pub fn new(
        config: Config,
        network: Arc<dyn Network>,
        document: Arc<dyn DocumentHost>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let catalog = Arc::new(ToolCatalog::new());
        let registry = Arc::new(ComponentRegistry::new(catalog.clone()));
        let sequence = Arc::new(NavigationSequence::default());

        let loader = Arc::new(ToolPageLoader::new(
            config.site.clone(),
            config.loader.clone(),
            network.clone(),
            document.clone(),
            notifier.clone(),
            sequence.clone(),
        ));

        let router = Arc::new(Router::new(
            config.site.clone(),
            registry.clone(),
            loader.clone(),
            document.clone(),
            notifier,
            sequence,
        ));

        let cache = Arc::new(CacheManager::new(
            config.cache.clone(),
            config.site.origin.clone(),
            network,
            Arc::new(MemoryCacheStore::new()),
        ));

        Self {
            config,
            catalog,
            registry,
            router,
            loader,
            cache,
            document,
        }
    }

    /// Start the shell: bring the offline cache up, then render whatever
    /// location the document is already at. A cache installation failure
    /// is logged and skipped; the app works without offline support.
    pub async fn start(&self) -> NavigationOutcome {
        info!(
            site = self.config.site.name,
            origin = self.config.site.origin,
            "starting application shell"
        );

        match self.cache.install(&self.popular_page_paths()).await {
            Ok(()) => self.cache.activate().await,
            Err(err) => warn!(%err, "offline cache unavailable"),
        }

        let path = self.document.current_path();
        self.router.navigate(&path, false).await
    }

    /// Navigate programmatically, recording a history entry.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        self.router.navigate(path, true).await
    }

    /// Register an in-app module for a tool id, bypassing the legacy
    /// loader for that tool from then on.
    pub fn register_tool_module(&self, tool_id: impl Into<String>, module: Arc<dyn ToolModule>) {
        self.registry.register_tool_module(tool_id, module);
    }

    /// Render the live-search results grid for a query.
    pub fn search(&self, query: &str) -> Fragment {
        render::search_results_grid(&self.catalog, query)
    }

    /// Answer an intercepted request through the offline cache.
    pub async fn handle_fetch(
        &self,
        request: &crate::core::host::FetchRequest,
    ) -> FetchOutcome {
        self.cache.handle_fetch(request).await
    }

    /// Forward a page-posted control message to the offline cache.
    pub async fn handle_cache_message(
        &self,
        message: serde_json::Value,
    ) -> crate::core::error::Result<()> {
        self.cache.handle_message(message).await?;
        Ok(())
    }

    /// Legacy page paths for the popular tools, used to warm the
    /// offline cache.
    fn popular_page_paths(&self) -> Vec<String> {
        self.catalog
            .popular_tools()
            .iter()
            .map(|tool| format!("/{}/{}.html", self.config.loader.tools_path, tool.id))
            .collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<ToolCatalog> {
        &self.catalog
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn loader(&self) -> &Arc<ToolPageLoader> {
        &self.loader
    }

    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{MemoryDocument, MemoryNetwork, NullNotifier};

    fn app() -> (SpaApp, Arc<MemoryDocument>, Arc<MemoryNetwork>) {
        let network = Arc::new(MemoryNetwork::new());
        let document = Arc::new(MemoryDocument::new());
        let app = SpaApp::new(
            Config::default(),
            network.clone(),
            document.clone(),
            Arc::new(NullNotifier),
        );
        (app, document, network)
    }

    #[tokio::test]
    async fn test_start_renders_current_location() {
        let (app, document, _network) = app();
        document.set_location("/tools");

        let outcome = app.start().await;

        assert_eq!(outcome, NavigationOutcome::Completed);
        assert!(document.content().contains("allToolsGrid"));
    }

    #[tokio::test]
    async fn test_start_survives_cache_failure() {
        // No precache URLs served; install fails, navigation still runs.
        let (app, document, _network) = app();

        let outcome = app.start().await;

        assert_eq!(outcome, NavigationOutcome::Completed);
        assert!(!app.cache().is_activated());
        assert!(!document.content().is_empty());
    }

    #[tokio::test]
    async fn test_search_renders_results() {
        let (app, _document, _network) = app();
        let html = app.search("json");
        assert!(html.contains("JSON Formatter"));
    }
}
