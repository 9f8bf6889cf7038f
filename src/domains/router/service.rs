//! Hash-fragment navigation.
//!
//! The router owns the route table and the full navigation sequence:
//! normalize, resolve, redirect unknown paths to `/404` once, render,
//! apply metadata, swap content, and fire the page-view beacon. Renders
//! never propagate errors past [`Router::navigate`]; a failed render
//! swaps in an inline error fragment and the shell keeps running.
//!
//! Concurrent navigations are serialized at the commit point: every
//! navigation takes a ticket from a shared monotonic counter, re-checks
//! it after each await, and applies the document update under the
//! current-route lock, so only the latest navigation mutates the
//! document.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::core::config::SiteConfig;
use crate::core::host::{DocumentHost, Notifier};
use crate::domains::pages::{ComponentRegistry, Fragment, PageComponent, render};

use super::metadata::PageMetadata;
use super::route::{ResolvedRoute, Route, normalize_path};

/// Monotonic navigation counter shared between the router and the
/// tool-page loader. The ticket taken at the start of a navigation stays
/// valid until the next navigation begins.
#[derive(Debug, Default)]
pub struct NavigationSequence(AtomicU64);

impl NavigationSequence {
    /// Start a new navigation, invalidating all earlier tickets.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` still belongs to the latest navigation.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// How a navigation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The page rendered and the document was updated.
    Completed,

    /// A newer navigation started first; the document was left alone.
    Superseded,

    /// Rendering failed; the inline error fragment was shown instead.
    RenderedError,
}

/// Work the router hands back to its caller after the document has been
/// updated. Legacy tool pages carry scripts that must run after the
/// markup is in place.
pub enum PostRender {
    None,
    ActivateTool(crate::domains::loader::PreparedToolScripts),
}

/// The hash router.
pub struct Router {
    routes: Vec<Arc<Route>>,
    site: SiteConfig,
    registry: Arc<ComponentRegistry>,
    loader: Arc<crate::domains::loader::ToolPageLoader>,
    document: Arc<dyn DocumentHost>,
    notifier: Arc<dyn Notifier>,
    sequence: Arc<NavigationSequence>,
    current: Mutex<Option<ResolvedRoute>>,
}

/// The route table. Registration order is the parametrized-match
/// precedence order.
pub fn default_routes(site: &SiteConfig) -> Vec<Arc<Route>> {
    let name = &site.name;
    vec![
        Arc::new(Route::new(
            "/",
            format!("{name} - Professional Developer Tools"),
            "Free online developer tools: JSON formatter, Base64 encoder, hash generators and more. Fast, private, works offline.",
            PageComponent::Home,
        )),
        Arc::new(Route::new(
            "/tools",
            format!("All Tools - {name}"),
            "Browse the complete collection of developer tools.",
            PageComponent::Tools,
        )),
        Arc::new(Route::new(
            "/categories",
            format!("Tool Categories - {name}"),
            "Developer tools organized by category.",
            PageComponent::Categories,
        )),
        Arc::new(Route::new(
            "/category/:id",
            format!("Category - {name}"),
            "Developer tools in this category.",
            PageComponent::Category,
        )),
        Arc::new(Route::new(
            "/tool/:id",
            format!("Tool - {name}"),
            "Free online developer tool.",
            PageComponent::Tool,
        )),
        Arc::new(Route::new(
            "/about",
            format!("About - {name}"),
            "About the project and its offline-first developer tools.",
            PageComponent::About,
        )),
        Arc::new(Route::new(
            "/404",
            format!("Page Not Found - {name}"),
            "The page you are looking for does not exist.",
            PageComponent::NotFound,
        )),
    ]
}

impl Router {
    pub fn new(
        site: SiteConfig,
        registry: Arc<ComponentRegistry>,
        loader: Arc<crate::domains::loader::ToolPageLoader>,
        document: Arc<dyn DocumentHost>,
        notifier: Arc<dyn Notifier>,
        sequence: Arc<NavigationSequence>,
    ) -> Self {
        let routes = default_routes(&site);
        Self {
            routes,
            site,
            registry,
            loader,
            document,
            notifier,
            sequence,
            current: Mutex::new(None),
        }
    }

    /// Resolve a normalized path against the route table: exact matches
    /// first, then parametrized patterns in registration order.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let exact = self
            .routes
            .iter()
            .find(|route| route.pattern.is_exact() && route.pattern.raw() == path);
        if let Some(route) = exact {
            return Some(ResolvedRoute {
                route: route.clone(),
                path: path.to_string(),
                params: HashMap::new(),
            });
        }

        for route in &self.routes {
            if route.pattern.is_exact() {
                continue;
            }
            if let Some(params) = route.pattern.match_path(path) {
                return Some(ResolvedRoute {
                    route: route.clone(),
                    path: path.to_string(),
                    params,
                });
            }
        }

        None
    }

    /// Navigate to a fragment path.
    ///
    /// `record_history` distinguishes user-initiated navigations (link
    /// clicks, programmatic jumps) from history traversal, which must
    /// not push new entries.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn navigate(&self, path: &str, record_history: bool) -> NavigationOutcome {
        let ticket = self.sequence.begin();
        let mut path = normalize_path(path);

        let mut resolved = self.resolve(&path);
        if resolved.is_none() && path != "/404" {
            debug!(path, "no route matched, redirecting to /404");
            path = "/404".to_string();
            resolved = self.resolve(&path);
        }
        let Some(resolved) = resolved else {
            // No fallback route registered either; render the fragment
            // directly rather than loop.
            warn!(path, "no not-found route registered");
            self.document.swap_content(&render::not_found_page());
            return NavigationOutcome::Completed;
        };

        info!(path, route = resolved.route.pattern.raw(), "navigating");

        let (fragment, post, failed) = self.render_route(&resolved).await;

        // Commit under the current-route lock. The ticket re-check and
        // the document update hold the lock with no awaits in between,
        // so a navigation that gets this far either commits whole or
        // leaves the document alone.
        {
            let mut current = self.current.lock().await;
            if !self.sequence.is_current(ticket) {
                // Scripts only attach during activation, which has not
                // run yet, so there is nothing to clean up here.
                debug!(path, "navigation superseded before commit");
                return NavigationOutcome::Superseded;
            }

            if record_history {
                self.document
                    .push_history(&path, serde_json::json!({ "path": path }));
            }

            let metadata = PageMetadata::compute(&resolved, self.registry.catalog(), &self.site);
            metadata.apply(self.document.as_ref(), &resolved);
            self.document.swap_content(&fragment);
            self.document.scroll_to_top();

            *current = Some(resolved.clone());
            self.notifier.page_view(&path, &metadata.title);
        }

        if let PostRender::ActivateTool(prepared) = post {
            self.loader.activate(prepared, ticket).await;
        }

        if failed {
            NavigationOutcome::RenderedError
        } else {
            NavigationOutcome::Completed
        }
    }

    /// Render the fragment for a resolved route. Tool routes without a
    /// registered module go through the legacy loader; everything else
    /// renders from the registry. Failures degrade to the inline error
    /// fragment.
    async fn render_route(&self, resolved: &ResolvedRoute) -> (Fragment, PostRender, bool) {
        if resolved.route.component == PageComponent::Tool {
            let id = resolved.params.get("id").map(String::as_str).unwrap_or_default();
            let catalog = self.registry.catalog().clone();
            if let Some(tool) = catalog.tool_by_id(id)
                && self.registry.module_for(id).is_none()
            {
                let (content, prepared) = self.loader.prepare(tool).await;
                let fragment = render::tool_page(&catalog, tool, &content);
                let post = match prepared {
                    Some(prepared) => PostRender::ActivateTool(prepared),
                    None => PostRender::None,
                };
                return (fragment, post, false);
            }
        }

        match self
            .registry
            .render(resolved.route.component, &resolved.params)
            .await
        {
            Ok(fragment) => (fragment, PostRender::None, false),
            Err(err) => {
                error!(path = resolved.path, %err, "component render failed");
                (render::render_error_page(), PostRender::None, true)
            }
        }
    }

    /// Handle a click on an in-app link. Only `#/`-prefixed hrefs are
    /// routed; everything else is left to the host's default handling.
    pub async fn handle_link_click(&self, href: &str) -> Option<NavigationOutcome> {
        let path = href.strip_prefix('#')?;
        if !path.starts_with('/') {
            return None;
        }
        Some(self.navigate(path, true).await)
    }

    /// Handle history traversal (back/forward): re-render the location
    /// the host restored, without pushing a new entry.
    pub async fn handle_pop_state(&self) -> NavigationOutcome {
        let path = self.document.current_path();
        self.navigate(&path, false).await
    }

    /// The route the document currently shows, if any navigation has
    /// completed.
    pub async fn current_route(&self) -> Option<ResolvedRoute> {
        self.current.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LoaderConfig;
    use crate::core::host::{
        FetchRequest, FetchResponse, HostError, MemoryDocument, MemoryNetwork, Network,
        RecordingNotifier,
    };
    use crate::domains::catalog::ToolCatalog;
    use crate::domains::loader::ToolPageLoader;

    struct Fixture {
        router: Router,
        document: Arc<MemoryDocument>,
        network: Arc<MemoryNetwork>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture() -> Fixture {
        let site = SiteConfig::default();
        let catalog = Arc::new(ToolCatalog::new());
        let registry = Arc::new(ComponentRegistry::new(catalog));
        let network = Arc::new(MemoryNetwork::new());
        let document = Arc::new(MemoryDocument::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let sequence = Arc::new(NavigationSequence::default());
        let loader = Arc::new(ToolPageLoader::new(
            site.clone(),
            LoaderConfig::default(),
            network.clone(),
            document.clone(),
            notifier.clone(),
            sequence.clone(),
        ));
        let router = Router::new(
            site,
            registry,
            loader,
            document.clone(),
            notifier.clone(),
            sequence,
        );
        Fixture {
            router,
            document,
            network,
            notifier,
        }
    }

    #[tokio::test]
    async fn test_navigate_home() {
        let f = fixture();
        let outcome = f.router.navigate("/", true).await;

        assert_eq!(outcome, NavigationOutcome::Completed);
        assert!(f.document.content().contains("Popular Developer Tools"));
        assert!(f.document.title().contains("Development Station"));
        assert_eq!(f.document.body_class(), "route-home");
        assert_eq!(f.document.scrolls(), 1);
        assert_eq!(f.notifier.page_views().len(), 1);
    }

    #[tokio::test]
    async fn test_exact_match_beats_parametrized() {
        let f = fixture();
        f.router.navigate("/tools", true).await;

        let current = f.router.current_route().await.unwrap();
        assert_eq!(current.route.pattern.raw(), "/tools");
        assert!(current.params.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_to_404_once() {
        let f = fixture();
        let outcome = f.router.navigate("/no/such/page", true).await;

        assert_eq!(outcome, NavigationOutcome::Completed);
        assert!(f.document.content().contains("404"));
        let current = f.router.current_route().await.unwrap();
        assert_eq!(current.path, "/404");
    }

    #[tokio::test]
    async fn test_param_binding_and_decoding() {
        let f = fixture();
        f.router.navigate("/category/text", true).await;

        let current = f.router.current_route().await.unwrap();
        assert_eq!(current.params.get("id").map(String::as_str), Some("text"));
        assert_eq!(f.document.body_class(), "route-category");
    }

    #[tokio::test]
    async fn test_history_recorded_only_when_requested() {
        let f = fixture();
        f.router.navigate("/tools", true).await;
        f.router.navigate("/about", false).await;

        let history = f.document.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].0, "/tools");
    }

    #[tokio::test]
    async fn test_pop_state_renders_restored_location() {
        let f = fixture();
        f.document.set_location("/categories");
        let outcome = f.router.handle_pop_state().await;

        assert_eq!(outcome, NavigationOutcome::Completed);
        assert!(f.document.content().contains("categoriesGrid"));
        assert!(f.document.history().is_empty());
    }

    #[tokio::test]
    async fn test_link_click_routing() {
        let f = fixture();
        assert!(f.router.handle_link_click("#/about").await.is_some());
        assert!(f.router.handle_link_click("https://example.test").await.is_none());
        assert!(f.router.handle_link_click("#section-anchor").await.is_none());
    }

    #[tokio::test]
    async fn test_tool_route_uses_legacy_loader() {
        let f = fixture();
        let url = format!(
            "{}/tools/json-formatter.html",
            SiteConfig::default().origin
        );
        f.network.serve(
            &url,
            FetchResponse::ok("<main><div id=\"legacy-ui\"></div></main>"),
        );

        f.router.navigate("/tool/json-formatter", true).await;

        assert!(f.document.content().contains("legacy-ui"));
        assert!(f.document.title().starts_with("JSON Formatter"));
    }

    #[tokio::test]
    async fn test_unknown_tool_id_renders_not_found() {
        let f = fixture();
        let outcome = f.router.navigate("/tool/no-such-tool", true).await;

        assert_eq!(outcome, NavigationOutcome::Completed);
        assert!(f.document.content().contains("404"));
    }

    /// Network wrapper that yields before answering so two concurrent
    /// navigations interleave across the fetch await.
    struct YieldingNetwork(Arc<MemoryNetwork>);

    #[async_trait::async_trait]
    impl Network for YieldingNetwork {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, HostError> {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            self.0.fetch(request).await
        }
    }

    #[tokio::test]
    async fn test_stale_navigation_never_commits_route_or_beacon() {
        let site = SiteConfig::default();
        let inner = Arc::new(MemoryNetwork::new());
        inner.serve(
            &format!("{}/tools/json-formatter.html", site.origin),
            FetchResponse::ok("<main>slow tool</main>"),
        );

        let registry = Arc::new(ComponentRegistry::new(Arc::new(ToolCatalog::new())));
        let document = Arc::new(MemoryDocument::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let sequence = Arc::new(NavigationSequence::default());
        let loader = Arc::new(ToolPageLoader::new(
            site.clone(),
            LoaderConfig::default(),
            Arc::new(YieldingNetwork(inner)),
            document.clone(),
            notifier.clone(),
            sequence.clone(),
        ));
        let router = Router::new(
            site,
            registry,
            loader,
            document.clone(),
            notifier.clone(),
            sequence,
        );

        // The tool navigation blocks on the network; the about
        // navigation overtakes it and must be the only one to commit.
        let (first, second) = tokio::join!(
            router.navigate("/tool/json-formatter", true),
            router.navigate("/about", true),
        );

        assert_eq!(first, NavigationOutcome::Superseded);
        assert_eq!(second, NavigationOutcome::Completed);
        assert_eq!(router.current_route().await.unwrap().path, "/about");
        let views = notifier.page_views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].0, "/about");
        // The loser pushed no history entry either.
        assert_eq!(document.history().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_path_normalizes_to_home() {
        let f = fixture();
        f.router.navigate("", false).await;
        let current = f.router.current_route().await.unwrap();
        assert_eq!(current.path, "/");
    }
}
