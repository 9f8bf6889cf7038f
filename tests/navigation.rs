//! End-to-end navigation tests through the assembled shell.

use std::sync::Arc;

use async_trait::async_trait;
use station_spa::core::host::{
    DocumentHost, FetchRequest, FetchResponse, HostError, MemoryDocument, MemoryNetwork, Network,
    RecordingNotifier,
};
use station_spa::core::{Config, SpaApp};
use station_spa::domains::router::NavigationOutcome;

struct Fixture {
    app: SpaApp,
    document: Arc<MemoryDocument>,
    network: Arc<MemoryNetwork>,
    notifier: Arc<RecordingNotifier>,
}

fn fixture() -> Fixture {
    let network = Arc::new(MemoryNetwork::new());
    let document = Arc::new(MemoryDocument::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let app = SpaApp::new(
        Config::default(),
        network.clone(),
        document.clone(),
        notifier.clone(),
    );
    Fixture {
        app,
        document,
        network,
        notifier,
    }
}

fn tool_page_url(id: &str) -> String {
    format!("{}/tools/{id}.html", Config::default().site.origin)
}

#[tokio::test]
async fn full_tool_page_flow() {
    let f = fixture();
    f.network.serve(
        tool_page_url("json-formatter"),
        FetchResponse::ok(
            r#"<main>
  <button onclick="formatJSON()">Format</button>
  <textarea id="jsonInput"></textarea>
  <script src="/assets/js/modern-shared.js"></script>
  <script>function formatJSON() { /* formats */ }</script>
</main>"#,
        ),
    );

    let outcome = f.app.navigate("/tool/json-formatter").await;

    assert_eq!(outcome, NavigationOutcome::Completed);
    assert!(f.document.content().contains("jsonInput"));
    assert!(f.document.title().starts_with("JSON Formatter"));
    assert_eq!(f.document.body_class(), "route-tool");
    assert!(f.document.has_global("formatJSON"));
    assert_eq!(f.document.content_ready_signals(), 1);
    // The shared runtime script must not be re-executed.
    assert_eq!(f.document.execution_log().len(), 1);
    // Breadcrumb and beacon reflect the resolved navigation.
    assert!(f.document.breadcrumb().contains("JSON Formatter"));
    let views = f.notifier.page_views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].0, "/tool/json-formatter");
}

#[tokio::test]
async fn switching_tools_replaces_scripts() {
    let f = fixture();
    f.network.serve(
        tool_page_url("json-formatter"),
        FetchResponse::ok("<main>a<script>function formatJSON() {}</script></main>"),
    );
    f.network.serve(
        tool_page_url("base64-encoder"),
        FetchResponse::ok("<main>b<script>function encodeBase64() {}</script></main>"),
    );

    f.app.navigate("/tool/json-formatter").await;
    f.app.navigate("/tool/base64-encoder").await;

    let attached = f.document.attached_scripts();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].tool_id, "base64-encoder");
    assert_eq!(
        f.app.loader().active_tool().as_deref(),
        Some("base64-encoder")
    );
}

#[tokio::test]
async fn unknown_path_redirects_to_not_found_once() {
    let f = fixture();
    let outcome = f.app.navigate("/definitely/not/registered").await;

    assert_eq!(outcome, NavigationOutcome::Completed);
    assert!(f.document.content().contains("404"));
    let current = f.app.router().current_route().await.unwrap();
    assert_eq!(current.path, "/404");
    // One navigation, one beacon; the redirect is internal.
    assert_eq!(f.notifier.page_views().len(), 1);
}

#[tokio::test]
async fn history_and_pop_state_round_trip() {
    let f = fixture();
    f.app.navigate("/tools").await;
    f.app.navigate("/about").await;
    assert_eq!(f.document.history().len(), 2);

    // Host restores the earlier location; pop-state re-renders without a
    // new entry.
    f.document.set_location("/tools");
    f.app.router().handle_pop_state().await;

    assert_eq!(f.document.history().len(), 2);
    assert!(f.document.content().contains("allToolsGrid"));
}

#[tokio::test]
async fn category_param_is_percent_decoded() {
    let f = fixture();
    f.app.navigate("/category/data").await;

    let current = f.app.router().current_route().await.unwrap();
    assert_eq!(current.params.get("id").map(String::as_str), Some("data"));
    assert!(f.document.content().contains("categoryToolsGrid"));
}

#[tokio::test]
async fn placeholder_and_warning_when_tool_page_unreachable() {
    let f = fixture();

    let outcome = f.app.navigate("/tool/json-formatter").await;

    assert_eq!(outcome, NavigationOutcome::Completed);
    assert!(f.document.content().contains("Loading JSON Formatter"));
    assert_eq!(f.notifier.warnings().len(), 1);
}

/// Network wrapper that yields to the scheduler before answering, so
/// two concurrent navigations actually interleave.
struct YieldingNetwork(Arc<MemoryNetwork>);

#[async_trait]
impl Network for YieldingNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, HostError> {
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        self.0.fetch(request).await
    }
}

#[tokio::test]
async fn later_navigation_wins_a_race() {
    let inner = Arc::new(MemoryNetwork::new());
    inner.serve(
        tool_page_url("json-formatter"),
        FetchResponse::ok("<main>slow tool<script>function formatJSON() {}</script></main>"),
    );

    let document = Arc::new(MemoryDocument::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let app = SpaApp::new(
        Config::default(),
        Arc::new(YieldingNetwork(inner)),
        document.clone(),
        notifier.clone(),
    );

    // The tool navigation starts first but blocks on the network; the
    // about navigation starts second and finishes first.
    let (first, second) = tokio::join!(
        app.navigate("/tool/json-formatter"),
        app.navigate("/about"),
    );

    assert_eq!(first, NavigationOutcome::Superseded);
    assert_eq!(second, NavigationOutcome::Completed);
    assert!(content_is_about(&document));
    // Only the winning navigation emitted a beacon.
    assert_eq!(notifier.page_views().len(), 1);
    assert_eq!(notifier.page_views()[0].0, "/about");
    // Nothing the losing navigation fetched reached the document.
    assert!(!document.content().contains("slow tool"));
    assert_eq!(document.content_ready_signals(), 0);
}

fn content_is_about(document: &MemoryDocument) -> bool {
    document.content().contains("About Development Station")
}

#[tokio::test]
async fn render_never_panics_on_odd_paths() {
    let f = fixture();
    for path in ["", "/", "//", "/tool/", "/tool/%zz", "/category/%20", "/404"] {
        let outcome = f.app.navigate(path).await;
        assert_ne!(outcome, NavigationOutcome::Superseded, "path {path:?}");
        assert!(!f.document.content().is_empty(), "path {path:?}");
    }
}
