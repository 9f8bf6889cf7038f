//! Legacy tool-page loading and activation.
//!
//! Tools that have no in-app [`ToolModule`](crate::domains::pages::ToolModule)
//! still ship as standalone HTML documents. The loader fetches the
//! document, extracts its content region, and re-hosts its scripts:
//! externals are fetched and executed one at a time in source order,
//! inline blocks execute in place between them, and everything a tool
//! injects is recorded so the next tool activation can remove it. At most
//! one tool's scripts are live at any time.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};
use url::Url;

use crate::core::config::{LoaderConfig, SiteConfig};
use crate::core::host::{
    DocumentHost, FetchRequest, Network, Notifier, InjectedScript, ScriptHandle,
};
use crate::domains::catalog::Tool;
use crate::domains::pages::{Fragment, render};
use crate::domains::router::NavigationSequence;

use super::extract::{self, RawScript};
use super::standin::StandInRegistry;

/// The script work extracted from a fetched tool page, ready to run once
/// the page markup is in the document.
pub struct PreparedToolScripts {
    tool_id: String,
    base: Url,
    scripts: Vec<RawScript>,
    handler_names: Vec<String>,
}

/// Fetches legacy tool documents and manages their script lifecycles.
pub struct ToolPageLoader {
    site: SiteConfig,
    config: LoaderConfig,
    network: Arc<dyn Network>,
    document: Arc<dyn DocumentHost>,
    notifier: Arc<dyn Notifier>,
    sequence: Arc<NavigationSequence>,
    standins: StandInRegistry,

    /// External script URLs executed since startup. Scripts are never
    /// re-fetched or re-executed, even after their tool is cleaned up.
    loaded_urls: Mutex<HashSet<String>>,

    /// Script handles injected per tool, pending cleanup.
    cleanups: Mutex<HashMap<String, Vec<ScriptHandle>>>,

    /// The tool whose scripts are currently live.
    active_tool: Mutex<Option<String>>,
}

impl ToolPageLoader {
    pub fn new(
        site: SiteConfig,
        config: LoaderConfig,
        network: Arc<dyn Network>,
        document: Arc<dyn DocumentHost>,
        notifier: Arc<dyn Notifier>,
        sequence: Arc<NavigationSequence>,
    ) -> Self {
        Self {
            site,
            config,
            network,
            document,
            notifier,
            sequence,
            standins: StandInRegistry::new(),
            loaded_urls: Mutex::new(HashSet::new()),
            cleanups: Mutex::new(HashMap::new()),
            active_tool: Mutex::new(None),
        }
    }

    /// Fetch a tool's legacy document and extract its content region.
    ///
    /// Tries the absolute URL first, then the relative fallback. When
    /// both fail the user gets a placeholder fragment, a warning toast,
    /// and no script work.
    pub async fn prepare(&self, tool: &Tool) -> (Fragment, Option<PreparedToolScripts>) {
        let absolute = format!(
            "{}/{}/{}.html",
            self.site.origin, self.config.tools_path, tool.id
        );
        let relative = format!("./{}/{}.html", self.config.tools_path, tool.id);

        let html = match self.fetch_page(&absolute).await {
            Some(html) => Some(html),
            None => {
                debug!(tool = tool.id, "absolute tool page failed, trying relative");
                self.fetch_page(&relative).await
            }
        };

        let Some(html) = html else {
            warn!(tool = tool.id, "tool page unavailable at both URLs");
            self.notifier
                .warning(&format!("Failed to load the {} interface", tool.name));
            return (render::tool_placeholder(tool), None);
        };

        let legacy = extract::extract(&html);

        let base = match Url::parse(&absolute) {
            Ok(base) => base,
            Err(err) => {
                error!(tool = tool.id, %err, "tool page base URL is invalid, skipping scripts");
                return (legacy.content, None);
            }
        };

        info!(
            tool = tool.id,
            scripts = legacy.scripts.len(),
            handlers = legacy.handler_names.len(),
            "prepared legacy tool page"
        );

        let prepared = PreparedToolScripts {
            tool_id: tool.id.to_string(),
            base,
            scripts: legacy.scripts,
            handler_names: legacy.handler_names,
        };
        (legacy.content, Some(prepared))
    }

    /// Activate a prepared tool page: remove the previous tool's scripts,
    /// then execute this tool's scripts strictly in source order.
    ///
    /// `seq` is the navigation that requested the activation. The check
    /// repeats after every await; once superseded, no further scripts
    /// run, but everything already injected is still registered for
    /// cleanup.
    pub async fn activate(&self, prepared: PreparedToolScripts, seq: u64) {
        // A stale activation must not touch the winner's scripts.
        if !self.sequence.is_current(seq) {
            debug!(tool = prepared.tool_id, "activation superseded before it began");
            return;
        }

        // Clear out earlier tools first; the incoming tool's stand-ins
        // must outlive the whole activation.
        self.cleanup_previous();

        for name in &prepared.handler_names {
            self.standins.install(name, self.document.as_ref());
        }

        let mut handles = Vec::new();
        let mut superseded = false;

        for script in &prepared.scripts {
            if !self.sequence.is_current(seq) {
                superseded = true;
                break;
            }
            match script {
                RawScript::External { src } => {
                    if let Some(handle) = self.run_external(&prepared, src, seq).await {
                        handles.push(handle);
                    }
                }
                RawScript::Inline { source } => {
                    let script = InjectedScript::inline(&prepared.tool_id, source);
                    match self.document.execute_script(&script).await {
                        Ok(handle) => handles.push(handle),
                        Err(err) => {
                            error!(tool = prepared.tool_id, %err, "inline script failed")
                        }
                    }
                }
            }
        }

        if !handles.is_empty() {
            self.lock_cleanups()
                .entry(prepared.tool_id.clone())
                .or_default()
                .extend(handles);
        }

        if superseded || !self.sequence.is_current(seq) {
            debug!(tool = prepared.tool_id, "activation superseded, scripts registered for cleanup");
            return;
        }

        *self.lock_active() = Some(prepared.tool_id.clone());
        self.document.dispatch_content_ready();
        self.standins.flush(self.document.as_ref());
        info!(tool = prepared.tool_id, "tool page active");
    }

    /// Stand-in handler registry, for the UI glue that routes clicks.
    pub fn standins(&self) -> &StandInRegistry {
        &self.standins
    }

    /// The tool whose scripts are currently live, if any.
    pub fn active_tool(&self) -> Option<String> {
        self.lock_active().clone()
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.network.fetch(&FetchRequest::document(url)).await {
            Ok(response) if response.is_ok() => Some(response.body),
            Ok(response) => {
                debug!(url, status = response.status, "tool page fetch returned error status");
                None
            }
            Err(err) => {
                debug!(url, %err, "tool page fetch failed");
                None
            }
        }
    }

    /// Fetch and execute one external script. Shared-runtime and
    /// already-loaded URLs are skipped; failures are logged and skipped
    /// so one broken script never blocks the rest.
    async fn run_external(
        &self,
        prepared: &PreparedToolScripts,
        src: &str,
        seq: u64,
    ) -> Option<ScriptHandle> {
        let resolved = match prepared.base.join(src) {
            Ok(url) => url.to_string(),
            Err(err) => {
                warn!(tool = prepared.tool_id, src, %err, "unresolvable script URL skipped");
                return None;
            }
        };

        if resolved.ends_with(&self.config.shared_script) {
            debug!(url = resolved, "shared runtime script skipped");
            return None;
        }
        if self.lock_loaded().contains(&resolved) {
            debug!(url = resolved, "script already loaded, skipped");
            return None;
        }

        let response = match self.network.fetch(&FetchRequest::script(&resolved)).await {
            Ok(response) if response.is_ok() => response,
            Ok(response) => {
                warn!(url = resolved, status = response.status, "script fetch returned error status");
                return None;
            }
            Err(err) => {
                warn!(url = resolved, %err, "script fetch failed");
                return None;
            }
        };

        if !self.sequence.is_current(seq) {
            debug!(url = resolved, "navigation superseded during script fetch");
            return None;
        }

        let script = InjectedScript::external(&prepared.tool_id, &resolved, &response.body);
        match self.document.execute_script(&script).await {
            Ok(handle) => {
                self.lock_loaded().insert(resolved);
                Some(handle)
            }
            Err(err) => {
                error!(url = resolved, %err, "external script failed");
                None
            }
        }
    }

    /// Remove every script injected by earlier activations, whether they
    /// completed or lost a navigation race mid-batch, so two tools'
    /// globals never coexist. Stand-ins and their queues go with them.
    fn cleanup_previous(&self) {
        self.lock_active().take();

        let entries: Vec<(String, Vec<ScriptHandle>)> =
            self.lock_cleanups().drain().collect();
        for (tool_id, handles) in entries {
            debug!(tool = tool_id, scripts = handles.len(), "removing previous tool scripts");
            for handle in handles {
                self.document.remove_script(handle);
            }
        }
        self.standins.clear();
    }

    fn lock_loaded(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.loaded_urls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_cleanups(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<ScriptHandle>>> {
        self.cleanups.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.active_tool.lock().unwrap_or_else(|e| e.into_inner())
    }
}
