//! Document host - the DOM seam.
//!
//! Everything the router and tool-page loader do to the page (title and
//! metadata updates, content swaps, history entries, script injection)
//! goes through [`DocumentHost`]. [`MemoryDocument`] is a headless
//! implementation that records every mutation so tests can assert on the
//! exact document state a browser would end up with.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::HostError;

/// Handle to a script attached to the document, used for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptHandle(pub u64);

/// Where a script's source came from.
#[derive(Debug, Clone)]
pub enum ScriptKind {
    /// External script, already fetched; `url` is the resolved source URL.
    External { url: String, body: String },

    /// Inline script block.
    Inline { source: String },
}

/// A script about to be attached to the document on behalf of a tool.
#[derive(Debug, Clone)]
pub struct InjectedScript {
    /// Tool that owns this script; its cleanup removes the element.
    pub tool_id: String,

    pub kind: ScriptKind,
}

impl InjectedScript {
    pub fn external(
        tool_id: impl Into<String>,
        url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            kind: ScriptKind::External {
                url: url.into(),
                body: body.into(),
            },
        }
    }

    pub fn inline(tool_id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            kind: ScriptKind::Inline {
                source: source.into(),
            },
        }
    }

    fn source(&self) -> &str {
        match &self.kind {
            ScriptKind::External { body, .. } => body,
            ScriptKind::Inline { source } => source,
        }
    }
}

/// The document seam.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    fn set_title(&self, title: &str);
    fn set_meta(&self, name: &str, content: &str);
    fn set_meta_property(&self, property: &str, content: &str);
    fn set_canonical(&self, url: &str);
    fn set_structured_data(&self, data: Value);
    fn set_breadcrumb(&self, fragment: &str);
    fn set_active_nav(&self, path: &str);
    fn set_body_class(&self, class: &str);

    /// Replace the main content region.
    fn swap_content(&self, fragment: &str);

    fn scroll_to_top(&self);

    /// Push a history entry carrying `{path}` state.
    fn push_history(&self, path: &str, state: Value);

    /// Current location fragment path (without the leading `#`).
    fn current_path(&self) -> String;

    /// Attach and execute a script. Global functions the script defines
    /// become visible through [`has_global`](Self::has_global).
    async fn execute_script(&self, script: &InjectedScript) -> Result<ScriptHandle, HostError>;

    /// Remove a previously attached script element. Globals it defined
    /// persist, as they do in a real page.
    fn remove_script(&self, handle: ScriptHandle);

    /// Whether a global function with this name is currently defined.
    fn has_global(&self, name: &str) -> bool;

    /// Fire the one-time content-ready signal legacy scripts wait on.
    fn dispatch_content_ready(&self);
}

// ============================================================================
// In-memory implementation
// ============================================================================

#[derive(Default)]
struct DocumentState {
    title: String,
    metas: HashMap<String, String>,
    meta_properties: HashMap<String, String>,
    canonical: String,
    structured_data: Option<Value>,
    breadcrumb: String,
    active_nav: String,
    body_class: String,
    content: String,
    history: Vec<(String, Value)>,
    location_path: String,
    scripts: HashMap<u64, InjectedScript>,
    execution_log: Vec<String>,
    globals: HashMap<String, String>,
    content_ready_signals: usize,
    scrolls: usize,
    fail_marker: Option<String>,
    next_handle: u64,
}

/// Headless document that records every mutation.
///
/// Script "execution" scans the source for `function name(...)`
/// declarations and registers those names as globals owned by the
/// executing tool, which is enough to model the redefinition and leak
/// semantics the loader has to guarantee.
#[derive(Default)]
pub struct MemoryDocument {
    state: Mutex<DocumentState>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make execution fail for any script whose source contains `marker`.
    pub fn fail_scripts_containing(&self, marker: impl Into<String>) {
        self.state().fail_marker = Some(marker.into());
    }

    /// Set the current location fragment path.
    pub fn set_location(&self, path: impl Into<String>) {
        self.state().location_path = path.into();
    }

    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    pub fn meta(&self, name: &str) -> Option<String> {
        self.state().metas.get(name).cloned()
    }

    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.state().meta_properties.get(property).cloned()
    }

    pub fn canonical(&self) -> String {
        self.state().canonical.clone()
    }

    pub fn structured_data(&self) -> Option<Value> {
        self.state().structured_data.clone()
    }

    pub fn breadcrumb(&self) -> String {
        self.state().breadcrumb.clone()
    }

    pub fn body_class(&self) -> String {
        self.state().body_class.clone()
    }

    pub fn content(&self) -> String {
        self.state().content.clone()
    }

    pub fn history(&self) -> Vec<(String, Value)> {
        self.state().history.clone()
    }

    /// Scripts currently attached (not yet removed), in attach order.
    pub fn attached_scripts(&self) -> Vec<InjectedScript> {
        let state = self.state();
        let mut handles: Vec<&u64> = state.scripts.keys().collect();
        handles.sort();
        handles
            .into_iter()
            .map(|h| state.scripts[h].clone())
            .collect()
    }

    /// Every script execution so far, as `url` or `inline:<tool_id>`.
    pub fn execution_log(&self) -> Vec<String> {
        self.state().execution_log.clone()
    }

    /// Which tool's script last defined the given global.
    pub fn global_owner(&self, name: &str) -> Option<String> {
        self.state().globals.get(name).cloned()
    }

    pub fn content_ready_signals(&self) -> usize {
        self.state().content_ready_signals
    }

    pub fn scrolls(&self) -> usize {
        self.state().scrolls
    }

    fn state(&self) -> std::sync::MutexGuard<'_, DocumentState> {
        self.state.lock().expect("document state lock poisoned")
    }
}

/// Pull `function name(` declarations out of script source.
fn declared_functions(source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = source;
    while let Some(pos) = rest.find("function") {
        rest = &rest[pos + "function".len()..];
        let trimmed = rest.trim_start();
        let name: String = trimmed
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        if !name.is_empty() && trimmed[name.len()..].trim_start().starts_with('(') {
            names.push(name);
        }
    }
    names
}

#[async_trait]
impl DocumentHost for MemoryDocument {
    fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
    }

    fn set_meta(&self, name: &str, content: &str) {
        self.state()
            .metas
            .insert(name.to_string(), content.to_string());
    }

    fn set_meta_property(&self, property: &str, content: &str) {
        self.state()
            .meta_properties
            .insert(property.to_string(), content.to_string());
    }

    fn set_canonical(&self, url: &str) {
        self.state().canonical = url.to_string();
    }

    fn set_structured_data(&self, data: Value) {
        self.state().structured_data = Some(data);
    }

    fn set_breadcrumb(&self, fragment: &str) {
        self.state().breadcrumb = fragment.to_string();
    }

    fn set_active_nav(&self, path: &str) {
        self.state().active_nav = path.to_string();
    }

    fn set_body_class(&self, class: &str) {
        self.state().body_class = class.to_string();
    }

    fn swap_content(&self, fragment: &str) {
        self.state().content = fragment.to_string();
    }

    fn scroll_to_top(&self) {
        self.state().scrolls += 1;
    }

    fn push_history(&self, path: &str, state: Value) {
        let mut doc = self.state();
        doc.history.push((path.to_string(), state));
        doc.location_path = path.to_string();
    }

    fn current_path(&self) -> String {
        self.state().location_path.clone()
    }

    async fn execute_script(&self, script: &InjectedScript) -> Result<ScriptHandle, HostError> {
        let mut state = self.state();

        let label = match &script.kind {
            ScriptKind::External { url, .. } => url.clone(),
            ScriptKind::Inline { .. } => format!("inline:{}", script.tool_id),
        };
        state.execution_log.push(label.clone());

        if let Some(marker) = &state.fail_marker
            && script.source().contains(marker.as_str())
        {
            return Err(HostError::script(format!("induced failure in {label}")));
        }

        for name in declared_functions(script.source()) {
            state.globals.insert(name, script.tool_id.clone());
        }

        state.next_handle += 1;
        let handle = state.next_handle;
        state.scripts.insert(handle, script.clone());

        debug!("Executed script {} for tool {}", label, script.tool_id);
        Ok(ScriptHandle(handle))
    }

    fn remove_script(&self, handle: ScriptHandle) {
        self.state().scripts.remove(&handle.0);
    }

    fn has_global(&self, name: &str) -> bool {
        self.state().globals.contains_key(name)
    }

    fn dispatch_content_ready(&self) {
        self.state().content_ready_signals += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_script_registers_globals() {
        let doc = MemoryDocument::new();
        let script = InjectedScript::inline("json-formatter", "function formatJSON() { }");
        doc.execute_script(&script).await.unwrap();

        assert!(doc.has_global("formatJSON"));
        assert_eq!(doc.global_owner("formatJSON").as_deref(), Some("json-formatter"));
    }

    #[tokio::test]
    async fn test_redefinition_changes_owner() {
        let doc = MemoryDocument::new();
        doc.execute_script(&InjectedScript::inline("x", "function run() {}"))
            .await
            .unwrap();
        doc.execute_script(&InjectedScript::inline("y", "function run() {}"))
            .await
            .unwrap();

        assert_eq!(doc.global_owner("run").as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_remove_script_keeps_globals() {
        let doc = MemoryDocument::new();
        let handle = doc
            .execute_script(&InjectedScript::inline("x", "function go() {}"))
            .await
            .unwrap();
        doc.remove_script(handle);

        assert!(doc.attached_scripts().is_empty());
        assert!(doc.has_global("go"));
    }

    #[tokio::test]
    async fn test_fail_marker() {
        let doc = MemoryDocument::new();
        doc.fail_scripts_containing("boom");

        let result = doc
            .execute_script(&InjectedScript::inline("x", "boom()"))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_declared_functions_parsing() {
        let names = declared_functions(
            "function alpha() {} var x = 1; function beta_2 (a, b) {} function () {}",
        );
        assert_eq!(names, vec!["alpha".to_string(), "beta_2".to_string()]);
    }

    #[test]
    fn test_push_history_moves_location() {
        let doc = MemoryDocument::new();
        doc.push_history("/tools", serde_json::json!({ "path": "/tools" }));
        assert_eq!(doc.current_path(), "/tools");
        assert_eq!(doc.history().len(), 1);
    }
}
