//! Stand-in handlers for not-yet-defined tool functions.
//!
//! Legacy tool markup wires buttons to global functions that only exist
//! after the tool's scripts have executed. Until then, each referenced
//! name gets a stand-in: invocations made through a stand-in are queued,
//! and once the real implementation is defined the queue is drained into
//! it in arrival order. A queue that never drains is dropped with the
//! tool's cleanup; nothing retries on a timer.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::core::host::DocumentHost;

/// A handler invocation that was forwarded to a real implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredCall {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Default)]
struct Inner {
    installed: HashSet<String>,
    queued: HashMap<String, Vec<Vec<String>>>,
    delivered: Vec<DeliveredCall>,
}

/// Registry of stand-in handlers for one tool activation.
#[derive(Default)]
pub struct StandInRegistry {
    inner: Mutex<Inner>,
}

impl StandInRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a stand-in for `name`. Idempotent; a name that already has
    /// a real implementation on the document is left alone.
    pub fn install(&self, name: &str, document: &dyn DocumentHost) {
        if document.has_global(name) {
            return;
        }
        let mut inner = self.lock();
        if inner.installed.insert(name.to_string()) {
            debug!(handler = name, "installed stand-in handler");
        }
    }

    /// Whether a stand-in is currently installed for `name`.
    pub fn is_installed(&self, name: &str) -> bool {
        self.lock().installed.contains(name)
    }

    /// Invoke a handler by name. Forwards immediately when the real
    /// implementation exists, otherwise queues the call. Returns `true`
    /// when the call was delivered.
    pub fn invoke(&self, name: &str, args: &[&str], document: &dyn DocumentHost) -> bool {
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        let mut inner = self.lock();

        if document.has_global(name) {
            inner.delivered.push(DeliveredCall {
                name: name.to_string(),
                args,
            });
            return true;
        }

        if !inner.installed.contains(name) {
            warn!(handler = name, "invocation of unknown handler dropped");
            return false;
        }

        inner.queued.entry(name.to_string()).or_default().push(args);
        false
    }

    /// Drain queues whose real implementation now exists on the document.
    /// Called after each script batch finishes. Returns the calls that
    /// were forwarded.
    pub fn flush(&self, document: &dyn DocumentHost) -> Vec<DeliveredCall> {
        let mut inner = self.lock();
        let ready: Vec<String> = inner
            .queued
            .keys()
            .filter(|name| document.has_global(name))
            .cloned()
            .collect();

        let mut forwarded = Vec::new();
        for name in ready {
            if let Some(calls) = inner.queued.remove(&name) {
                for args in calls {
                    forwarded.push(DeliveredCall {
                        name: name.clone(),
                        args,
                    });
                }
            }
            inner.installed.remove(&name);
        }

        if !forwarded.is_empty() {
            debug!(count = forwarded.len(), "flushed queued handler calls");
        }
        inner.delivered.extend(forwarded.clone());
        forwarded
    }

    /// Drop all stand-ins and queued calls. Run with the owning tool's
    /// cleanup so queues never outlive the tool.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.installed.clear();
        inner.queued.clear();
    }

    /// All calls forwarded to real implementations so far.
    pub fn delivered(&self) -> Vec<DeliveredCall> {
        self.lock().delivered.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{InjectedScript, MemoryDocument};

    #[tokio::test]
    async fn test_queued_call_flushes_after_definition() {
        let document = MemoryDocument::new();
        let registry = StandInRegistry::new();

        registry.install("formatJSON", &document);
        assert!(!registry.invoke("formatJSON", &[], &document));

        document
            .execute_script(&InjectedScript::inline(
                "json-formatter",
                "function formatJSON() {}",
            ))
            .await
            .unwrap();

        let forwarded = registry.flush(&document);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].name, "formatJSON");
        assert!(!registry.is_installed("formatJSON"));
    }

    #[tokio::test]
    async fn test_direct_delivery_when_already_defined() {
        let document = MemoryDocument::new();
        document
            .execute_script(&InjectedScript::inline("t", "function run() {}"))
            .await
            .unwrap();

        let registry = StandInRegistry::new();
        registry.install("run", &document);
        assert!(!registry.is_installed("run"));
        assert!(registry.invoke("run", &["a"], &document));
        assert_eq!(registry.delivered().len(), 1);
    }

    #[tokio::test]
    async fn test_queue_preserves_arrival_order() {
        let document = MemoryDocument::new();
        let registry = StandInRegistry::new();

        registry.install("go", &document);
        registry.invoke("go", &["first"], &document);
        registry.invoke("go", &["second"], &document);

        document
            .execute_script(&InjectedScript::inline("t", "function go(x) {}"))
            .await
            .unwrap();

        let forwarded = registry.flush(&document);
        assert_eq!(forwarded[0].args, vec!["first".to_string()]);
        assert_eq!(forwarded[1].args, vec!["second".to_string()]);
    }

    #[tokio::test]
    async fn test_clear_drops_queued_calls() {
        let document = MemoryDocument::new();
        let registry = StandInRegistry::new();

        registry.install("go", &document);
        registry.invoke("go", &[], &document);
        registry.clear();

        document
            .execute_script(&InjectedScript::inline("t", "function go() {}"))
            .await
            .unwrap();
        assert!(registry.flush(&document).is_empty());
    }

    #[test]
    fn test_unknown_handler_dropped() {
        let document = MemoryDocument::new();
        let registry = StandInRegistry::new();
        assert!(!registry.invoke("mystery", &[], &document));
        assert!(registry.delivered().is_empty());
    }
}
