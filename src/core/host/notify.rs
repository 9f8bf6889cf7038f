//! Notification host - analytics pings and non-fatal user warnings.
//!
//! The analytics collector and the toast widget are ordinary UI glue
//! outside this engine; this trait is their seam. Failures reported here
//! are informational only and never affect navigation.

use std::sync::Mutex;

/// Sink for page-view beacons and non-fatal warnings.
pub trait Notifier: Send + Sync {
    /// A navigation completed; `path` is the resolved fragment path.
    fn page_view(&self, path: &str, title: &str);

    /// Something degraded (tool UI unavailable, script failed) but the
    /// page is still usable.
    fn warning(&self, message: &str);
}

/// Discards all notifications.
#[derive(Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn page_view(&self, _path: &str, _title: &str) {}
    fn warning(&self, _message: &str) {}
}

/// Records notifications for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    page_views: Mutex<Vec<(String, String)>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_views(&self) -> Vec<(String, String)> {
        self.page_views
            .lock()
            .expect("page view log lock poisoned")
            .clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .expect("warning log lock poisoned")
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn page_view(&self, path: &str, title: &str) {
        self.page_views
            .lock()
            .expect("page view log lock poisoned")
            .push((path.to_string(), title.to_string()));
    }

    fn warning(&self, message: &str) {
        self.warnings
            .lock()
            .expect("warning log lock poisoned")
            .push(message.to_string());
    }
}
