//! Network host - the fetch seam.
//!
//! Both the tool-page loader and the cache manager issue requests through
//! the [`Network`] trait. The in-memory implementation serves canned
//! responses and can be switched "offline" to exercise failure paths; the
//! reqwest-backed implementation (behind the `http` feature) performs
//! real requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::HostError;

/// What kind of resource a request is for, mirroring the browser's
/// `Request.destination`. Drives the cache manager's per-class policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceDestination {
    Document,
    Script,
    Style,
    Font,
    Image,
    Other,
}

/// An outgoing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Absolute URL.
    pub url: String,

    /// HTTP method; everything except GET bypasses the cache manager.
    pub method: String,

    /// Resource destination as reported by the requester.
    pub destination: ResourceDestination,

    /// `Accept` header value, when known.
    pub accept: Option<String>,
}

impl FetchRequest {
    /// A GET request for an arbitrary resource.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            destination: ResourceDestination::Other,
            accept: None,
        }
    }

    /// A GET request for an HTML document.
    pub fn document(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            destination: ResourceDestination::Document,
            accept: Some("text/html".to_string()),
        }
    }

    /// A GET request for a script resource.
    pub fn script(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            destination: ResourceDestination::Script,
            accept: None,
        }
    }

    pub fn with_destination(mut self, destination: ResourceDestination) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }
}

/// A response body plus the status/content-type the policies care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
}

impl FetchResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_type: None,
        }
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the status is a 2xx success.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The fetch seam.
#[async_trait]
pub trait Network: Send + Sync {
    /// Issue a request. `Err` means the request never completed (network
    /// down); non-2xx statuses come back as `Ok` responses.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, HostError>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

/// Canned-response network used by tests and the default build.
#[derive(Default)]
pub struct MemoryNetwork {
    routes: Mutex<HashMap<String, FetchResponse>>,
    offline: Mutex<bool>,
    log: Mutex<Vec<String>>,
}

impl MemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for the exact URL `url`.
    pub fn serve(&self, url: impl Into<String>, response: FetchResponse) {
        self.routes
            .lock()
            .expect("network routes lock poisoned")
            .insert(url.into(), response);
    }

    /// Stop serving a URL, so fetches for it fail.
    pub fn remove(&self, url: &str) {
        self.routes
            .lock()
            .expect("network routes lock poisoned")
            .remove(url);
    }

    /// Simulate losing connectivity; every fetch fails until restored.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().expect("network state lock poisoned") = offline;
    }

    /// URLs fetched so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.log.lock().expect("network log lock poisoned").clone()
    }
}

#[async_trait]
impl Network for MemoryNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, HostError> {
        self.log
            .lock()
            .expect("network log lock poisoned")
            .push(request.url.clone());

        if *self.offline.lock().expect("network state lock poisoned") {
            return Err(HostError::fetch(format!("offline: {}", request.url)));
        }

        self.routes
            .lock()
            .expect("network routes lock poisoned")
            .get(&request.url)
            .cloned()
            .ok_or_else(|| HostError::fetch(format!("unreachable: {}", request.url)))
    }
}

// ============================================================================
// HTTP implementation (feature = "http")
// ============================================================================

/// reqwest-backed network for production use.
#[cfg(feature = "http")]
pub struct HttpNetwork {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpNetwork {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, HostError> {
        let mut builder = self.client.get(&request.url);
        if let Some(accept) = &request.accept {
            builder = builder.header(reqwest::header::ACCEPT, accept);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HostError::fetch(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|e| HostError::fetch(e.to_string()))?;

        Ok(FetchResponse {
            status,
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_network_serves_canned_response() {
        let network = MemoryNetwork::new();
        network.serve("https://example.test/a.html", FetchResponse::ok("hello"));

        let response = network
            .fetch(&FetchRequest::document("https://example.test/a.html"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "hello");
    }

    #[tokio::test]
    async fn test_memory_network_unknown_url_fails() {
        let network = MemoryNetwork::new();
        let result = network
            .fetch(&FetchRequest::get("https://example.test/missing"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_memory_network_offline() {
        let network = MemoryNetwork::new();
        network.serve("https://example.test/a", FetchResponse::ok("x"));
        network.set_offline(true);

        assert!(
            network
                .fetch(&FetchRequest::get("https://example.test/a"))
                .await
                .is_err()
        );

        network.set_offline(false);
        assert!(
            network
                .fetch(&FetchRequest::get("https://example.test/a"))
                .await
                .is_ok()
        );
    }
}
