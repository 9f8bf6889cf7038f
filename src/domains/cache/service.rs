//! Cache lifecycle and fetch interception.
//!
//! Mirrors the service-worker contract: install precaches the shell,
//! activate evicts partitions from older versions, and every in-scope
//! GET is answered by a per-class strategy. Control messages let the
//! page force activation or wipe the caches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::config::CacheConfig;
use crate::core::host::{FetchRequest, FetchResponse, Network};

use super::error::CacheError;
use super::policy::{self, RequestClass};
use super::store::CacheStore;

/// Partition names for one cache version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionNames {
    pub static_assets: String,
    pub dynamic: String,
    pub images: String,
}

impl PartitionNames {
    pub fn for_version(version: &str) -> Self {
        Self {
            static_assets: format!("station-static-{version}"),
            dynamic: format!("station-dynamic-{version}"),
            images: format!("station-images-{version}"),
        }
    }

    fn contains(&self, name: &str) -> bool {
        name == self.static_assets || name == self.dynamic || name == self.images
    }
}

/// What the cache manager decided for an intercepted request.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Answer with this response.
    Response(FetchResponse),

    /// Out of scope; the host performs the request untouched.
    PassThrough,
}

/// Control messages posted by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ControlMessage {
    #[serde(rename = "skipWaiting")]
    SkipWaiting,

    #[serde(rename = "clearCache")]
    ClearCache,
}

/// The offline cache manager.
pub struct CacheManager {
    config: CacheConfig,
    origin: String,
    network: Arc<dyn Network>,
    store: Arc<dyn CacheStore>,
    partitions: PartitionNames,
    installed: AtomicBool,
    activated: AtomicBool,
}

impl CacheManager {
    pub fn new(
        config: CacheConfig,
        origin: impl Into<String>,
        network: Arc<dyn Network>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        let partitions = PartitionNames::for_version(&config.version);
        Self {
            config,
            origin: origin.into(),
            network,
            store,
            partitions,
            installed: AtomicBool::new(false),
            activated: AtomicBool::new(false),
        }
    }

    pub fn partitions(&self) -> &PartitionNames {
        &self.partitions
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    pub fn is_activated(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    /// Install: fetch every precache resource into the static partition,
    /// then warm the dynamic partition with `warm_paths`. The precache
    /// step is atomic; any failure aborts the whole install and nothing
    /// is stored. Warm-up is best effort; individual failures are logged
    /// and skipped.
    pub async fn install(&self, warm_paths: &[String]) -> Result<(), CacheError> {
        info!(version = self.config.version, "cache install started");

        let fetches = self.config.precache.iter().map(|path| {
            let url = self.absolute(path);
            async move {
                let result = self.network.fetch(&FetchRequest::get(&url)).await;
                (url, result)
            }
        });

        let mut fetched = Vec::with_capacity(self.config.precache.len());
        for (url, result) in join_all(fetches).await {
            match result {
                Ok(response) if response.is_ok() => fetched.push((url, response)),
                _ => {
                    warn!(url, "precache fetch failed, aborting install");
                    return Err(CacheError::precache(url));
                }
            }
        }

        for (url, response) in fetched {
            self.store.put(&self.partitions.static_assets, &url, response);
        }

        self.warm_pages(warm_paths).await;

        self.installed.store(true, Ordering::SeqCst);
        info!(
            precached = self.config.precache.len(),
            warmed = warm_paths.len(),
            "cache install complete, waiting skipped"
        );
        Ok(())
    }

    /// Warm the dynamic partition with additional pages, best effort.
    async fn warm_pages(&self, paths: &[String]) {
        for path in paths {
            let url = self.absolute(path);
            match self.network.fetch(&FetchRequest::document(&url)).await {
                Ok(response) if response.is_ok() => {
                    self.store.put(&self.partitions.dynamic, &url, response);
                }
                _ => debug!(url, "page warm-up fetch failed, skipped"),
            }
        }
    }

    /// Activate: evict every partition that does not belong to the
    /// current version, then take control of open pages.
    pub async fn activate(&self) {
        let stale: Vec<String> = self
            .store
            .partitions()
            .into_iter()
            .filter(|name| !self.partitions.contains(name))
            .collect();

        for name in stale {
            info!(partition = name, "evicting stale cache partition");
            self.store.delete_partition(&name);
        }

        self.activated.store(true, Ordering::SeqCst);
        info!(version = self.config.version, "cache activated, clients claimed");
    }

    /// Answer an intercepted request, or decline it.
    #[tracing::instrument(skip(self, request), fields(url = %request.url), level = "debug")]
    pub async fn handle_fetch(&self, request: &FetchRequest) -> FetchOutcome {
        if !policy::in_scope(request, &self.origin, &self.config.allowed_hosts) {
            return FetchOutcome::PassThrough;
        }

        let response = match policy::classify(request) {
            RequestClass::Html => self.network_first(request, &self.partitions.dynamic, true).await,
            RequestClass::Image => {
                self.cache_first(request, &self.partitions.images, 404).await
            }
            RequestClass::StaticAsset => {
                self.cache_first(request, &self.partitions.static_assets, 503).await
            }
            RequestClass::Other => {
                self.network_first(request, &self.partitions.dynamic, false).await
            }
        };

        FetchOutcome::Response(response)
    }

    /// Handle a control message posted by the page.
    pub async fn handle_message(&self, message: serde_json::Value) -> Result<(), CacheError> {
        match serde_json::from_value::<ControlMessage>(message)? {
            ControlMessage::SkipWaiting => {
                info!("skipWaiting requested, activating immediately");
                self.activate().await;
            }
            ControlMessage::ClearCache => {
                info!("clearCache requested, dropping all partitions");
                self.store.clear();
            }
        }
        Ok(())
    }

    /// Network first; a successful response refreshes the cache, failure
    /// falls back to any cached copy. HTML gets the shell or the
    /// precached not-found document as a last resort, everything else a
    /// 503.
    async fn network_first(
        &self,
        request: &FetchRequest,
        partition: &str,
        offline_shell: bool,
    ) -> FetchResponse {
        match self.network.fetch(request).await {
            Ok(response) if response.is_ok() => {
                self.store.put(partition, &request.url, response.clone());
                response
            }
            Ok(response) => response,
            Err(err) => {
                debug!(url = request.url, %err, "network failed, trying cache");
                if let Some(entry) = self.store.match_any(&request.url) {
                    return entry.response;
                }
                if offline_shell {
                    for fallback in ["/index.html", "/404.html"] {
                        if let Some(entry) = self.store.match_any(&self.absolute(fallback)) {
                            return entry.response;
                        }
                    }
                }
                FetchResponse::status(503)
            }
        }
    }

    /// Cache first; a miss goes to the network and fills the partition.
    /// Total failure answers with `miss_status` and an empty body.
    async fn cache_first(
        &self,
        request: &FetchRequest,
        partition: &str,
        miss_status: u16,
    ) -> FetchResponse {
        if let Some(entry) = self.store.get(partition, &request.url) {
            return entry.response;
        }
        if let Some(entry) = self.store.match_any(&request.url) {
            return entry.response;
        }

        match self.network.fetch(request).await {
            Ok(response) if response.is_ok() => {
                self.store.put(partition, &request.url, response.clone());
                response
            }
            Ok(response) => response,
            Err(err) => {
                debug!(url = request.url, %err, "cache miss and network failed");
                FetchResponse::status(miss_status)
            }
        }
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{path}", self.origin)
        }
    }
}
