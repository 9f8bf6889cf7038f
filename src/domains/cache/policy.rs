//! Request classification and cache scope.
//!
//! Every intercepted request is first scoped (same-origin or allow-listed
//! host, GET only) and then classified; the class picks the caching
//! strategy and the destination partition.

use url::Url;

use crate::core::host::{FetchRequest, ResourceDestination};

/// Strategy class for an in-scope request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// HTML navigations: network-first, dynamic partition.
    Html,

    /// Images: cache-first, images partition.
    Image,

    /// Scripts, styles, fonts: cache-first, static partition.
    StaticAsset,

    /// Everything else: network with cache fallback, dynamic partition.
    Other,
}

const IMAGE_EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico"];
const STATIC_EXTENSIONS: [&str; 4] = [".js", ".css", ".woff", ".woff2"];

/// Classify an in-scope request. The reported destination wins; the URL
/// extension is the fallback for requesters that do not set one.
pub fn classify(request: &FetchRequest) -> RequestClass {
    match request.destination {
        ResourceDestination::Document => return RequestClass::Html,
        ResourceDestination::Image => return RequestClass::Image,
        ResourceDestination::Script | ResourceDestination::Style | ResourceDestination::Font => {
            return RequestClass::StaticAsset;
        }
        ResourceDestination::Other => {}
    }

    if request
        .accept
        .as_deref()
        .is_some_and(|accept| accept.contains("text/html"))
    {
        return RequestClass::Html;
    }

    let path = url_path(&request.url);
    if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return RequestClass::Image;
    }
    if STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return RequestClass::StaticAsset;
    }

    RequestClass::Other
}

/// Whether the cache manager handles this request at all. Non-GET
/// methods and hosts outside the origin and allow-list pass through
/// untouched.
pub fn in_scope(request: &FetchRequest, origin: &str, allowed_hosts: &[String]) -> bool {
    if !request.method.eq_ignore_ascii_case("GET") {
        return false;
    }

    if request.url.starts_with(origin) {
        return true;
    }

    match Url::parse(&request.url) {
        Ok(url) => url
            .host_str()
            .is_some_and(|host| allowed_hosts.iter().any(|allowed| allowed == host)),
        Err(_) => false,
    }
}

fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url.to_lowercase(),
    }
}
