//! Route table entries and pattern matching.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domains::pages::PageComponent;

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `/category/:id`.
///
/// Patterns are split once at registration; matching compares segment by
/// segment, binding `:param` segments by position.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|part| match part.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// The pattern string as registered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern has no parameter segments.
    pub fn is_exact(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Structural match: segment counts equal, every literal equal, every
    /// param captured verbatim after percent-decoding. Returns the bound
    /// params on success.
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| (*part).to_string());
                    params.insert(name.clone(), value);
                }
            }
        }

        Some(params)
    }
}

/// A registered route: pattern, page metadata defaults, component tag.
///
/// Routes are registered once at startup and never mutated; per-navigation
/// state lives in [`ResolvedRoute`].
#[derive(Debug, Clone)]
pub struct Route {
    pub pattern: RoutePattern,
    pub title: String,
    pub description: String,
    pub component: PageComponent,
}

impl Route {
    pub fn new(
        pattern: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        component: PageComponent,
    ) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            title: title.into(),
            description: description.into(),
            component,
        }
    }
}

/// The route a navigation resolved to, with its bound params. Replaced
/// wholesale on every successful navigation; never mutated in place.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub route: Arc<Route>,
    pub path: String,
    pub params: HashMap<String, String>,
}

/// Normalize a navigation path: empty becomes `/`, and a leading slash is
/// guaranteed.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    if !path.starts_with('/') {
        return format!("/{path}");
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern() {
        let pattern = RoutePattern::parse("/tools");
        assert!(pattern.is_exact());
        assert!(pattern.match_path("/tools").unwrap().is_empty());
        assert!(pattern.match_path("/tool").is_none());
        assert!(pattern.match_path("/tools/x").is_none());
    }

    #[test]
    fn test_param_pattern_binds_by_position() {
        let pattern = RoutePattern::parse("/category/:id");
        assert!(!pattern.is_exact());

        let params = pattern.match_path("/category/abc").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_param_percent_decoding() {
        let pattern = RoutePattern::parse("/category/:id");
        let params = pattern.match_path("/category/a%20b").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_segment_count_must_match() {
        let pattern = RoutePattern::parse("/tool/:id");
        assert!(pattern.match_path("/tool").is_none());
        assert!(pattern.match_path("/tool/a/b").is_none());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("tools"), "/tools");
        assert_eq!(normalize_path("/tools"), "/tools");
    }
}
