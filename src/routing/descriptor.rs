//! Route Descriptor Module
//!
//! The parsed identity of a discovered route file.

use super::{normalize_route_path, parse_filename, HttpMethod};

// == Route Descriptor ==
/// Method and path derived from a route file's name and location.
///
/// Built once per discovered file during the startup walk and dropped after
/// registration; the router owns the route table afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// HTTP method declared by the file name
    pub method: HttpMethod,
    /// Endpoint segments from the file name
    pub endpoint_segments: Vec<String>,
    /// Directory path relative to the route root
    pub base_path: String,
    /// Full URL path, `/`-separated, rooted at `/api`
    pub canonical_path: String,
}

impl RouteDescriptor {
    // == Constructor ==
    /// Derives a descriptor from a file stem and its base directory path.
    ///
    /// # Returns
    /// - `Some(descriptor)` when the stem follows the `<method>-<segments>`
    ///   convention
    /// - `None` when the method token is not a supported method
    pub fn from_stem(stem: &str, base_path: &str) -> Option<Self> {
        let parsed = parse_filename(stem)?;
        let canonical_path = normalize_route_path(base_path, &parsed.segments);

        Some(Self {
            method: parsed.method,
            endpoint_segments: parsed.segments,
            base_path: base_path.to_string(),
            canonical_path,
        })
    }

    // == Group ==
    /// First path segment under `/api`, used for startup reporting.
    ///
    /// Routes mounted directly at `/api` fall into the `"api"` group.
    pub fn group(&self) -> &str {
        self.canonical_path
            .split('/')
            .nth(2)
            .filter(|g| !g.is_empty())
            .unwrap_or("api")
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_stem() {
        let desc = RouteDescriptor::from_stem("post-login", "user").unwrap();
        assert_eq!(desc.method, HttpMethod::Post);
        assert_eq!(desc.endpoint_segments, vec!["login".to_string()]);
        assert_eq!(desc.base_path, "user");
        assert_eq!(desc.canonical_path, "/api/user/login");
    }

    #[test]
    fn test_descriptor_multi_segment_endpoint() {
        let desc = RouteDescriptor::from_stem("post-forgot-password", "user").unwrap();
        assert_eq!(desc.canonical_path, "/api/user/forgot/password");
    }

    #[test]
    fn test_descriptor_invalid_method() {
        assert!(RouteDescriptor::from_stem("foo-widgets", "shop").is_none());
    }

    #[test]
    fn test_descriptor_group() {
        let desc = RouteDescriptor::from_stem("get-stats", "cache").unwrap();
        assert_eq!(desc.group(), "cache");

        let nested = RouteDescriptor::from_stem("get-list", "shop/admin").unwrap();
        assert_eq!(nested.group(), "shop");

        let root = RouteDescriptor::from_stem("get", "").unwrap();
        assert_eq!(root.group(), "api");
    }
}
