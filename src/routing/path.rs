//! Route Path Module
//!
//! Normalizes a base directory path plus endpoint segments into a canonical
//! URL path rooted at `/api`.

use super::API_PREFIX;

// == Normalize Route Path ==
/// Joins the API prefix, a base directory path and endpoint segments into a
/// canonical `/`-separated URL path.
///
/// Host-specific separators (`\` on Windows) in the base path are converted
/// and empty tokens are dropped, so the output is identical regardless of the
/// filesystem the tree was walked on.
///
/// # Arguments
/// * `base_path` - Directory path relative to the route root (`""` at the root)
/// * `segments` - Endpoint segments from the parsed file name
///
/// # Returns
/// A path of the form `/api[/base...][/segment...]`.
pub fn normalize_route_path(base_path: &str, segments: &[String]) -> String {
    let mut path = String::from(API_PREFIX);

    let base = base_path.replace('\\', "/");
    for token in base.split('/').filter(|t| !t.is_empty()) {
        path.push('/');
        path.push_str(token);
    }
    for segment in segments.iter().filter(|s| !s.is_empty()) {
        path.push('/');
        path.push_str(segment);
    }

    path
}
