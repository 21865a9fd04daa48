//! Filename Convention Module
//!
//! Parses route file names of the form `<method>-<segment>[-<segment>...]`.

use std::fmt;

// == Http Method ==
/// The fixed set of HTTP methods a route file may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    // == From Token ==
    /// Parses a method token, case-insensitively.
    ///
    /// # Returns
    /// - `Some(method)` when the token names a supported method
    /// - `None` otherwise (the caller skips the file with a warning)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            _ => None,
        }
    }

    // == As Str ==
    /// Canonical lowercase form of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Options => "options",
            Self::Head => "head",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Parsed Filename ==
/// Result of parsing a route file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    /// HTTP method declared by the first dash-token
    pub method: HttpMethod,
    /// Remaining dash-tokens, each its own URL path segment
    pub segments: Vec<String>,
}

// == Parse Filename ==
/// Parses an extensionless file stem of the form `<method>-<segments...>`.
///
/// The first dash-token (lowercased) must name a supported HTTP method; the
/// remaining tokens become the endpoint segments. Zero remaining tokens is
/// valid: the route mounts directly at its directory's base path.
///
/// # Arguments
/// * `stem` - File base name with the extension already stripped
///
/// # Returns
/// - `Some(ParsedFilename)` when the stem follows the convention
/// - `None` when the method token is unknown
pub fn parse_filename(stem: &str) -> Option<ParsedFilename> {
    let mut tokens = stem.split('-');
    let method = HttpMethod::from_token(tokens.next()?)?;
    let segments = tokens.map(str::to_string).collect();

    Some(ParsedFilename { method, segments })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_filename() {
        let parsed = parse_filename("get-widgets").unwrap();
        assert_eq!(parsed.method, HttpMethod::Get);
        assert_eq!(parsed.segments, vec!["widgets".to_string()]);
    }

    #[test]
    fn test_parse_multi_segment_filename() {
        let parsed = parse_filename("post-forgot-password").unwrap();
        assert_eq!(parsed.method, HttpMethod::Post);
        assert_eq!(
            parsed.segments,
            vec!["forgot".to_string(), "password".to_string()]
        );
    }

    #[test]
    fn test_parse_method_case_insensitive() {
        let parsed = parse_filename("GET-widgets").unwrap();
        assert_eq!(parsed.method, HttpMethod::Get);

        let parsed = parse_filename("Post-login").unwrap();
        assert_eq!(parsed.method, HttpMethod::Post);
    }

    #[test]
    fn test_parse_method_only() {
        // No endpoint tokens: the route mounts at the base path
        let parsed = parse_filename("get").unwrap();
        assert_eq!(parsed.method, HttpMethod::Get);
        assert!(parsed.segments.is_empty());
    }

    #[test]
    fn test_parse_unknown_method() {
        assert!(parse_filename("foo-widgets").is_none());
        assert!(parse_filename("fetch-widgets").is_none());
        assert!(parse_filename("").is_none());
    }

    #[test]
    fn test_all_methods_parse() {
        for token in ["get", "post", "put", "delete", "patch", "options", "head"] {
            let stem = format!("{token}-thing");
            let parsed = parse_filename(&stem).unwrap();
            assert_eq!(parsed.method.as_str(), token);
        }
    }

    #[test]
    fn test_method_display_is_lowercase() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }
}
