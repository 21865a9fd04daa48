//! Cache Key Module
//!
//! Derives deterministic cache keys from an identity, a request path and a
//! canonicalized query map.

use std::collections::BTreeMap;

use url::form_urlencoded;

// == Query Map ==
/// Canonical form of a request query string.
///
/// A BTreeMap keeps keys sorted, so two queries that differ only in parameter
/// order serialize identically. Repeated parameters collect into the value
/// vector in their original order.
pub type QueryMap = BTreeMap<String, Vec<String>>;

// == Public Constants ==
/// Reserved query flag requesting a forced bypass-and-refresh
pub const NO_CACHE_FLAG: &str = "noCache";

// == Parse Query ==
/// Parses a raw query string into its canonical map form.
///
/// Percent-encoding is decoded; an empty or absent query yields an empty map.
pub fn parse_query(raw: &str) -> QueryMap {
    let mut map = QueryMap::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        map.entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    map
}

// == Take Refresh Flag ==
/// Removes the reserved refresh flag from the query map.
///
/// Stripping happens before key derivation, so a forced-refresh request
/// addresses the same entry as its plain counterpart and the repopulated
/// value is found by later plain requests.
///
/// # Returns
/// `true` only when the flag was present exactly once with the value `true`.
pub fn take_refresh_flag(query: &mut QueryMap) -> bool {
    match query.remove(NO_CACHE_FLAG) {
        Some(values) => values.len() == 1 && values[0] == "true",
        None => false,
    }
}

// == Derive Key ==
/// Builds the cache key for `(identity, path, query)`.
///
/// The same three inputs always produce the same key, and two identities
/// never share a key for the same path and query.
pub fn derive_key(identity: &str, path: &str, query: &QueryMap) -> String {
    let query_json =
        serde_json::to_string(query).expect("query map of strings always serializes");
    format!("{identity}:{path}:{query_json}")
}
