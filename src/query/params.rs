//! Query Parameters and the Page Resolver
//!
//! Invalid pagination or sort input never fails a list request: every
//! resolver falls back to its documented default and logs a warning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// =============================================================================
// Constants
// =============================================================================

pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_OFFSET: usize = 0;
pub const DEFAULT_SORT_KEY: &str = "ID";

pub const LIMIT_KEY: &str = "limit";
pub const OFFSET_KEY: &str = "offset";
pub const SORT_DIR_KEY: &str = "sortDir";
pub const SORT_KEY_KEY: &str = "sortKey";

/// Keys that control paging and are never treated as field filters
pub const RESERVED_KEYS: [&str; 4] = [LIMIT_KEY, OFFSET_KEY, SORT_DIR_KEY, SORT_KEY_KEY];

// =============================================================================
// Sort Direction
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl std::fmt::Display for SortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDir::Asc => write!(f, "asc"),
            SortDir::Desc => write!(f, "desc"),
        }
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Parameter name to one or more values, as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `a=b&c=d` query string, percent-decoding names and values
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode_component(key), decode_component(value));
        }
        params
    }

    /// Append a value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Builder form of [`QueryParams::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value supplied for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Keys that are field filters rather than paging controls
    pub fn filter_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| !RESERVED_KEYS.contains(k))
    }

    /// Whether any field filter is present
    pub fn has_filters(&self) -> bool {
        self.filter_keys().next().is_some()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

// =============================================================================
// Resolvers
// =============================================================================

/// Explicit, valid `limit`, or `None` when the default applies
fn explicit_limit(params: &QueryParams) -> Option<usize> {
    let Some(raw) = params.first(LIMIT_KEY) else {
        warn!("The parameter limit is not present, use default value instead: {}", DEFAULT_LIMIT);
        return None;
    };

    match raw.parse::<i64>() {
        Ok(limit) if limit >= 0 => Some(limit as usize),
        _ => {
            warn!("Invalid input limit: {}, use default value instead: {}", raw, DEFAULT_LIMIT);
            None
        }
    }
}

/// Resolve `limit`
pub fn limit(params: &QueryParams) -> usize {
    explicit_limit(params).unwrap_or(DEFAULT_LIMIT)
}

/// Resolve `offset` against a collection of `size` elements
pub fn offset(params: &QueryParams, size: usize) -> usize {
    let Some(raw) = params.first(OFFSET_KEY) else {
        warn!("The parameter offset is not present, use default value instead: {}", DEFAULT_OFFSET);
        return DEFAULT_OFFSET;
    };

    match raw.parse::<i64>() {
        Ok(offset) if offset >= 0 && (offset as u64) <= size as u64 => offset as usize,
        _ => {
            warn!(
                "Invalid input offset or input offset is out of bounds: {}, use default value instead: {}",
                raw, DEFAULT_OFFSET
            );
            DEFAULT_OFFSET
        }
    }
}

/// Resolve `sortDir`
pub fn sort_dir(params: &QueryParams) -> SortDir {
    let Some(raw) = params.first(SORT_DIR_KEY) else {
        warn!("The parameter sortDir is not present, use default value instead: {}", SortDir::default());
        return SortDir::default();
    };

    if raw.eq_ignore_ascii_case("asc") {
        SortDir::Asc
    } else if raw.eq_ignore_ascii_case("desc") {
        SortDir::Desc
    } else {
        warn!("Invalid input sortDir: {}, use default value instead: {}", raw, SortDir::default());
        SortDir::default()
    }
}

/// Resolve `sortKey` against the kind's sortable fields
pub fn sort_key(params: &QueryParams, sortable: &[&str]) -> String {
    let Some(raw) = params.first(SORT_KEY_KEY) else {
        warn!("The parameter sortKey is not present, use default value instead: {}", DEFAULT_SORT_KEY);
        return DEFAULT_SORT_KEY.to_string();
    };

    let key = raw.to_uppercase();
    if sortable.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
        key
    } else {
        warn!("Invalid input sortKey: {}, use default value instead: {}", key, DEFAULT_SORT_KEY);
        DEFAULT_SORT_KEY.to_string()
    }
}

// =============================================================================
// Resolved Page Spec
// =============================================================================

/// Page bounds and ordering derived from a parameter map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPageSpec {
    pub begin: usize,
    /// Exclusive end index, never beyond the size resolved against
    pub end: usize,
    pub sort_dir: SortDir,
    pub sort_key: String,
}

impl ResolvedPageSpec {
    /// Resolve against a collection of `size` elements
    ///
    /// A limit that is absent, invalid or equal to [`DEFAULT_LIMIT`] means no
    /// limit: the page runs from the offset to the end.
    pub fn resolve(params: &QueryParams, size: usize, sortable: &[&str]) -> Self {
        let begin = offset(params, size);
        let end = match explicit_limit(params) {
            Some(limit) if limit != DEFAULT_LIMIT => limit.saturating_add(begin).min(size),
            _ => size,
        };

        Self {
            begin,
            end,
            sort_dir: sort_dir(params),
            sort_key: sort_key(params, sortable),
        }
    }

    /// Number of elements the page can hold
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCK_KEYS: &[&str] = &["ID", "NAME", "STATUS", "ENDPOINT", "DRIVERNAME", "DESCRIPTION"];

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_limit_fallbacks() {
        assert_eq!(limit(&params(&[])), DEFAULT_LIMIT);
        assert_eq!(limit(&params(&[("limit", "abc")])), DEFAULT_LIMIT);
        assert_eq!(limit(&params(&[("limit", "-3")])), DEFAULT_LIMIT);
        assert_eq!(limit(&params(&[("limit", "7")])), 7);
        assert_eq!(limit(&params(&[("limit", "0")])), 0);
    }

    #[test]
    fn test_offset_fallbacks() {
        assert_eq!(offset(&params(&[]), 10), 0);
        assert_eq!(offset(&params(&[("offset", "-1")]), 10), 0);
        assert_eq!(offset(&params(&[("offset", "x")]), 10), 0);
        assert_eq!(offset(&params(&[("offset", "11")]), 10), 0);
        assert_eq!(offset(&params(&[("offset", "10")]), 10), 10);
        assert_eq!(offset(&params(&[("offset", "4")]), 10), 4);
    }

    #[test]
    fn test_sort_dir_is_case_insensitive() {
        assert_eq!(sort_dir(&params(&[("sortDir", "ASC")])), SortDir::Asc);
        assert_eq!(sort_dir(&params(&[("sortDir", "Desc")])), SortDir::Desc);
        assert_eq!(sort_dir(&params(&[("sortDir", "up")])), SortDir::Desc);
        assert_eq!(sort_dir(&params(&[])), SortDir::Desc);
    }

    #[test]
    fn test_sort_key_normalizes_to_upper_case() {
        assert_eq!(sort_key(&params(&[("sortKey", "driverName")]), DOCK_KEYS), "DRIVERNAME");
        assert_eq!(sort_key(&params(&[("sortKey", "capacity")]), DOCK_KEYS), "ID");
        assert_eq!(sort_key(&params(&[]), DOCK_KEYS), "ID");
    }

    #[test]
    fn test_resolve_page_spec() {
        let spec = ResolvedPageSpec::resolve(&params(&[("limit", "3"), ("offset", "2")]), 10, DOCK_KEYS);
        assert_eq!((spec.begin, spec.end), (2, 5));
        assert_eq!(spec.len(), 3);

        // Limit reaching past the end is clamped
        let spec = ResolvedPageSpec::resolve(&params(&[("limit", "30"), ("offset", "8")]), 10, DOCK_KEYS);
        assert_eq!((spec.begin, spec.end), (8, 10));

        // No usable limit returns everything from the offset
        let spec = ResolvedPageSpec::resolve(&params(&[("offset", "3")]), 200, DOCK_KEYS);
        assert_eq!((spec.begin, spec.end), (3, 200));
        let spec = ResolvedPageSpec::resolve(&params(&[("limit", "bogus")]), 200, DOCK_KEYS);
        assert_eq!((spec.begin, spec.end), (0, 200));
    }

    #[test]
    fn test_explicit_default_limit_means_no_limit() {
        let spec = ResolvedPageSpec::resolve(&params(&[("limit", "50")]), 60, DOCK_KEYS);
        assert_eq!((spec.begin, spec.end), (0, 60));

        let spec = ResolvedPageSpec::resolve(&params(&[("limit", "49")]), 60, DOCK_KEYS);
        assert_eq!((spec.begin, spec.end), (0, 49));
    }

    #[test]
    fn test_negative_offset_resolves_to_default() {
        let spec = ResolvedPageSpec::resolve(&params(&[("offset", "-1")]), 10, DOCK_KEYS);
        assert_eq!(spec.begin, DEFAULT_OFFSET);
        assert_eq!(spec.end, 10);
        assert_eq!(spec.sort_dir, SortDir::Desc);
        assert_eq!(spec.sort_key, DEFAULT_SORT_KEY);
    }

    #[test]
    fn test_parse_query_string() {
        let p = QueryParams::parse("?name=gold%20pool&limit=5&name=x&sortKey=NAME&empty");
        assert_eq!(p.first("name"), Some("gold pool"));
        assert_eq!(p.first("limit"), Some("5"));
        assert_eq!(p.first("empty"), Some(""));
        let mut filters: Vec<&str> = p.filter_keys().collect();
        filters.sort();
        assert_eq!(filters, vec!["empty", "name"]);
        assert!(p.has_filters());
        assert!(!params(&[("limit", "1")]).has_filters());
    }
}
