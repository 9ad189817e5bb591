//! Stateful URL model for hash-routed applications.

use std::fmt;

use url::Url;

use crate::error::UrlModelError;
use crate::hash;
use crate::query;
use crate::types::Query;

/// A URL held as structured parts: origin components, a structured query,
/// and the fragment's own pathname/query/fragment sub-grammar.
///
/// The model owns a [`Url`] for everything origin-related and keeps the
/// query and hash fields as public, directly mutable state. Mutations become
/// visible in the canonical string only when [`to_url_string`](Self::to_url_string)
/// re-renders; the `query_string` and `hash_query_string` fields are raw
/// snapshots from the last [`set_href`](Self::set_href) /
/// [`set_hash`](Self::set_hash) call and are never recomputed from the
/// structured fields.
///
/// Relative input resolves against an explicit base URL supplied at
/// construction (the caller injects the ambient current location there).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use url_model::UrlModel;
///
/// let base = Url::parse("https://app.example.com/account/")?;
/// let mut model = UrlModel::parse("#/signin?tab=2", &base, true)?;
///
/// assert_eq!(model.hash_pathname, "/signin");
/// assert_eq!(model.hash_query.get("tab").and_then(|v| v.as_str()), Some("2"));
///
/// model.hash_pathname = "dashboard".to_string();
/// assert_eq!(model.to_hash(true), "#/dashboard?tab=2");
/// # Ok::<(), url_model::UrlModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UrlModel {
    url: Url,
    base: Url,
    omit_empty_query: bool,

    /// Structured query of the URL's search component.
    pub query: Query,
    /// Raw search string as last parsed, `?`-prefixed when non-empty.
    pub query_string: String,
    /// Sub-route pathname parsed out of the fragment.
    pub hash_pathname: String,
    /// Structured sub-query parsed out of the fragment.
    pub hash_query: Query,
    /// Raw sub-query as last parsed, `?`-prefixed when non-empty.
    pub hash_query_string: String,
    /// Secondary fragment (text after the second `#`), without the marker.
    pub hash_hash: String,
}

impl UrlModel {
    /// Parse `input` against `base` into a fully derived model.
    ///
    /// `base` plays the role of the ambient current location: fragment-only
    /// or otherwise relative input resolves against it, absolute input
    /// replaces it. `omit_empty_query` controls whether empty-valued query
    /// pairs are dropped during parsing and is fixed for the model's
    /// lifetime.
    ///
    /// The only failure mode is the underlying URL parser rejecting the
    /// resolved string.
    pub fn parse(input: &str, base: &Url, omit_empty_query: bool) -> Result<Self, UrlModelError> {
        let mut model = UrlModel {
            url: base.clone(),
            base: base.clone(),
            omit_empty_query,
            query: Query::new(),
            query_string: String::new(),
            hash_pathname: String::new(),
            hash_query: Query::new(),
            hash_query_string: String::new(),
            hash_hash: String::new(),
        };

        model.set_href(input)?;

        Ok(model)
    }

    /// Re-parse the whole model from a new URL string, resolved against the
    /// base supplied at construction. All derived fields are overwritten.
    pub fn set_href(&mut self, href: &str) -> Result<(), UrlModelError> {
        let parsed = self.base.join(href)?;

        self.query = query::serialize(parsed.query().unwrap_or(""), self.omit_empty_query);
        self.query_string = match parsed.query() {
            Some(search) if !search.is_empty() => format!("?{search}"),
            _ => String::new(),
        };

        let raw_hash = match parsed.fragment() {
            Some(fragment) => format!("#{fragment}"),
            None => String::new(),
        };
        let parsed_hash = hash::parse_raw_hash(&raw_hash, self.omit_empty_query);
        self.hash_pathname = parsed_hash.pathname;
        self.hash_query = parsed_hash.query;
        self.hash_query_string = parsed_hash.query_string;
        self.hash_hash = parsed_hash.hash;

        self.url = parsed;

        Ok(())
    }

    /// Canonical string form, equivalent to [`to_url_string`](Self::to_url_string).
    pub fn href(&self) -> String {
        self.to_url_string()
    }

    /// Re-parse only the hash-derived fields from a raw fragment string.
    /// Origin, pathname, and query are left untouched.
    pub fn set_hash(&mut self, raw_hash: &str) {
        let parsed = hash::parse_raw_hash(raw_hash, self.omit_empty_query);

        self.hash_pathname = parsed.pathname;
        self.hash_query = parsed.query;
        self.hash_query_string = parsed.query_string;
        self.hash_hash = parsed.hash;
    }

    /// Formatted hash portion with a leading mark, equivalent to
    /// [`to_hash(true)`](Self::to_hash).
    pub fn hash(&self) -> String {
        self.to_hash(true)
    }

    /// Render the full absolute URL from the current structured state.
    ///
    /// The rendered query comes from [`query`](Self::query) and the rendered
    /// fragment from the hash fields, both percent-encoded. This is the sole
    /// point where structured mutations reach the canonical string; the
    /// `*_string` snapshot fields stay as last parsed.
    pub fn to_url_string(&self) -> String {
        let mut url = self.url.clone();

        let search = query::format_query(&self.query, false, true);
        url.set_query(if search.is_empty() {
            None
        } else {
            Some(search.as_str())
        });

        // format_hash only marks a non-empty pathname, so a fragment like
        // "#section" arrives here already carrying its own mark; strip the
        // one leading mark either way before handing off to the URL object.
        let formatted = self.to_hash(true);
        let fragment = formatted.strip_prefix('#').unwrap_or(&formatted);
        url.set_fragment(if fragment.is_empty() {
            None
        } else {
            Some(fragment)
        });

        url.to_string()
    }

    /// Format only the hash portion from the current hash fields,
    /// independent of the rest of the URL.
    pub fn to_hash(&self, with_number_mark: bool) -> String {
        hash::format_hash(
            &self.hash_pathname,
            &self.hash_query,
            &self.hash_hash,
            with_number_mark,
            true,
        )
    }

    /// Check whether `key` is present in the query or the hash query.
    pub fn has_search_key(&self, key: &str) -> bool {
        if self.query.is_empty() && self.hash_query.is_empty() {
            return false;
        }

        self.query.contains_key(key) || self.hash_query.contains_key(key)
    }

    /// Check a list of keys against the union of query and hash query.
    ///
    /// With `match_all` unset an OR scan returns true on the first key found.
    /// With `match_all` set the scan returns false on the first key missing
    /// from both mappings, and a fully matched list still falls through to
    /// false; existing callers depend on that historical result, so it is
    /// preserved rather than corrected.
    pub fn has_search_keys(&self, keys: &[&str], match_all: bool) -> bool {
        if self.query.is_empty() && self.hash_query.is_empty() {
            return false;
        }

        for key in keys {
            let in_query = self.query.contains_key(*key);
            let in_hash_query = self.hash_query.contains_key(*key);

            if (in_query || in_hash_query) && !match_all {
                return true;
            }

            if match_all && !in_query && !in_hash_query {
                return false;
            }
        }

        false
    }

    /// Hostname with the explicit port, when one is set.
    pub fn host(&self) -> String {
        let hostname = self.url.host_str().unwrap_or("");

        match self.url.port() {
            Some(port) => format!("{hostname}:{port}"),
            None => hostname.to_string(),
        }
    }

    /// Set hostname and port together from a `name` or `name:port` string.
    pub fn set_host(&mut self, host: &str) -> Result<(), UrlModelError> {
        let (name, port) = match host.rsplit_once(':') {
            Some((name, tail)) => match tail.parse::<u16>() {
                Ok(port) => (name, Some(port)),
                Err(_) => (host, None),
            },
            None => (host, None),
        };

        self.url
            .set_host(Some(name))
            .map_err(|_| UrlModelError::InvalidHost(host.to_string()))?;

        if let Some(port) = port {
            self.url
                .set_port(Some(port))
                .map_err(|()| UrlModelError::InvalidPort(port.to_string()))?;
        }

        Ok(())
    }

    /// Hostname without the port.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// Set the hostname, leaving the port alone.
    pub fn set_hostname(&mut self, hostname: &str) -> Result<(), UrlModelError> {
        self.url
            .set_host(Some(hostname))
            .map_err(|_| UrlModelError::InvalidHost(hostname.to_string()))
    }

    /// ASCII serialization of the origin. Read-only.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Path of the URL itself (not the sub-route inside the fragment).
    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Set the URL's own path.
    pub fn set_pathname(&mut self, pathname: &str) {
        self.url.set_path(pathname);
    }

    /// Explicit port, `None` when the scheme's default applies.
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// Set or clear the explicit port.
    pub fn set_port(&mut self, port: Option<u16>) -> Result<(), UrlModelError> {
        self.url.set_port(port).map_err(|()| {
            UrlModelError::InvalidPort(port.map(|p| p.to_string()).unwrap_or_default())
        })
    }

    /// Scheme, without a trailing colon.
    pub fn protocol(&self) -> &str {
        self.url.scheme()
    }

    /// Set the scheme.
    pub fn set_protocol(&mut self, protocol: &str) -> Result<(), UrlModelError> {
        self.url
            .set_scheme(protocol)
            .map_err(|()| UrlModelError::InvalidScheme(protocol.to_string()))
    }
}

impl fmt::Display for UrlModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_url_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryValue;

    fn base() -> Url {
        Url::parse("http://jimu.io/").unwrap()
    }

    #[test]
    fn test_construction_parses_all_fields() {
        let model = UrlModel::parse(
            "http://jimu.io?a=1&b=q&c=#/abc/efg?d=3&e=w&f=#testhash",
            &base(),
            true,
        )
        .unwrap();

        assert_eq!(model.query_string, "?a=1&b=q&c=");
        assert_eq!(model.hash_pathname, "/abc/efg");
        assert_eq!(model.hash_query_string, "?d=3&e=w&f=");
        assert_eq!(model.hash_hash, "testhash");
    }

    #[test]
    fn test_snapshot_strings_stay_stale_until_reparse() {
        let mut model = UrlModel::parse("http://jimu.io?a=1", &base(), true).unwrap();
        assert_eq!(model.query_string, "?a=1");

        model.query.insert("b".to_string(), QueryValue::from("2"));

        assert_eq!(model.to_url_string(), "http://jimu.io/?a=1&b=2");
        // Rendering does not refresh the snapshot.
        assert_eq!(model.query_string, "?a=1");

        model.set_href("http://jimu.io?a=1&b=2").unwrap();
        assert_eq!(model.query_string, "?a=1&b=2");
    }

    #[test]
    fn test_set_hash_leaves_origin_and_query_alone() {
        let mut model = UrlModel::parse("http://jimu.io/app?a=1#/old", &base(), true).unwrap();

        model.set_hash("#/next?tab=2#sec");

        assert_eq!(model.hash_pathname, "/next");
        assert_eq!(model.hash_hash, "sec");
        assert_eq!(model.query_string, "?a=1");
        assert_eq!(model.pathname(), "/app");
        assert_eq!(model.to_url_string(), "http://jimu.io/app?a=1#/next?tab=2#sec");
    }

    #[test]
    fn test_delegated_accessors_mutate_underlying_url() {
        let mut model = UrlModel::parse("http://jimu.io/app", &base(), true).unwrap();

        model.set_protocol("https").unwrap();
        model.set_hostname("other.io").unwrap();
        model.set_port(Some(8443)).unwrap();
        model.set_pathname("/deep/page");

        assert_eq!(model.protocol(), "https");
        assert_eq!(model.hostname(), "other.io");
        assert_eq!(model.host(), "other.io:8443");
        assert_eq!(model.port(), Some(8443));
        assert_eq!(model.origin(), "https://other.io:8443");
        assert_eq!(model.to_url_string(), "https://other.io:8443/deep/page");
    }

    #[test]
    fn test_set_host_with_port() {
        let mut model = UrlModel::parse("http://jimu.io/", &base(), true).unwrap();

        model.set_host("other.io:3000").unwrap();
        assert_eq!(model.host(), "other.io:3000");

        model.set_host("third.io").unwrap();
        assert_eq!(model.hostname(), "third.io");
        assert_eq!(model.port(), Some(3000));
    }

    #[test]
    fn test_set_protocol_rejects_incompatible_scheme() {
        let mut model = UrlModel::parse("http://jimu.io/", &base(), true).unwrap();

        let err = model.set_protocol("mailto").unwrap_err();
        assert_eq!(err, UrlModelError::InvalidScheme("mailto".to_string()));
    }

    #[test]
    fn test_invalid_absolute_url_propagates_parse_error() {
        let result = UrlModel::parse("http://", &base(), true);
        assert!(matches!(result, Err(UrlModelError::Parse(_))));
    }

    #[test]
    fn test_display_matches_to_url_string() {
        let model = UrlModel::parse("http://jimu.io/app#/x", &base(), true).unwrap();
        assert_eq!(model.to_string(), model.to_url_string());
    }
}
