//! Fragment mini-grammar for hash-based sub-routing.
//!
//! A raw fragment of the form `#<pathname>?<query>#<fragment>` is split into
//! a sub-pathname, an embedded query (decoded through the query codec), and a
//! secondary fragment. Each segment is optional; anything beyond one embedded
//! `?` or one second `#` is truncated silently.

use crate::query::{deserialize, serialize};
use crate::types::{ParsedHash, Query};

/// Parse a raw fragment, including any leading `#`, into a [`ParsedHash`].
///
/// The first `#` is removed by plain text replacement. The remainder splits
/// on `#`: the secondary fragment is recognized only when that split yields
/// exactly two pieces. The first piece splits on `?` the same way; its second
/// piece, when present, is the raw sub-query (kept `?`-prefixed when
/// non-empty) and is decoded with [`serialize`].
///
/// # Examples
///
/// ```
/// use url_model::parse_raw_hash;
///
/// let parsed = parse_raw_hash("#/abc/efg?d=3#section", true);
/// assert_eq!(parsed.pathname, "/abc/efg");
/// assert_eq!(parsed.query_string, "?d=3");
/// assert_eq!(parsed.hash, "section");
/// ```
pub fn parse_raw_hash(raw_hash: &str, omit_empty_query: bool) -> ParsedHash {
    let hash_string = raw_hash.replacen('#', "", 1);
    let pieces: Vec<&str> = hash_string.split('#').collect();

    let mut parsed = ParsedHash::default();

    if pieces.len() == 2 {
        parsed.hash = pieces[1].to_string();
    }

    let path_with_query = pieces[0];
    let query_pieces: Vec<&str> = path_with_query.split('?').collect();

    if query_pieces.len() == 2 {
        if !query_pieces[1].is_empty() {
            parsed.query_string = format!("?{}", query_pieces[1]);
        }
        parsed.query = serialize(query_pieces[1], omit_empty_query);
    }

    parsed.pathname = query_pieces[0].to_string();

    parsed
}

/// Render hash fields back into a raw fragment string.
///
/// The secondary fragment is `#`-prefixed once, idempotently. A non-empty
/// pathname gets a `#` prefix only when `with_number_mark` is requested and
/// one is not already present, then a single leading `/`; a stale `#/` or `#`
/// marker left inside the pathname from a prior parse is stripped. An empty
/// pathname emits no path segment, so the result then starts directly with
/// `?` or `#`.
///
/// Any value produced by [`parse_raw_hash`] re-parses to an equivalent
/// [`ParsedHash`] after formatting.
///
/// # Examples
///
/// ```
/// use url_model::{format_hash, Query};
///
/// let hash = format_hash("signin", &Query::new(), "", true, true);
/// assert_eq!(hash, "#/signin");
/// ```
pub fn format_hash(
    pathname: &str,
    query: &Query,
    hash: &str,
    with_number_mark: bool,
    encode: bool,
) -> String {
    let search = deserialize(query, encode);

    let mut fragment = String::new();

    if !hash.is_empty() {
        if !hash.starts_with('#') {
            fragment.push('#');
        }
        fragment.push_str(hash);
    }

    let mut formatted = String::new();

    if !pathname.is_empty() {
        if with_number_mark && !pathname.starts_with('#') {
            formatted.push('#');
        }

        if !pathname.starts_with('/') {
            formatted.push('/');
        }

        formatted.push_str(&pathname.replacen("#/", "", 1).replacen('#', "", 1));
    }

    if !search.is_empty() {
        formatted.push('?');
        formatted.push_str(&search);
    }

    formatted.push_str(&fragment);

    formatted
}
