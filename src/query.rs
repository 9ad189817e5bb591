//! Bidirectional query-string codec.
//!
//! Converts the flat bracketed wire format (`a=1&tags[]=x&filter[kind]=doc`)
//! into a structured [`Query`] mapping and back. Malformed tokens never fail
//! the parse; they are silently dropped.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::types::{Query, QueryValue};

/// The set escaped by JS `encodeURIComponent`: everything except
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Nested-object key form: at least one word character, then `[field]` at the end.
static OBJECT_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+\[\w+\]$").unwrap());
static INNER_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\w+\]$").unwrap());

/// Percent-encode a single key or value.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Percent-decode a single key or value.
///
/// Malformed escape sequences and invalid UTF-8 decode lossily instead of
/// failing the surrounding parse.
pub fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Parse a query string into a structured [`Query`] mapping.
///
/// A single leading `?` is removed by plain text replacement of the first
/// occurrence. Tokens are split on `&`; a token contributes only when it
/// splits into exactly two parts on `=`. Keys and values are percent-decoded.
/// When `omit_empty` is set, pairs whose decoded value is the empty string
/// are dropped entirely.
///
/// Key forms, checked in precedence order: a trailing literal `[]`
/// accumulates into a list, `key[field]` merges into a nested map, anything
/// else is a scalar where the last occurrence wins.
///
/// # Examples
///
/// ```
/// use url_model::{serialize, QueryValue};
///
/// let query = serialize("?a=1&tags[]=x&tags[]=y&filter[kind]=doc", true);
/// assert_eq!(query.get("a").and_then(QueryValue::as_str), Some("1"));
/// assert_eq!(
///     query.get("tags").and_then(QueryValue::as_list),
///     Some(&["x".to_string(), "y".to_string()][..])
/// );
/// assert_eq!(
///     query.get("filter").and_then(QueryValue::as_map).and_then(|m| m.get("kind")).map(String::as_str),
///     Some("doc")
/// );
/// ```
pub fn serialize(source: &str, omit_empty: bool) -> Query {
    let mut target = Query::new();

    if source.is_empty() {
        return target;
    }

    let source = source.replacen('?', "", 1);

    for token in source.split('&') {
        let pair: Vec<&str> = token.split('=').collect();

        if pair.len() != 2 {
            continue;
        }

        let key = decode_component(pair[0]);
        let value = decode_component(pair[1]);

        if value.is_empty() && omit_empty {
            continue;
        }

        if key.ends_with("[]") {
            let key = key.replacen("[]", "", 1);
            let slot = target
                .entry(key)
                .or_insert_with(|| QueryValue::List(Vec::new()));
            if let QueryValue::List(items) = slot {
                items.push(value);
            } else {
                // A scalar or map already sat at this key; the list starts fresh.
                *slot = QueryValue::List(vec![value]);
            }
        } else if let Some((outer, field)) = split_object_key(&key) {
            let slot = target
                .entry(outer)
                .or_insert_with(|| QueryValue::Map(IndexMap::new()));
            if let QueryValue::Map(fields) = slot {
                fields.insert(field, value);
            } else {
                let mut fields = IndexMap::new();
                fields.insert(field, value);
                *slot = QueryValue::Map(fields);
            }
        } else {
            target.insert(key, QueryValue::Scalar(value));
        }
    }

    target
}

/// Render a structured [`Query`] back into a flat query string.
///
/// Pairs are emitted in insertion order and joined with `&`; an empty mapping
/// yields the empty string, never a bare `?` or `&`. When `encode` is set,
/// keys, inner keys, and values are percent-encoded; the structural brackets
/// of `key[]` and `key[field]` pairs stay raw either way.
///
/// # Examples
///
/// ```
/// use url_model::{deserialize, Query, QueryValue};
///
/// let mut query = Query::new();
/// query.insert("page".to_string(), QueryValue::from("2"));
/// query.insert(
///     "tags".to_string(),
///     QueryValue::List(vec!["a".to_string(), "b".to_string()]),
/// );
/// assert_eq!(deserialize(&query, true), "page=2&tags[]=a&tags[]=b");
/// ```
pub fn deserialize(query: &Query, encode: bool) -> String {
    let mut params: Vec<String> = Vec::new();

    for (key, value) in query {
        match value {
            QueryValue::Scalar(item) => {
                if encode {
                    params.push(format!("{}={}", encode_component(key), encode_component(item)));
                } else {
                    params.push(format!("{key}={item}"));
                }
            }
            QueryValue::List(items) => {
                for item in items {
                    if encode {
                        params.push(format!(
                            "{}[]={}",
                            encode_component(key),
                            encode_component(item)
                        ));
                    } else {
                        params.push(format!("{key}[]={item}"));
                    }
                }
            }
            QueryValue::Map(fields) => {
                for (field, item) in fields {
                    if encode {
                        params.push(format!(
                            "{}[{}]={}",
                            encode_component(key),
                            encode_component(field),
                            encode_component(item)
                        ));
                    } else {
                        params.push(format!("{key}[{field}]={item}"));
                    }
                }
            }
        }
    }

    params.join("&")
}

/// Render a [`Query`] with an optional `?` prefix.
///
/// The prefix is only emitted when at least one pair is.
pub fn format_query(query: &Query, with_question_mark: bool, encode: bool) -> String {
    let search = deserialize(query, encode);

    if search.is_empty() {
        String::new()
    } else if with_question_mark {
        format!("?{search}")
    } else {
        search
    }
}

/// Split a `key[field]` form into outer key and inner field name.
///
/// Returns `None` unless the key ends in `[field]` preceded by at least one
/// word character. The outer key is everything before the final brackets, so
/// `a.b[c]` splits into `a.b` / `c`.
fn split_object_key(key: &str) -> Option<(String, String)> {
    if !OBJECT_KEY.is_match(key) {
        return None;
    }

    let brackets = INNER_KEY.find(key)?;
    let outer = key[..brackets.start()].to_string();
    let field = key[brackets.start() + 1..brackets.end() - 1].to_string();

    Some((outer, field))
}
