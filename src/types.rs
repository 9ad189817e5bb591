//! Core data structures for the query and hash grammars.

use indexmap::IndexMap;

/// Structured representation of a query string.
///
/// Keys keep the order in which they were first seen during parsing;
/// re-assigning an existing key keeps its original position. The mapping is
/// deliberately untyped: callers that need a typed view should project it at
/// the boundary rather than trusting a structural cast.
pub type Query = IndexMap<String, QueryValue>;

/// A single query value in the bracketed wire grammar.
///
/// The three variants correspond to the three key-naming conventions of the
/// wire format: `key=v`, `key[]=v` and `key[field]=v`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Plain `key=value` pair. Later occurrences of the key overwrite
    /// earlier ones.
    Scalar(String),
    /// Values accumulated from repeated `key[]=v` pairs, in wire order.
    List(Vec<String>),
    /// Fields accumulated from `key[field]=v` pairs, in wire order. A
    /// repeated field overwrites only that field.
    Map(IndexMap<String, String>),
}

impl QueryValue {
    /// Borrow the scalar value, if this is a [`QueryValue::Scalar`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the accumulated items, if this is a [`QueryValue::List`].
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            QueryValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the nested fields, if this is a [`QueryValue::Map`].
    pub fn as_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            QueryValue::Map(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

/// Structured form of a raw URL fragment.
///
/// The fragment carries its own mini grammar for client-side sub-routing:
/// `#<pathname>?<query>#<fragment>`, each segment optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedHash {
    /// Sub-route pathname inside the fragment.
    pub pathname: String,
    /// Structured sub-query.
    pub query: Query,
    /// Raw sub-query as last parsed, `?`-prefixed when non-empty. This is a
    /// snapshot, not a live projection of `query`.
    pub query_string: String,
    /// Text after the second `#`, without the marker.
    pub hash: String,
}

impl ParsedHash {
    /// Check if a sub-query was parsed out of the fragment.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Check if a secondary fragment was parsed out of the fragment.
    pub fn has_fragment(&self) -> bool {
        !self.hash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_accessors() {
        let scalar = QueryValue::from("1");
        assert_eq!(scalar.as_str(), Some("1"));
        assert_eq!(scalar.as_list(), None);
        assert_eq!(scalar.as_map(), None);

        let list = QueryValue::List(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(list.as_str(), None);
        assert_eq!(list.as_list(), Some(&["x".to_string(), "y".to_string()][..]));

        let mut fields = IndexMap::new();
        fields.insert("kind".to_string(), "doc".to_string());
        let map = QueryValue::Map(fields);
        assert_eq!(map.as_map().and_then(|m| m.get("kind")).map(String::as_str), Some("doc"));
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let mut query = Query::new();
        query.insert("b".to_string(), QueryValue::from("2"));
        query.insert("a".to_string(), QueryValue::from("1"));
        query.insert("b".to_string(), QueryValue::from("3"));

        let keys: Vec<&str> = query.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(query.get("b").and_then(QueryValue::as_str), Some("3"));
    }

    #[test]
    fn test_parsed_hash_defaults() {
        let parsed = ParsedHash::default();
        assert_eq!(parsed.pathname, "");
        assert_eq!(parsed.query_string, "");
        assert!(!parsed.has_query());
        assert!(!parsed.has_fragment());
    }
}
