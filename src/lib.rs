//! Browser-style URL model for hash-routed applications.
//!
//! This crate parses a URL string into structured components (origin parts,
//! a query mapping, and a fragment that carries its own pathname/query/
//! fragment sub-grammar), lets the parts be mutated individually, and
//! re-serializes them into a valid URL string. It targets client-side
//! routing schemes that encode sub-route state inside the URL fragment.
//!
//! # Features
//!
//! - **Bracketed query codec**: `key=v`, `key[]=v` array keys, and
//!   `key[field]=v` nested-object keys, decoded into an insertion-ordered
//!   [`Query`] mapping and encoded back
//! - **Fragment mini-grammar**: `#<pathname>?<query>#<fragment>` parsing and
//!   formatting with pathname normalization
//! - **Stateful model**: structured fields stay directly mutable; the
//!   canonical string is recomputed on demand
//! - **Forgiving by design**: malformed tokens and extra segments are
//!   dropped or truncated, never an error
//! - **Explicit base**: relative input resolves against a caller-supplied
//!   base URL instead of an ambient global, so the core needs no browser
//!   environment
//!
//! # Quick Start
//!
//! ```
//! use url::Url;
//! use url_model::UrlModel;
//!
//! let base = Url::parse("https://app.example.com/account/")?;
//! let mut model = UrlModel::parse("#/signin?tab=2", &base, true)?;
//!
//! assert_eq!(model.hash_pathname, "/signin");
//! assert_eq!(model.hash_query.get("tab").and_then(|v| v.as_str()), Some("2"));
//!
//! model.hash_pathname = "dashboard".to_string();
//! assert_eq!(
//!     model.to_url_string(),
//!     "https://app.example.com/account/#/dashboard?tab=2"
//! );
//! # Ok::<(), url_model::UrlModelError>(())
//! ```
//!
//! # Wire formats
//!
//! Query strings are `key=value` pairs joined by `&`; array keys accumulate
//! as `key[]=v1&key[]=v2`; nested-object keys as `key[field]=v`. Keys and
//! values are percent-encoded with the standard URI-component rules when
//! encoding is enabled.
//!
//! Fragments follow `#<pathname>?<query>#<fragment>`, each segment optional.
//! A non-empty pathname always renders with a leading `/`; at most one
//! embedded `?` and one second `#` are parsed, the rest is truncated.
//!
//! # Error Handling
//!
//! Malformed query tokens, bracket keys, and hash segments degrade
//! gracefully during parsing. The only hard failure is the underlying `url`
//! crate rejecting an absolute URL; that error surfaces as
//! [`UrlModelError::Parse`].

// Re-export the query codec
pub use query::{deserialize, format_query, serialize};

// Re-export the fragment grammar
pub use hash::{format_hash, parse_raw_hash};

// Re-export the model and helpers
pub use helpers::{get_complete_url_with_path, validate_url};
pub use model::UrlModel;

// Re-export public types
pub use error::UrlModelError;
pub use types::{ParsedHash, Query, QueryValue};

// Module declarations
pub mod error;
pub mod hash;
pub mod helpers;
pub mod model;
pub mod query;
pub mod types;
