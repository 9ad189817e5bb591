//! Convenience wrappers over [`UrlModel`] for same-origin checks and
//! origin-relative URL building.

use url::Url;

use crate::error::UrlModelError;
use crate::model::UrlModel;

/// Check that a model stays on the current origin.
///
/// True iff protocol, hostname, and port all equal the corresponding fields
/// of `current` (the ambient location, injected by the caller). Typically
/// used to confirm a redirect target before navigating to it.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use url_model::{validate_url, UrlModel};
///
/// let current = Url::parse("https://app.example.com/deep/page").unwrap();
///
/// let same = UrlModel::parse("/next", &current, true).unwrap();
/// assert!(validate_url(&same, &current));
///
/// let other = UrlModel::parse("https://evil.example.org/next", &current, true).unwrap();
/// assert!(!validate_url(&other, &current));
/// ```
pub fn validate_url(model: &UrlModel, current: &Url) -> bool {
    current.scheme() == model.protocol()
        && current.host_str().unwrap_or("") == model.hostname()
        && current.port() == model.port()
}

/// Build an absolute URL from the current origin and a path, rendered
/// through a fresh [`UrlModel`].
///
/// # Examples
///
/// ```
/// use url::Url;
/// use url_model::get_complete_url_with_path;
///
/// let current = Url::parse("https://app.example.com/deep/page?x=1").unwrap();
/// let url = get_complete_url_with_path(&current, "/login").unwrap();
/// assert_eq!(url, "https://app.example.com/login");
/// ```
pub fn get_complete_url_with_path(current: &Url, path: &str) -> Result<String, UrlModelError> {
    let origin = current.origin().ascii_serialization();
    let model = UrlModel::parse(&format!("{origin}{path}"), current, true)?;

    Ok(model.to_url_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_matches_origin_parts() {
        let current = Url::parse("https://app.example.com:8443/page").unwrap();

        let same = UrlModel::parse("#/route", &current, true).unwrap();
        assert!(validate_url(&same, &current));

        let wrong_port =
            UrlModel::parse("https://app.example.com:9000/", &current, true).unwrap();
        assert!(!validate_url(&wrong_port, &current));

        let wrong_scheme =
            UrlModel::parse("http://app.example.com:8443/", &current, true).unwrap();
        assert!(!validate_url(&wrong_scheme, &current));

        let wrong_host = UrlModel::parse("https://cdn.example.com:8443/", &current, true).unwrap();
        assert!(!validate_url(&wrong_host, &current));
    }

    #[test]
    fn test_validate_url_treats_default_port_consistently() {
        let current = Url::parse("http://jimu.io/").unwrap();
        // An explicit default port serializes back to no port at all.
        let model = UrlModel::parse("http://jimu.io:80/next", &current, true).unwrap();

        assert!(validate_url(&model, &current));
    }

    #[test]
    fn test_get_complete_url_with_path() {
        let current = Url::parse("https://app.example.com/deep/page?x=1#frag").unwrap();

        assert_eq!(
            get_complete_url_with_path(&current, "/login").unwrap(),
            "https://app.example.com/login"
        );
        assert_eq!(
            get_complete_url_with_path(&current, "/fi/#/material").unwrap(),
            "https://app.example.com/fi/#/material"
        );
    }

    #[test]
    fn test_get_complete_url_with_path_keeps_explicit_port() {
        let current = Url::parse("http://localhost:3000/anywhere").unwrap();

        assert_eq!(
            get_complete_url_with_path(&current, "/api/v1").unwrap(),
            "http://localhost:3000/api/v1"
        );
    }
}
