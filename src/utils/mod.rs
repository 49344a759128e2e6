//! Common utilities and helper functions
//!
//! Name normalization, page URL templating and relative link resolution
//! shared by the resolver and the parsers.

pub mod error;

use url::Url;

use crate::utils::error::{ConfigError, ParseError};

/// Placeholder replaced by the transformed query in a page URL template
pub const URL_PLACEHOLDER: &str = "%s";

/// Normalize a page, attribute or relation name the way MediaWiki does
///
/// Spaces become underscores, the first character is uppercased and the
/// remaining characters are lowercased.
///
/// # Examples
///
/// ```
/// use smwgeo::utils::transform_string;
///
/// assert_eq!(transform_string("located in"), "Located_in");
/// assert_eq!(transform_string("Located_in"), "Located_in");
/// ```
pub fn transform_string(name: &str) -> String {
    let underscored = name.replace(' ', "_");
    let mut chars = underscored.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Check that a page URL template carries exactly one placeholder
pub fn validate_format_url(template: &str) -> Result<(), ConfigError> {
    let found = template.matches(URL_PLACEHOLDER).count();
    if found != 1 {
        return Err(ConfigError::InvalidFormatUrl {
            template: template.to_string(),
            found,
        });
    }
    Ok(())
}

/// Substitute the placeholder of a validated template
pub fn fill_format_url(template: &str, value: &str) -> String {
    template.replacen(URL_PLACEHOLDER, value, 1)
}

/// Resolve a possibly relative link against the page it was found on
pub fn resolve_link(base: &str, href: &str) -> Result<String, ParseError> {
    if let Ok(absolute) = Url::parse(href) {
        return Ok(absolute.to_string());
    }

    let base = Url::parse(base).map_err(|e| ParseError::InvalidUrl(format!("{base}: {e}")))?;
    base.join(href)
        .map(|u| u.to_string())
        .map_err(|e| ParseError::InvalidUrl(format!("{href}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_string() {
        assert_eq!(transform_string("foo bar"), "Foo_bar");
        assert_eq!(transform_string("NEW YORK city"), "New_york_city");
        assert_eq!(transform_string(""), "");
    }

    #[test]
    fn test_transform_string_idempotent() {
        let once = transform_string("located in");
        assert_eq!(transform_string(&once), once);
    }

    #[test]
    fn test_transform_string_unicode() {
        assert_eq!(transform_string("élan vital"), "Élan_vital");
    }

    #[test]
    fn test_validate_format_url() {
        assert!(validate_format_url("http://wiki.example.org/wiki/%s").is_ok());
        assert!(validate_format_url("http://wiki.example.org/wiki/").is_err());
        assert!(validate_format_url("http://wiki.example.org/%s/%s").is_err());
    }

    #[test]
    fn test_fill_format_url() {
        assert_eq!(
            fill_format_url("http://wiki.example.org/wiki/%s", "Berlin"),
            "http://wiki.example.org/wiki/Berlin"
        );
    }

    #[test]
    fn test_resolve_link() {
        let base = "http://wiki.example.org/wiki/Berlin";
        assert_eq!(
            resolve_link(base, "/index.php?title=Special:ExportRDF/Berlin").unwrap(),
            "http://wiki.example.org/index.php?title=Special:ExportRDF/Berlin"
        );
        assert_eq!(
            resolve_link(base, "https://other.example.org/rdf").unwrap(),
            "https://other.example.org/rdf"
        );
        assert!(resolve_link("not a url", "relative").is_err());
    }
}
