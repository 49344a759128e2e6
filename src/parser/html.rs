//! RDF export discovery in wiki article pages
//!
//! Semantic MediaWiki advertises the RDF export of an article with a
//! `<link rel="alternate" type="application/rdf+xml">` element in the
//! page head.

use scraper::{Html, Selector};

use crate::utils::error::ParseError;

/// MIME type of the Semantic MediaWiki RDF export
pub const RDF_MIME_TYPE: &str = "application/rdf+xml";

/// Build the head-link selector for a MIME type
fn alternate_link_selector(mime_type: &str) -> Result<Selector, ParseError> {
    let escaped = mime_type.replace('\\', "\\\\").replace('"', "\\\"");
    let css = format!(r#"head link[rel~="alternate"][type="{escaped}"]"#);
    Selector::parse(&css).map_err(|e| ParseError::InvalidSelector(format!("{css}: {e:?}")))
}

/// Find the `href` of the first alternate link of `mime_type` in the head
///
/// Returns `Ok(None)` when the page advertises no such link, which is a
/// normal outcome for pages without a semantic export.
///
/// # Errors
///
/// Returns `ParseError::InvalidSelector` if `mime_type` cannot be used in
/// a selector.
pub fn parse_rdf_link(document: &Html, mime_type: &str) -> Result<Option<String>, ParseError> {
    let selector = alternate_link_selector(mime_type)?;

    let href = document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(str::to_string);

    Ok(href)
}

/// Parse page HTML and find its RDF export link
///
/// # Errors
///
/// See [`parse_rdf_link`].
pub fn find_rdf_link(html: &str, mime_type: &str) -> Result<Option<String>, ParseError> {
    let document = Html::parse_document(html);
    parse_rdf_link(&document, mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Berlin - Example Wiki</title>
<link rel="alternate" type="application/atom+xml" href="/feed.atom"/>
<link rel="alternate" type="application/rdf+xml" title="Berlin" href="/index.php?title=Special:ExportRDF/Berlin&amp;xmlmime=rdf"/>
</head>
<body><link rel="alternate" type="text/turtle" href="/body-link.ttl"/></body>
</html>"#;

    #[test]
    fn test_finds_rdf_link() {
        let link = find_rdf_link(PAGE, RDF_MIME_TYPE).unwrap();
        assert_eq!(
            link.as_deref(),
            Some("/index.php?title=Special:ExportRDF/Berlin&xmlmime=rdf")
        );
    }

    #[test]
    fn test_other_mime_type() {
        let link = find_rdf_link(PAGE, "application/atom+xml").unwrap();
        assert_eq!(link.as_deref(), Some("/feed.atom"));
    }

    #[test]
    fn test_link_outside_head_is_ignored() {
        let link = find_rdf_link(PAGE, "text/turtle").unwrap();
        assert_eq!(link, None);
    }

    #[test]
    fn test_missing_link() {
        let html = "<html><head><title>Plain</title></head><body></body></html>";
        assert_eq!(find_rdf_link(html, RDF_MIME_TYPE).unwrap(), None);
    }

    #[test]
    fn test_rel_with_multiple_tokens() {
        let html = r#"<html><head><link rel="meta alternate" type="application/rdf+xml" href="/rdf"></head></html>"#;
        assert_eq!(
            find_rdf_link(html, RDF_MIME_TYPE).unwrap().as_deref(),
            Some("/rdf")
        );
    }
}
