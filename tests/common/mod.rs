//! Common test utilities: a Semantic MediaWiki served by wiremock

use smwgeo::config::FetcherConfig;
use smwgeo::geocoder::SemanticWikiResolver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Article page advertising its RDF export
pub fn article_html(rdf_href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Article</title>
<link rel="alternate" type="application/rdf+xml" title="RDF" href="{rdf_href}"/>
</head>
<body><p>Article text</p></body>
</html>"#
    )
}

/// Article page without any RDF alternate link
#[allow(dead_code)]
pub fn plain_html() -> String {
    String::from("<html><head><title>Plain</title></head><body></body></html>")
}

/// One `smw:Thing` element
pub fn thing(about: &str, article: &str, label: Option<&str>, body: &str) -> String {
    let label = label
        .map(|l| format!("\n\t\t<rdfs:label>{l}</rdfs:label>"))
        .unwrap_or_default();
    format!(
        r#"	<smw:Thing rdf:about="{about}">{label}
		<smw:hasArticle rdf:resource="{article}"/>
		{body}
	</smw:Thing>
"#
    )
}

/// Full RDF/XML export wrapping the given Things
pub fn rdf_document(things: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF
	xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
	xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
	xmlns:smw="http://smw.ontoware.org/2005/smw#"
	xmlns:attribute="http://wiki.test/attribute#"
	xmlns:relation="http://wiki.test/relation#">
{}</rdf:RDF>
"#,
        things.concat()
    )
}

/// Coordinates attribute element
#[allow(dead_code)]
pub fn coordinates(value: &str) -> String {
    format!("<attribute:Coordinates>{value}</attribute:Coordinates>")
}

/// Relation element pointing at an entity URI
#[allow(dead_code)]
pub fn relation(name: &str, target: &str) -> String {
    format!(r#"<relation:{name} rdf:resource="{target}"/>"#)
}

/// Entity URI used for an article in the mock wiki
pub fn entity(name: &str) -> String {
    format!("urn:wiki:{name}")
}

/// Article URL on the mock server
pub fn article_url(server: &MockServer, name: &str) -> String {
    format!("{}/wiki/{name}", server.uri())
}

/// Mount `/wiki/{name}` and its RDF export `/rdf/{name}`
///
/// `related` lists the articles this one links to by relation; each gets a
/// stub Thing so relation targets map to their article URLs.
#[allow(dead_code)]
pub async fn mount_article(
    server: &MockServer,
    name: &str,
    label: Option<&str>,
    body: &str,
    related: &[&str],
) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(&format!("/rdf/{name}"))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/rdf/{name}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rdf+xml; charset=utf-8")
                .set_body_string(export(server, name, label, body, related)),
        )
        .mount(server)
        .await;
}

/// RDF export for an article with stubs for its related articles
pub fn export(
    server: &MockServer,
    name: &str,
    label: Option<&str>,
    body: &str,
    related: &[&str],
) -> String {
    let mut things = vec![thing(&entity(name), &article_url(server, name), label, body)];
    for target in related {
        things.push(thing(&entity(target), &article_url(server, target), None, ""));
    }
    rdf_document(&things)
}

/// Resolver against the mock wiki with rate limiting disabled
pub fn test_resolver(server: &MockServer) -> SemanticWikiResolver {
    SemanticWikiResolver::builder(format!("{}/wiki/%s", server.uri()))
        .attributes(["Coordinates"])
        .relations(["Located in"])
        .fetcher_config(FetcherConfig {
            rate_limit: 0,
            ..FetcherConfig::default()
        })
        .build()
        .expect("valid resolver")
}
