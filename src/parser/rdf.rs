//! Semantic MediaWiki RDF/XML export parsing
//!
//! The export describes one `smw:Thing` per wiki page. Each Thing names
//! itself with `rdf:about`, may point at its wiki article with
//! `smw:hasArticle`, and carries `attribute:<Name>` values and
//! `relation:<Name>` links to other resources.
//!
//! Qualified names are matched verbatim, the way the export writes them.
//! Entities declared in the document type (`&wiki;` and friends) are
//! expanded while reading, along with the predefined XML entities.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::utils::error::ParseError;

pub const THING_TAG: &str = "smw:Thing";
pub const HAS_ARTICLE_TAG: &str = "smw:hasArticle";
pub const LABEL_TAG: &str = "rdfs:label";
pub const ABOUT_ATTR: &str = "rdf:about";
pub const RESOURCE_ATTR: &str = "rdf:resource";
pub const ATTRIBUTE_PREFIX: &str = "attribute:";
pub const RELATION_PREFIX: &str = "relation:";

/// A parsed XML element with its direct text content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Qualified tag name, e.g. `attribute:Coordinates`
    pub name: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Concatenated direct text and CDATA content
    pub text: String,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            ..Default::default()
        }
    }

    /// Look up an attribute by qualified name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All descendant elements in document order (pre-order)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Descendant elements with the given qualified name
    pub fn descendants_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> + 'a {
        let name = name.to_string();
        self.descendants().filter(move |el| el.name == name)
    }
}

/// Pre-order iterator over the descendants of an [`Element`]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// One `smw:Thing` node of the export
#[derive(Debug, Clone, PartialEq)]
pub struct Thing {
    /// Resource identifier from `rdf:about`
    pub about: String,

    /// Canonical wiki article URL from the first `smw:hasArticle`
    pub article: Option<String>,

    element: Element,
}

impl Thing {
    fn from_element(element: Element) -> Option<Self> {
        let about = element.attr(ABOUT_ATTR)?.to_string();
        let article = element
            .descendants_named(HAS_ARTICLE_TAG)
            .find_map(|el| el.attr(RESOURCE_ATTR))
            .map(str::to_string);

        Some(Self {
            about,
            article,
            element,
        })
    }

    /// The underlying XML element
    pub fn element(&self) -> &Element {
        &self.element
    }
}

/// The Things of one RDF document plus their resource→article mapping
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    articles: HashMap<String, String>,
    things: Vec<Thing>,
}

impl EntityGraph {
    /// Things in document order
    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Article URL known for a resource identifier
    pub fn article_for(&self, resource: &str) -> Option<&str> {
        self.articles.get(resource).map(String::as_str)
    }

    /// URL to fetch for a relation target: its article, or the raw identifier
    pub fn canonical_url<'a>(&'a self, resource: &'a str) -> &'a str {
        self.article_for(resource).unwrap_or(resource)
    }

    /// The Thing the fetched page is about
    ///
    /// Prefers the Thing whose article or identifier equals `page_url`;
    /// otherwise the first Thing in document order, which is the export's
    /// primary subject.
    pub fn current_thing(&self, page_url: &str) -> Option<&Thing> {
        self.things
            .iter()
            .find(|thing| thing.article.as_deref() == Some(page_url) || thing.about == page_url)
            .or_else(|| self.things.first())
    }
}

/// Parse an RDF/XML export into an [`EntityGraph`]
///
/// Things without `rdf:about` are skipped; Things without
/// `smw:hasArticle` contribute no mapping entry.
///
/// # Errors
///
/// Returns `ParseError::Xml` on malformed XML and
/// `ParseError::UnexpectedEof` when elements are left open.
pub fn parse_rdf(data: &str) -> Result<EntityGraph, ParseError> {
    let root = parse_tree(data)?;

    let mut graph = EntityGraph::default();
    for element in root.descendants_named(THING_TAG) {
        let Some(thing) = Thing::from_element(element.clone()) else {
            tracing::debug!("Skipping smw:Thing without rdf:about");
            continue;
        };
        if let Some(article) = &thing.article {
            graph.articles.insert(thing.about.clone(), article.clone());
        }
        graph.things.push(thing);
    }

    tracing::debug!(
        things = graph.things.len(),
        articles = graph.articles.len(),
        "Parsed RDF document"
    );

    Ok(graph)
}

/// `attribute:<Name>` values of a Thing as `(name, trimmed text)` pairs
///
/// Names are normalized with `transform` before matching. Values come in
/// configured name order, then document order within each name.
pub fn attributes<'a>(
    thing: &'a Thing,
    names: &'a [String],
    transform: &'a (dyn Fn(&str) -> String + Send + Sync),
) -> impl Iterator<Item = (String, String)> + 'a {
    names.iter().flat_map(move |name| {
        let name = transform(name);
        let tag = format!("{ATTRIBUTE_PREFIX}{name}");
        thing
            .element
            .descendants_named(&tag)
            .map(move |el| (name.clone(), el.text.trim().to_string()))
    })
}

/// `relation:<Name>` targets of a Thing as `(name, resource)` pairs
///
/// Relation elements without `rdf:resource` are skipped.
pub fn relations<'a>(
    thing: &'a Thing,
    names: &'a [String],
    transform: &'a (dyn Fn(&str) -> String + Send + Sync),
) -> impl Iterator<Item = (String, String)> + 'a {
    names.iter().flat_map(move |name| {
        let name = transform(name);
        let tag = format!("{RELATION_PREFIX}{name}");
        thing.element.descendants_named(&tag).filter_map(move |el| {
            el.attr(RESOURCE_ATTR)
                .map(|resource| (name.clone(), resource.to_string()))
        })
    })
}

/// Text of the first `rdfs:label` of a Thing, `None` when absent or blank
pub fn thing_label(thing: &Thing) -> Option<String> {
    let label = thing.element.descendants_named(LABEL_TAG).next()?;
    let text = label.text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn entity_declarations(doctype: &str) -> HashMap<String, String> {
    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

    let re = ENTITY_RE.get_or_init(|| {
        Regex::new(r#"<!ENTITY\s+([A-Za-z_][\w.-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
            .expect("Invalid regex pattern")
    });

    re.captures_iter(doctype)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();
            Some((name, value))
        })
        .collect()
}

/// Look up a document type entity, then the predefined XML ones
fn resolve_entity<'a>(entities: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    entities
        .get(name)
        .map(String::as_str)
        .or_else(|| resolve_predefined_entity(name))
}

fn xml_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> ParseError {
    ParseError::Xml {
        position: reader.buffer_position() as u64,
        message: err.to_string(),
    }
}

fn read_start(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
    entities: &HashMap<String, String>,
) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(reader, err))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value_with(|entity| resolve_entity(entities, entity))
            .map_err(|err| xml_error(reader, err))?
            .to_string();
        attributes.push((key, value));
    }

    Ok(Element::new(name, attributes))
}

/// Build the element tree under a synthetic document root
fn parse_tree(data: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(data);
    let mut entities = HashMap::new();
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event() {
            Ok(Event::DocType(ref e)) => {
                entities = entity_declarations(&String::from_utf8_lossy(e));
            }
            Ok(Event::Start(ref e)) => {
                stack.push(read_start(&reader, e, &entities)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = read_start(&reader, e, &entities)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(element);
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(xml_error(&reader, "unmatched closing tag"));
                }
                if let Some(element) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape_with(|entity| resolve_entity(&entities, entity))
                    .map_err(|err| xml_error(&reader, err))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(xml_error(&reader, err)),
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|el| el.name.clone()).unwrap_or_default();
        return Err(ParseError::UnexpectedEof(open));
    }

    Ok(stack.pop().unwrap_or_default())
}
