//! Page, RDF and coordinate parsing
//!
//! This module handles the three parsing steps of a resolution: finding
//! the RDF export link in an article page, reading the RDF export into an
//! entity graph, and turning attribute text into coordinates.

pub mod geo;
pub mod html;
pub mod rdf;

pub use geo::parse_geo;
pub use html::{find_rdf_link, parse_rdf_link, RDF_MIME_TYPE};
pub use rdf::{attributes, parse_rdf, relations, thing_label, Element, EntityGraph, Thing};
