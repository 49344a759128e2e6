//! Semantic MediaWiki geocoder
//!
//! Resolves a place name to coordinates by reading the RDF export of its
//! wiki article. Resolution order for one page:
//!
//! 1. Fetch the article and find its RDF alternate link
//! 2. Fetch and parse the RDF export, pick the Thing the page is about
//! 3. Try the configured attributes in order until one parses as a
//!    complete coordinate
//! 4. Otherwise follow the configured relations in order, resolving each
//!    target page the same way, until one yields a label and coordinates
//!
//! Every URL is attempted at most once per top-level call, so relation
//! cycles terminate.
//!
//! # Example
//!
//! ```no_run
//! use smwgeo::geocoder::SemanticWikiResolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = SemanticWikiResolver::builder("https://wiki.example.org/wiki/%s")
//!         .attributes(["Coordinates"])
//!         .relations(["Located in"])
//!         .build()?;
//!
//!     let location = resolver.geocode("Brandenburg Gate").await?;
//!     println!("{:?} {:?}", location.label, location.point);
//!     Ok(())
//! }
//! ```

pub mod label;

pub use label::{LabelResolver, ThingLabel};

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::config::{Config, FetcherConfig};
use crate::error::Result;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::models::{Location, Point, VisitedSet};
use crate::parser::html::{find_rdf_link, RDF_MIME_TYPE};
use crate::parser::{attributes, parse_geo, parse_rdf, relations, Thing};
use crate::utils::error::ConfigError;
use crate::utils::{fill_format_url, resolve_link, transform_string, validate_format_url};

/// Name normalization applied to queries, attributes and relations
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Geocoder backed by a Semantic MediaWiki site
pub struct SemanticWikiResolver {
    format_url: String,
    attributes: Vec<String>,
    relations: Vec<String>,
    prefer_semantic: bool,
    rdf_mime_type: String,
    max_depth: Option<usize>,
    transform: TransformFn,
    label_resolver: Arc<dyn LabelResolver>,
    fetcher: Arc<dyn PageFetcher>,
}

/// Builder for [`SemanticWikiResolver`]
pub struct ResolverBuilder {
    format_url: String,
    attributes: Vec<String>,
    relations: Vec<String>,
    prefer_semantic: bool,
    rdf_mime_type: String,
    max_depth: Option<usize>,
    transform: Option<TransformFn>,
    label_resolver: Option<Arc<dyn LabelResolver>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    fetcher_config: FetcherConfig,
}

impl ResolverBuilder {
    fn new(format_url: impl Into<String>) -> Self {
        Self {
            format_url: format_url.into(),
            attributes: Vec::new(),
            relations: Vec::new(),
            prefer_semantic: false,
            rdf_mime_type: RDF_MIME_TYPE.to_string(),
            max_depth: None,
            transform: None,
            label_resolver: None,
            fetcher: None,
            fetcher_config: FetcherConfig::default(),
        }
    }

    /// Attribute names to search, in priority order
    pub fn attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Relation names to follow, in priority order
    pub fn relations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations = names.into_iter().map(Into::into).collect();
        self
    }

    /// Reserved flag; stored but not consulted during resolution
    pub fn prefer_semantic(mut self, prefer: bool) -> Self {
        self.prefer_semantic = prefer;
        self
    }

    /// MIME type of the RDF alternate link
    pub fn rdf_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.rdf_mime_type = mime_type.into();
        self
    }

    /// Stop following relations below this depth (start page is depth 0)
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Replace the MediaWiki name normalization
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Replace the label strategy
    pub fn label_resolver<L>(mut self, resolver: L) -> Self
    where
        L: LabelResolver + 'static,
    {
        self.label_resolver = Some(Arc::new(resolver));
        self
    }

    /// Use a specific page fetcher instead of the HTTP default
    pub fn fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: PageFetcher + 'static,
    {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Settings for the default HTTP fetcher
    pub fn fetcher_config(mut self, config: FetcherConfig) -> Self {
        self.fetcher_config = config;
        self
    }

    /// Build the resolver
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFormatUrl` unless the template holds
    /// exactly one `%s`, and `ConfigError::Client` if the default HTTP
    /// fetcher cannot be created.
    pub fn build(self) -> std::result::Result<SemanticWikiResolver, ConfigError> {
        validate_format_url(&self.format_url)?;

        let fetcher: Arc<dyn PageFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&self.fetcher_config)?),
        };
        let transform: TransformFn = match self.transform {
            Some(transform) => transform,
            None => Arc::new(transform_string),
        };
        let label_resolver: Arc<dyn LabelResolver> = match self.label_resolver {
            Some(resolver) => resolver,
            None => Arc::new(ThingLabel),
        };

        Ok(SemanticWikiResolver {
            format_url: self.format_url,
            attributes: self.attributes,
            relations: self.relations,
            prefer_semantic: self.prefer_semantic,
            rdf_mime_type: self.rdf_mime_type,
            max_depth: self.max_depth,
            transform,
            label_resolver,
            fetcher,
        })
    }
}

impl SemanticWikiResolver {
    /// Start building a resolver for a page URL template
    pub fn builder(format_url: impl Into<String>) -> ResolverBuilder {
        ResolverBuilder::new(format_url)
    }

    /// Build a resolver from loaded configuration
    ///
    /// # Errors
    ///
    /// See [`ResolverBuilder::build`].
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let resolver = &config.resolver;
        Self::builder(resolver.format_url.clone())
            .attributes(resolver.attributes.iter().cloned())
            .relations(resolver.relations.iter().cloned())
            .prefer_semantic(resolver.prefer_semantic)
            .rdf_mime_type(resolver.rdf_mime_type.clone())
            .max_depth(resolver.max_depth)
            .fetcher_config(config.fetcher.clone())
            .build()
    }

    pub fn prefer_semantic(&self) -> bool {
        self.prefer_semantic
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Normalize a name with the configured transform
    pub fn transform_string(&self, name: &str) -> String {
        (self.transform)(name)
    }

    /// Article URL for a free-text query
    pub fn get_url(&self, query: &str) -> String {
        fill_format_url(&self.format_url, &self.transform_string(query))
    }

    /// Label of a Thing according to the configured strategy
    pub fn get_label(&self, thing: &Thing) -> Option<String> {
        self.label_resolver.label(thing)
    }

    /// `(name, value)` pairs for `names`, or the configured attributes
    pub fn get_attributes<'a>(
        &'a self,
        thing: &'a Thing,
        names: Option<&'a [String]>,
    ) -> impl Iterator<Item = (String, String)> + 'a {
        attributes(
            thing,
            names.unwrap_or(self.attributes.as_slice()),
            &*self.transform,
        )
    }

    /// `(name, resource)` pairs for `names`, or the configured relations
    pub fn get_relations<'a>(
        &'a self,
        thing: &'a Thing,
        names: Option<&'a [String]>,
    ) -> impl Iterator<Item = (String, String)> + 'a {
        relations(
            thing,
            names.unwrap_or(self.relations.as_slice()),
            &*self.transform,
        )
    }

    /// Resolve a free-text place name
    ///
    /// # Errors
    ///
    /// Fetch and parse failures anywhere in the traversal are returned as
    /// is. A place that cannot be located is not an error: the result
    /// then has `point: None`.
    pub async fn geocode(&self, query: &str) -> Result<Location> {
        let url = self.get_url(query);
        tracing::info!(query = %query, url = %url, "Geocoding");
        self.geocode_url(&url).await
    }

    /// Resolve starting from an article URL with a fresh visited set
    ///
    /// # Errors
    ///
    /// See [`SemanticWikiResolver::geocode`].
    pub async fn geocode_url(&self, url: &str) -> Result<Location> {
        let mut visited = VisitedSet::new();
        self.geocode_url_with(url, &mut visited).await
    }

    /// Resolve starting from an article URL, sharing `visited`
    ///
    /// `url` is recorded in `visited` before the traversal starts.
    ///
    /// # Errors
    ///
    /// See [`SemanticWikiResolver::geocode`].
    pub async fn geocode_url_with(&self, url: &str, visited: &mut VisitedSet) -> Result<Location> {
        visited.insert(url);
        let location = self.resolve(url, visited, 0).await?;

        match &location.point {
            Some(point) => tracing::info!(
                url = %url,
                label = ?location.label,
                point = %point,
                visited = visited.len(),
                "Resolved coordinates"
            ),
            None => tracing::info!(
                url = %url,
                label = ?location.label,
                visited = visited.len(),
                "No coordinates found"
            ),
        }

        Ok(location)
    }

    fn first_point(&self, thing: &Thing) -> Option<Point> {
        self.get_attributes(thing, None).find_map(|(name, value)| {
            let (latitude, longitude) = parse_geo(&value);
            let point = Point::from_parts(latitude, longitude);
            if point.is_none() {
                tracing::debug!(attribute = %name, value = %value, "Not a coordinate");
            }
            point
        })
    }

    fn resolve<'a>(
        &'a self,
        url: &'a str,
        visited: &'a mut VisitedSet,
        depth: usize,
    ) -> BoxFuture<'a, Result<Location>> {
        Box::pin(async move {
            tracing::debug!(url = %url, depth, "Resolving page");
            let page = self.fetcher.fetch(url).await?;

            let Some(href) = find_rdf_link(&page, &self.rdf_mime_type)? else {
                tracing::warn!(url = %url, "Page has no RDF export link");
                return Ok(Location::empty());
            };

            let rdf_url = resolve_link(url, &href)?;
            let data = self.fetcher.fetch(&rdf_url).await?;
            let graph = parse_rdf(&data)?;

            let Some(thing) = graph.current_thing(url) else {
                tracing::warn!(url = %url, rdf_url = %rdf_url, "RDF export describes no entity");
                return Ok(Location::empty());
            };

            let label = self.get_label(thing);

            if let Some(point) = self.first_point(thing) {
                return Ok(Location::new(label, Some(point)));
            }

            // Last computed result; replaced by every related attempt
            let mut location = Location::new(label, None);

            if self.max_depth.is_some_and(|max| depth >= max) {
                tracing::debug!(url = %url, depth, "Relation depth limit reached");
                return Ok(location);
            }

            for (relation, resource) in self.get_relations(thing, None) {
                let target = graph.canonical_url(&resource).to_string();

                if !visited.insert(&target) {
                    tracing::debug!(relation = %relation, target = %target, "Already attempted");
                    continue;
                }

                tracing::debug!(relation = %relation, target = %target, "Following relation");
                let related = self.resolve(&target, &mut *visited, depth + 1).await?;
                if related.is_complete() {
                    return Ok(related);
                }
                location = related;
            }

            Ok(location)
        })
    }
}
