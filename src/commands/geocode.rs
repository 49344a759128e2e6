use anyhow::{Context, Result};
use clap::Args;

use smwgeo::config::Config;
use smwgeo::error::{Error, SmwErrorTrait};
use smwgeo::geocoder::SemanticWikiResolver;
use smwgeo::models::Location;

/// Resolver options that override the loaded configuration
#[derive(Args, Debug, Default)]
pub struct ResolverArgs {
    /// Page URL template with a single %s placeholder
    #[arg(long)]
    format_url: Option<String>,

    /// Attribute to search (repeatable, in priority order)
    #[arg(short, long = "attribute")]
    attributes: Vec<String>,

    /// Relation to follow (repeatable, in priority order)
    #[arg(short, long = "relation")]
    relations: Vec<String>,

    /// Maximum relation depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl ResolverArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(format_url) = &self.format_url {
            config.resolver.format_url = format_url.clone();
        }
        if !self.attributes.is_empty() {
            config.resolver.attributes = self.attributes.clone();
        }
        if !self.relations.is_empty() {
            config.resolver.relations = self.relations.clone();
        }
        if self.max_depth.is_some() {
            config.resolver.max_depth = self.max_depth;
        }
    }
}

fn build_resolver(mut config: Config, args: &ResolverArgs) -> Result<SemanticWikiResolver> {
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let resolver =
        SemanticWikiResolver::from_config(&config).context("Failed to create resolver")?;
    Ok(resolver)
}

fn log_failure(err: &Error) {
    tracing::error!(
        category = err.category().as_str(),
        recoverable = err.is_recoverable(),
        "{}",
        err.summary()
    );
}

fn print_location(location: &Location, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(location)?);
        return Ok(());
    }

    println!("Label: {}", location.label.as_deref().unwrap_or("(none)"));
    match &location.point {
        Some(point) => {
            println!("Latitude: {}", point.latitude);
            println!("Longitude: {}", point.longitude);
        }
        None => println!("No coordinates found"),
    }
    Ok(())
}

pub async fn geocode(query: &str, config: Config, args: ResolverArgs) -> Result<()> {
    let resolver = build_resolver(config, &args)?;

    let location = resolver
        .geocode(query)
        .await
        .inspect_err(log_failure)
        .with_context(|| format!("Failed to geocode \"{query}\""))?;

    print_location(&location, args.json)
}

pub async fn resolve(url: &str, config: Config, args: ResolverArgs) -> Result<()> {
    let resolver = build_resolver(config, &args)?;

    let location = resolver
        .geocode_url(url)
        .await
        .inspect_err(log_failure)
        .with_context(|| format!("Failed to resolve {url}"))?;

    print_location(&location, args.json)
}
