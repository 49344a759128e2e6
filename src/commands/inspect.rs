use anyhow::{Context, Result};

use smwgeo::config::Config;
use smwgeo::fetcher::{HttpFetcher, PageFetcher};
use smwgeo::parser::rdf::{ATTRIBUTE_PREFIX, RELATION_PREFIX, RESOURCE_ATTR};
use smwgeo::parser::{find_rdf_link, parse_rdf, thing_label};
use smwgeo::utils::resolve_link;

pub async fn inspect(url: &str, mime_type: &str, config: &Config) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.fetcher).context("Failed to create fetcher")?;

    let page = fetcher.fetch(url).await?;
    let Some(href) = find_rdf_link(&page, mime_type)? else {
        println!("No {mime_type} link found on {url}");
        return Ok(());
    };

    let rdf_url = resolve_link(url, &href)?;
    println!("RDF export: {rdf_url}");

    let data = fetcher.fetch(&rdf_url).await?;
    let graph = parse_rdf(&data)?;

    if let Some(current) = graph.current_thing(url) {
        println!("Current entity: {}", current.about);
    }
    println!("{} entities", graph.things().len());

    for thing in graph.things() {
        println!();
        println!("{}", thing.about);
        if let Some(label) = thing_label(thing) {
            println!("  label: {label}");
        }
        if let Some(article) = &thing.article {
            println!("  article: {article}");
        }
        for el in thing.element().descendants() {
            if let Some(name) = el.name.strip_prefix(ATTRIBUTE_PREFIX) {
                println!("  attribute {name} = {}", el.text.trim());
            } else if let Some(name) = el.name.strip_prefix(RELATION_PREFIX) {
                let target = el.attr(RESOURCE_ATTR).unwrap_or("");
                println!("  relation {name} -> {}", graph.canonical_url(target));
            }
        }
    }

    Ok(())
}
