//! Basic usage example for the KITOpen client library.
//!
//! Searches the journal articles of the IPE institute and prints the first few.

use kitopen::config::{Language, SearchConfig};
use kitopen::models::SearchArgs;
use kitopen::SearchClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SearchConfig::default().lang(Language::En).timeout_seconds(20);
    let client = SearchClient::with_config(config)?;

    let args = SearchArgs::new()
        .institute("IPE")
        .publication_type("ZEITSCHRIFTENAUFSATZ")
        .limit(10);

    let publications = client.search(&args).await?;
    println!("Found {} publications\n", publications.len());

    for (i, publication) in publications.iter().take(3).enumerate() {
        println!("{}. {}", i + 1, publication.title());
        println!("   Authors: {}", publication.indexed_authors());
        if !publication.journal().is_empty() {
            println!("   Journal: {}", publication.journal());
        }
        if !publication.doi().is_empty() {
            println!("   DOI: {}", publication.doi());
        }
        println!("   URL: {}", publication.uri());
    }

    Ok(())
}
