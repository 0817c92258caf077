use crate::api::models::SemanticSearchResponse;
use crate::{Error, Result};
use reqwest::Client;

/// Search a running server by free text and print matching recipe
/// names
pub async fn search(server_url: &str, query: &str, limit: Option<usize>) -> Result<()> {
    let client = Client::new();

    let mut url = format!(
        "{}/api/semantic/by-text?query={}",
        server_url,
        urlencoding::encode(query)
    );
    if let Some(limit) = limit {
        url.push_str(&format!("&limit={limit}"));
    }

    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Http(response.error_for_status().unwrap_err()));
    }

    let results: SemanticSearchResponse = response.json().await?;

    if !results.available {
        println!("Semantic search is unavailable on this server.");
        return Ok(());
    }

    if results.recipe_names.is_empty() {
        println!("No recipes found for \"{query}\"");
        return Ok(());
    }

    println!("Found {} recipes:", results.count);
    for name in &results.recipe_names {
        println!("  {name}");
    }
    println!("\nUse /api/recipes/by-name?name=<recipe_name> for full details");

    Ok(())
}
