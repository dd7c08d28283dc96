// Prints the document list (or a keyword search) as the same HTML cards
// the desktop client shows, for pasting into a page or archiving.
//
// Usage:
//   docdesk-export                      all documents
//   docdesk-export search <keyword> [limit]

use anyhow::{bail, Context};
use docdesk::{
    api::{ApiClient, SearchQuery},
    config::Config,
    render, ApiError,
};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    let client = ApiClient::new(&config.base_url)
        .with_context(|| format!("bad base_url {:?}", config.base_url))?;

    let args: Vec<String> = env::args().collect();
    let html = match args.get(1).map(String::as_str) {
        None => {
            log::info!("Exporting all documents from {}", client.base_url());
            match client.documents().await {
                Ok(docs) => render::render_document_list(&docs),
                Err(e) => fail(e.user_message("Failed to load documents"), e)?,
            }
        }
        Some("search") => {
            let Some(keyword) = args.get(2).filter(|k| !k.trim().is_empty()) else {
                bail!("usage: docdesk-export search <keyword> [limit]");
            };
            let limit = match args.get(3) {
                Some(raw) => raw.parse().with_context(|| format!("invalid limit {:?}", raw))?,
                None => config.search_limit,
            };
            let query = SearchQuery {
                keyword: keyword.clone(),
                limit,
                subject: None,
            };
            match client.search(&query).await {
                Ok(docs) => render::render_search_results(&docs),
                Err(e) => fail("Search failed: Search request failed".to_string(), e)?,
            }
        }
        Some(other) => bail!("unknown command {:?}; expected nothing or `search`", other),
    };

    println!("{}", html);
    Ok(())
}

/// Print the error panel the page would show, then report the cause
fn fail(message: String, cause: ApiError) -> anyhow::Result<String> {
    println!("{}", render::render_error(&message));
    Err(anyhow::Error::new(cause).context(message))
}
