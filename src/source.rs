//! Character list loading
//!
//! One GET at startup, no retries. Decoding is split out so it can be
//! exercised without a browser.

use crate::character::{Character, CharacterPage};
use crate::error::SourceError;

/// Decode an API response body into its characters
pub fn parse_page(body: &str) -> Result<Vec<Character>, SourceError> {
    let page: CharacterPage = serde_json::from_str(body)?;
    log::debug!(
        "Decoded page: {} records, {} pages available",
        page.info.count,
        page.info.total_pages
    );
    Ok(page.into_characters())
}

/// Fetch the character list from `url` (WASM only)
#[cfg(target_arch = "wasm32")]
pub async fn fetch_characters(url: &str) -> Result<Vec<Character>, SourceError> {
    use gloo_net::http::Request;

    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(SourceError::Status {
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;
    let characters = parse_page(&body)?;
    log::info!("Loaded {} characters from {}", characters.len(), url);
    Ok(characters)
}
