//! Page fetching collaborator (`fetch` feature).
//!
//! The only networked step in an audit. It runs before any scorer and fails
//! fast with a typed error; the core never recovers from a failed fetch.

use thiserror::Error;

/// Fatal fetch failures. No partial audit result is produced after one.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },
}

/// A fetched page plus its host's robots.txt, when retrievable
#[derive(Debug)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,
    pub html: String,
    pub robots_txt: Option<String>,
}

const USER_AGENT: &str = concat!("citegeist/", env!("CARGO_PKG_VERSION"));

/// Fetch a page and its robots.txt. The robots.txt retrieval is
/// best-effort: a missing file is None, not an error.
pub fn fetch_page(url: &str) -> Result<FetchedPage, FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let response = client
        .get(parsed.clone())
        .send()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let final_url = response.url().to_string();
    let html = response
        .text()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let robots_txt = fetch_robots(&client, &parsed);

    Ok(FetchedPage {
        final_url,
        html,
        robots_txt,
    })
}

fn fetch_robots(client: &reqwest::blocking::Client, page_url: &url::Url) -> Option<String> {
    let robots_url = page_url.join("/robots.txt").ok()?;
    let response = client.get(robots_url).send().ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.text().ok()
}
