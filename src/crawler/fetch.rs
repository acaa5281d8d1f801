//! Breadth-first site crawling for the fetcher stage
//!
//! Crawls a documentation site from one or more seed URLs, following only
//! same-host links up to the configured depth and page-count bounds. A fixed
//! delay between requests keeps the crawl polite. Individual page failures
//! are logged and skipped; the crawl keeps going.

use std::collections::{HashSet, VecDeque};

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::crawler::config::CrawlConfig;
use crate::crawler::error::CrawlError;
use crate::crawler::Page;

/// Check whether two URLs point at the same host
fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str()
}

/// Normalize a URL for the visited set: drop the fragment
fn clean_url(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Split seed strings into parsed URLs and rejected inputs.
///
/// Only absolute http/https URLs are accepted. Rejected seeds are returned
/// verbatim so the caller can report them before any crawling begins.
pub fn validate_seeds(seeds: &[String]) -> (Vec<Url>, Vec<String>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for seed in seeds {
        match Url::parse(seed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                valid.push(clean_url(url));
            }
            _ => invalid.push(seed.clone()),
        }
    }

    (valid, invalid)
}

/// Extract same-host links from a page
fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
        {
            continue;
        }

        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        let resolved = clean_url(resolved);

        if same_host(&resolved, base) && seen.insert(resolved.to_string()) {
            links.push(resolved);
        }
    }

    links
}

/// Fetch a single page, returning its HTML if it is usable
async fn fetch_page(client: &Client, url: &Url) -> Result<Option<String>, CrawlError> {
    debug!("Fetching {}", url);
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Skipping {}: HTTP {}", url, status);
        return Ok(None);
    }

    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(true);
    if !is_html {
        warn!("Skipping {}: non-HTML content type", url);
        return Ok(None);
    }

    let html = response.text().await?;
    Ok(Some(html))
}

/// Crawl breadth-first from the seed URLs.
///
/// Collects at most `config.max_pages` pages; links are not followed past
/// `config.max_depth`. Per-page fetch failures are logged and skipped.
#[instrument(skip(seeds), fields(seeds = seeds.len()))]
pub async fn crawl(seeds: &[Url], config: &CrawlConfig) -> Result<Vec<Page>, CrawlError> {
    if seeds.is_empty() {
        return Err(CrawlError::NoValidSeeds(
            "no seed URLs provided".to_string(),
        ));
    }

    info!("Starting crawl from {} seed(s)", seeds.len());
    debug!("Crawler config: {:?}", config);

    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(&config.user_agent)
        .build()?;

    let mut frontier: VecDeque<(Url, u32)> =
        seeds.iter().cloned().map(|url| (url, 0)).collect();
    let mut visited: HashSet<String> = HashSet::new();
    let mut pages = Vec::new();
    let mut first_request = true;

    while let Some((url, depth)) = frontier.pop_front() {
        if pages.len() >= config.max_pages {
            break;
        }
        if !visited.insert(url.to_string()) {
            continue;
        }

        // Politeness delay between requests, not before the first one
        if !first_request {
            tokio::time::sleep(config.delay()).await;
        }
        first_request = false;

        let html = match fetch_page(&client, &url).await {
            Ok(Some(html)) => html,
            Ok(None) => continue,
            Err(e) => {
                warn!("Error fetching {}: {}", url, e);
                continue;
            }
        };

        if depth < config.max_depth {
            for link in extract_links(&html, &url) {
                if !visited.contains(link.as_str()) {
                    frontier.push_back((link, depth + 1));
                }
            }
        }

        pages.push(Page {
            url: url.to_string(),
            html,
            depth,
        });
    }

    info!("Crawl finished: collected {} pages", pages.len());
    Ok(pages)
}
