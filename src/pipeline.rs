//! Pipeline entry point
//!
//! Composes the stages sequentially: crawl, normalize, group, describe,
//! assemble. All configuration is passed by value; there is no process-wide
//! state.

use tracing::{info, instrument, warn};

use crate::assemble::{assemble, ModuleEntry};
use crate::crawler::{crawl, validate_seeds, CrawlConfig};
use crate::describe::{describe_candidates, DescribeConfig, Describer};
use crate::error::{Error, Result};
use crate::normalize::{extract_blocks, ContentBlock};
use crate::outline::group_blocks;

/// Configuration for a full pipeline run
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Crawler bounds and politeness settings
    pub crawl: CrawlConfig,

    /// Description backend selection and retry behavior
    pub describe: DescribeConfig,
}

/// Run the full extraction pipeline over the given seed URLs.
///
/// Invalid seeds are reported (and the run fails) before any crawling
/// happens when none of them are usable; otherwise the run proceeds with the
/// valid subset.
#[instrument(skip(seeds, config), fields(seeds = seeds.len()))]
pub async fn run_pipeline(
    seeds: &[String],
    config: ExtractorConfig,
) -> Result<Vec<ModuleEntry>> {
    let (valid, invalid) = validate_seeds(seeds);
    for seed in &invalid {
        warn!("Invalid seed URL skipped: {}", seed);
    }
    if valid.is_empty() {
        return Err(Error::InvalidSeeds(invalid.join(", ")));
    }

    let pages = crawl(&valid, &config.crawl).await.map_err(Error::from)?;
    info!("Crawled {} pages", pages.len());

    let blocks: Vec<ContentBlock> = pages
        .iter()
        .flat_map(|page| extract_blocks(&page.url, &page.html))
        .collect();
    info!("Extracted {} content blocks", blocks.len());

    let mut candidates = group_blocks(&blocks);
    info!("Identified {} module candidates", candidates.len());

    let describer = Describer::from_config(&config.describe).map_err(Error::from)?;
    describe_candidates(&describer, &mut candidates).await;

    let entries = assemble(&candidates).map_err(Error::from)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const DOCS_PAGE: &str = r#"<html>
        <head><title>Help Center</title></head>
        <body>
            <nav><a href="/other">nav link text</a></nav>
            <h1>Billing</h1>
            <p>Manage payment methods and subscription plans for your account.</p>
            <h2>Invoices</h2>
            <p>Download and review monthly invoices from the billing dashboard.</p>
            <h1>Security</h1>
            <p>Protect your account with security settings and access controls.</p>
            <h2>Two-Factor Authentication</h2>
            <p>Enable two-factor authentication for an extra layer of protection.</p>
        </body>
    </html>"#;

    fn test_config() -> ExtractorConfig {
        ExtractorConfig {
            crawl: CrawlConfig::builder()
                .max_depth(0)
                .max_pages(5)
                .delay_ms(0)
                .build(),
            describe: DescribeConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_template_descriptions() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(DOCS_PAGE)
            .create_async()
            .await;

        let seeds = vec![server.url()];
        let entries = run_pipeline(&seeds, test_config()).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].module, "Billing");
        assert_eq!(entries[1].module, "Security");
        for entry in &entries {
            assert!(!entry.description.is_empty());
            assert_eq!(entry.submodules.len(), 1);
            for description in entry.submodules.values() {
                assert!(!description.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_end_to_end_deterministic_without_service() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(DOCS_PAGE)
            .expect(2)
            .create_async()
            .await;

        let seeds = vec![server.url()];
        let first = run_pipeline(&seeds, test_config()).await.unwrap();
        let second = run_pipeline(&seeds, test_config()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_all_seeds_invalid_fails_before_crawl() {
        let seeds = vec!["not-a-url".to_string(), "ftp://x".to_string()];
        let result = run_pipeline(&seeds, test_config()).await;
        assert!(matches!(result, Err(Error::InvalidSeeds(_))));
    }
}
