//! Content normalizer module
//!
//! Strips boilerplate markup from raw HTML and reduces each page to an
//! ordered sequence of [`ContentBlock`]s: one block per heading, carrying the
//! body text that follows it up to the next heading. No cross-page merging
//! happens here.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Tags whose entire subtree is dropped during extraction
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "template",
];

/// A normalized heading + body unit extracted from a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Heading text
    pub heading: String,

    /// Heading level (1-6); text before the first heading is level 1
    pub level: u8,

    /// Body text associated with the heading, whitespace-collapsed
    pub body: String,

    /// URL of the page the block came from
    pub source_url: String,
}

/// Collapse runs of whitespace into single spaces
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Accumulates blocks while walking the DOM in document order
struct BlockCollector {
    source_url: String,
    blocks: Vec<ContentBlock>,
    current_heading: Option<(String, u8)>,
    current_body: String,
}

impl BlockCollector {
    fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            blocks: Vec::new(),
            current_heading: None,
            current_body: String::new(),
        }
    }

    fn flush(&mut self, page_title: &str) {
        let body = collapse_whitespace(&self.current_body);
        self.current_body.clear();

        match self.current_heading.take() {
            Some((heading, level)) => {
                self.blocks.push(ContentBlock {
                    heading,
                    level,
                    body,
                    source_url: self.source_url.clone(),
                });
            }
            None => {
                // Preamble text before the first heading: attribute it to the
                // page title so it still participates in grouping. Pages with
                // no title yield a headingless block the grouper resolves by
                // keyword matching.
                if !body.is_empty() {
                    self.blocks.push(ContentBlock {
                        heading: page_title.to_string(),
                        level: 1,
                        body,
                        source_url: self.source_url.clone(),
                    });
                }
            }
        }
    }

    fn visit(&mut self, node: NodeRef<'_, Node>, page_title: &str) {
        for child in node.children() {
            match child.value() {
                Node::Text(text) => {
                    self.current_body.push_str(&*text);
                    self.current_body.push(' ');
                }
                Node::Element(element) => {
                    let tag = element.name();
                    if EXCLUDED_TAGS.contains(&tag) {
                        continue;
                    }
                    if let Some(level) = heading_level(tag) {
                        self.flush(page_title);
                        let heading = ElementRef::wrap(child)
                            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                            .unwrap_or_default();
                        self.current_heading = Some((heading, level));
                    } else {
                        self.visit(child, page_title);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Extract the `<title>` text of a page, if any
fn page_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Extract ordered content blocks from a page.
///
/// Script, style and navigation boilerplate is removed; headings become block
/// boundaries and trailing text attaches to the nearest preceding heading.
#[instrument(skip(html))]
pub fn extract_blocks(url: &str, html: &str) -> Vec<ContentBlock> {
    let document = Html::parse_document(html);
    let title = page_title(&document);

    let mut collector = BlockCollector::new(url);

    let body_selector = Selector::parse("body").ok();
    let root = body_selector
        .as_ref()
        .and_then(|s| document.select(s).next());

    match root {
        Some(body) => collector.visit(*body, &title),
        // Fragment without a body element: walk from the root
        None => collector.visit(document.tree.root(), &title),
    }
    collector.flush(&title);

    let blocks: Vec<ContentBlock> = collector
        .blocks
        .into_iter()
        .filter(|b| !b.heading.is_empty() || !b.body.is_empty())
        .collect();

    debug!("Extracted {} blocks from {}", blocks.len(), url);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html>
        <head><title>Help Center</title><style>.x { color: red; }</style></head>
        <body>
            <nav><a href="/">Home</a> site navigation text</nav>
            <h1>Billing</h1>
            <p>Manage invoices and payment methods.</p>
            <h2>Invoices</h2>
            <p>Download monthly invoices from the dashboard.</p>
            <script>console.log("tracking");</script>
            <h1>Security</h1>
            <p>Two-factor authentication and session controls.</p>
            <footer>Copyright footer text</footer>
        </body>
    </html>"#;

    #[test]
    fn test_extract_blocks_structure() {
        let blocks = extract_blocks("https://example.com/help", PAGE);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].heading, "Billing");
        assert_eq!(blocks[0].level, 1);
        assert!(blocks[0].body.contains("invoices and payment"));
        assert_eq!(blocks[1].heading, "Invoices");
        assert_eq!(blocks[1].level, 2);
        assert_eq!(blocks[2].heading, "Security");
        assert_eq!(blocks[2].level, 1);
        assert_eq!(blocks[0].source_url, "https://example.com/help");
    }

    #[test]
    fn test_no_boilerplate_leaks() {
        let blocks = extract_blocks("https://example.com/help", PAGE);

        for block in &blocks {
            assert!(!block.body.contains("console.log"));
            assert!(!block.body.contains("color: red"));
            assert!(!block.body.contains("site navigation"));
            assert!(!block.body.contains("Copyright footer"));
        }
    }

    #[test]
    fn test_preamble_attributed_to_title() {
        let html = r#"<html><head><title>Getting Started</title></head>
            <body><p>Welcome to the product documentation.</p></body></html>"#;
        let blocks = extract_blocks("https://example.com", html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].heading, "Getting Started");
        assert_eq!(blocks[0].level, 1);
        assert!(blocks[0].body.contains("Welcome"));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let html = "<html><body><h1>Setup</h1><p>step   one\n\n   step two</p></body></html>";
        let blocks = extract_blocks("https://example.com", html);

        assert_eq!(blocks[0].body, "step one step two");
    }

    #[test]
    fn test_headingless_page_keeps_body() {
        let html = "<html><body><p>Instructions for billing and payments.</p></body></html>";
        let blocks = extract_blocks("https://example.com", html);

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].heading.is_empty());
        assert!(blocks[0].body.contains("billing"));
    }

    #[test]
    fn test_empty_page() {
        let blocks = extract_blocks("https://example.com", "<html><body></body></html>");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_heading_with_no_body() {
        let html = "<html><body><h1>Billing</h1><h2>Invoices</h2></body></html>";
        let blocks = extract_blocks("https://example.com", html);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].heading, "Billing");
        assert!(blocks[0].body.is_empty());
    }
}
