//! # modex CLI Application
//!
//! Command-line interface for the documentation module extractor. Runs the
//! pipeline stages in sequence with progress reporting between them and
//! writes the extracted module hierarchy as a JSON document.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Seed input from direct arguments or a newline-delimited file
//! - Configurable crawl bounds (delay, max pages, max depth)
//! - Optional remote description service with template fallback (`--no-ai`
//!   forces templates)
//! - Progress tracking for the crawl and describe stages

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use modex::assemble::{assemble, write_output};
use modex::crawler::{crawl, validate_seeds, CrawlConfig};
use modex::describe::{DescribeConfig, Describer};
use modex::normalize::extract_blocks;
use modex::outline::group_blocks;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extract structured modules from documentation websites",
    long_about = None,
    group(clap::ArgGroup::new("input").required(true).args(["urls", "file"]))
)]
struct Cli {
    /// One or more documentation URLs to process
    #[arg(long, num_args = 1..)]
    urls: Vec<String>,

    /// Text file containing URLs (one per line, # for comments)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Output JSON file path; {timestamp} is replaced
    #[arg(short, long, default_value = "output/modules_{timestamp}.json")]
    output: String,

    /// Delay between HTTP requests in milliseconds
    #[arg(long, default_value = "1000")]
    delay: u64,

    /// Maximum number of pages to crawl
    #[arg(short = 'p', long, default_value = "30")]
    max_pages: usize,

    /// Maximum crawling depth
    #[arg(short = 'd', long, default_value = "2")]
    max_depth: u32,

    /// API key for the description service (default: OPENAI_API_KEY env)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to use for remote description generation
    #[arg(short, long, default_value = "gpt-4o-mini")]
    model: String,

    /// Use only template-based descriptions (no remote service)
    #[arg(long)]
    no_ai: bool,

    /// Print a summary and the JSON document to stdout
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Read seed URLs from a file, skipping blanks and # comments
async fn read_seed_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Replace the `{timestamp}` placeholder in the output path template
fn resolve_output_path(template: &str) -> PathBuf {
    if template.contains("{timestamp}") {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        PathBuf::from(template.replace("{timestamp}", &timestamp))
    } else {
        PathBuf::from(template)
    }
}

fn print_summary(entries: &[modex::assemble::ModuleEntry]) {
    println!();
    println!("{}", "=".repeat(60));
    println!("EXTRACTION SUMMARY");
    println!("{}", "=".repeat(60));

    for (i, entry) in entries.iter().enumerate() {
        println!("\n{}. Module: {}", i + 1, entry.module);
        println!("   Description: {}", entry.description);
        if !entry.submodules.is_empty() {
            println!("   Submodules ({}):", entry.submodules.len());
            for name in entry.submodules.keys().take(3) {
                println!("     - {}", name);
            }
            if entry.submodules.len() > 3 {
                println!("     ... and {} more", entry.submodules.len() - 3);
            }
        }
    }

    println!("\n{}", "=".repeat(60));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Gather seeds
    let seeds = if let Some(file) = &cli.file {
        read_seed_file(file).await?
    } else {
        cli.urls.clone()
    };
    if seeds.is_empty() {
        bail!("no URLs provided or file is empty");
    }

    // Validate before crawling anything
    let (valid, invalid) = validate_seeds(&seeds);
    for seed in &invalid {
        eprintln!("Invalid URL skipped: {}", seed);
    }
    if valid.is_empty() {
        bail!("no valid URLs found");
    }

    let crawl_config = CrawlConfig::builder()
        .delay_ms(cli.delay)
        .max_pages(cli.max_pages)
        .max_depth(cli.max_depth)
        .build();

    let api_key = if cli.no_ai {
        None
    } else {
        cli.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    };
    let mut describe_builder = DescribeConfig::builder().model(cli.model.clone());
    if let Some(key) = api_key {
        describe_builder = describe_builder.api_key(key);
    }
    let describe_config = describe_builder.build();

    if !cli.quiet {
        println!("Crawling {} URL(s)...", valid.len());
    }
    let pages = crawl(&valid, &crawl_config).await?;
    if pages.is_empty() {
        bail!("no content could be extracted from the provided URLs");
    }
    if !cli.quiet {
        println!("Crawled {} pages", pages.len());
    }

    let blocks: Vec<_> = pages
        .iter()
        .flat_map(|page| extract_blocks(&page.url, &page.html))
        .collect();
    let mut candidates = group_blocks(&blocks);
    if !cli.quiet {
        println!("Identified {} potential modules", candidates.len());
    }
    if candidates.is_empty() {
        bail!("no modules could be extracted");
    }

    let describer = Describer::from_config(&describe_config)?;
    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        bar.set_message("Generating descriptions...");
        bar
    };

    for candidate in &mut candidates {
        describer.describe_candidate(candidate).await;
        progress.inc(1);
    }
    progress.finish_with_message("Descriptions generated");

    let entries = assemble(&candidates)?;

    let output_path = resolve_output_path(&cli.output);
    write_output(&entries, &output_path)
        .await
        .with_context(|| format!("failed to write output to {}", output_path.display()))?;

    if !cli.quiet {
        let total_submodules: usize = entries.iter().map(|e| e.submodules.len()).sum();
        println!(
            "Extraction completed: {} modules, {} submodules",
            entries.len(),
            total_submodules
        );
        println!("Results saved to {}", output_path.display());
    }

    if cli.pretty && !cli.quiet {
        print_summary(&entries);
        println!("\nJSON Output:");
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_path_timestamp() {
        let path = resolve_output_path("output/modules_{timestamp}.json");
        assert_eq!(path.parent(), Some(Path::new("output")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("modules_"));
        assert!(name.ends_with(".json"));
        assert!(!name.contains("{timestamp}"));
    }

    #[test]
    fn test_resolve_output_path_keeps_custom_stem() {
        let path = resolve_output_path("reports/custom_{timestamp}.json");
        assert_eq!(path.parent(), Some(Path::new("reports")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("custom_"));
        assert!(name.ends_with(".json"));
        assert!(!name.contains("{timestamp}"));
    }

    #[test]
    fn test_resolve_output_path_literal() {
        let path = resolve_output_path("results.json");
        assert_eq!(path, PathBuf::from("results.json"));
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["modex"]).is_err());
        assert!(Cli::try_parse_from(["modex", "--urls", "https://example.com"]).is_ok());
        assert!(Cli::try_parse_from(["modex", "--file", "urls.txt"]).is_ok());
        assert!(Cli::try_parse_from([
            "modex",
            "--urls",
            "https://example.com",
            "--file",
            "urls.txt"
        ])
        .is_err());
    }
}
