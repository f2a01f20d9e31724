use clap::Parser;
use crawlfetch::{known_crawls, run_search, FetchConfig, SearchRequest};
use std::io::Write;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "crawlfetch")]
#[command(about = "Search Common Crawl for URLs and download page content", long_about = None)]
#[command(version)]
struct Args {
    /// URL pattern to search (supports a trailing * wildcard)
    #[arg(required_unless_present = "list_crawls")]
    url_pattern: Option<String>,

    /// Specific crawl ID(s) to search (can be repeated)
    #[arg(short, long = "crawl", value_name = "ID")]
    crawls: Vec<String>,

    /// Search ALL known crawl indices (2008-2025)
    #[arg(short, long)]
    all: bool,

    /// Output file for search results (JSON)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Download page content
    #[arg(long)]
    download: bool,

    /// Output directory for downloads
    #[arg(short, long, default_value = "./commoncrawl_downloads")]
    dir: PathBuf,

    /// Limit number of pages to download per crawl
    #[arg(short, long)]
    limit: Option<usize>,

    /// List available crawl indices and exit
    #[arg(long)]
    list_crawls: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout is reserved for structured results.
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("crawlfetch={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    if args.list_crawls {
        println!("Available crawl indices:");
        for crawl_id in known_crawls() {
            println!("  {}", crawl_id);
        }
        return Ok(());
    }

    let Some(url_pattern) = args.url_pattern else {
        anyhow::bail!("a URL pattern is required unless --list-crawls is given");
    };
    let crawl_ids: Vec<String> = if args.all {
        known_crawls().iter().map(|s| s.to_string()).collect()
    } else if !args.crawls.is_empty() {
        args.crawls.clone()
    } else {
        anyhow::bail!("specify --crawl/-c or --all/-a to select crawl indices");
    };

    info!("🔍 CrawlFetch - Common Crawl URL Search & Page Retrieval");
    info!("Pattern: {}", url_pattern);
    info!("Indices to search: {}", crawl_ids.len());

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Interrupt received, stopping after the current page...");
                cancel.cancel();
            }
        });
    }

    let config = FetchConfig::default();
    let request = SearchRequest {
        url_pattern,
        crawl_ids,
        output_dir: args.dir.clone(),
        download: args.download,
        limit: args.limit,
    };

    let outcome = match run_search(&config, &request, cancel).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&outcome.results)?;
        std::fs::write(path, json)?;
        info!("Results saved to {}", path.display());
    } else if !args.download {
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        for record in &outcome.results {
            serde_json::to_writer(&mut stdout, record)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
