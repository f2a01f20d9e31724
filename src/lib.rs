//! crawlfetch - Search Common Crawl indexes and retrieve archived pages
//!
//! This library searches Common Crawl's dated index snapshots for URLs
//! matching a pattern and retrieves the exact captured page bytes from the
//! multi-gigabyte WARC container files using HTTP byte-range requests.
//!
//! # Features
//!
//! - **Multi-Snapshot Search**: Fan one search out over any set of crawl
//!   indexes, with per-snapshot failure isolation
//! - **Automatic Retry**: Exponential-backoff retry for gateway timeouts
//!   and transport failures
//! - **Range Extraction**: Fetch exactly one record's byte span and decode
//!   the WARC framing (gzipped or plain) down to the page payload
//! - **Stable Manifest**: One JSON manifest entry per persisted page, in
//!   snapshot-then-record order
//!
//! # Example
//!
//! ```no_run
//! use crawlfetch::{run_search, FetchConfig, SearchRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig::default();
//! let request = SearchRequest {
//!     url_pattern: "https://example.com/*".to_string(),
//!     crawl_ids: vec!["CC-MAIN-2024-51".to_string()],
//!     output_dir: "./commoncrawl_downloads".into(),
//!     download: true,
//!     limit: Some(10),
//! };
//! let outcome = run_search(&config, &request, CancellationToken::new()).await?;
//! println!("{} pages downloaded", outcome.downloaded.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod crawls;
pub mod download;
pub mod error;
pub mod extract;
pub mod index;
pub mod orchestrator;
pub mod types;
pub mod warc;

pub use client::RetryingClient;
pub use crawls::known_crawls;
pub use download::download_pages;
pub use error::FetchError;
pub use extract::fetch_page_content;
pub use index::search_index;
pub use orchestrator::run_search;
pub use types::{DownloadDescriptor, FetchConfig, MatchRecord, SearchOutcome, SearchRequest};
pub use warc::{SegmentError, SegmentReader, WarcRecord};
