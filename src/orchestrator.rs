//! Multi-snapshot orchestration and manifest writing.

use crate::client::RetryingClient;
use crate::download::download_pages;
use crate::error::FetchError;
use crate::index::search_index;
use crate::types::{FetchConfig, SearchOutcome, SearchRequest};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs one logical search across a set of crawl snapshots.
///
/// Snapshots are visited sequentially in the order given. For each one the
/// index is searched, every returned record is stamped with that crawl id,
/// and, when downloading was requested, pages are persisted with the
/// per-snapshot `limit`. An empty snapshot, one whose index errors at the
/// HTTP level, or one whose output directory cannot be created logs and
/// moves on; none of those can prevent the others from being processed.
/// Only a transport failure that survived every retry ends the run early.
/// Results and descriptors accumulate in snapshot-then-record order.
///
/// When downloading, the combined manifest is written to
/// `<output_dir>/manifest.json` after the last snapshot. Cancelling the
/// token stops the run at the next snapshot or record boundary and returns
/// what was accumulated so far (manifest included).
///
/// # Returns
///
/// The aggregated [`SearchOutcome`], or an error when the HTTP client
/// cannot be built, retries are exhausted on a transport failure, or the
/// manifest cannot be written.
pub async fn run_search(
    config: &FetchConfig,
    request: &SearchRequest,
    cancel: CancellationToken,
) -> Result<SearchOutcome, FetchError> {
    let client = RetryingClient::new(config)?;
    let mut outcome = SearchOutcome::default();

    for crawl_id in &request.crawl_ids {
        if cancel.is_cancelled() {
            info!("Search cancelled; returning partial results");
            break;
        }

        info!("Searching {}...", crawl_id);
        let mut results = search_index(&client, config, &request.url_pattern, crawl_id).await?;
        if results.is_empty() {
            info!("No results found in {}", crawl_id);
            continue;
        }
        info!("Found {} results in {}", results.len(), crawl_id);

        for record in &mut results {
            record.crawl_id = Some(crawl_id.clone());
        }

        if request.download {
            match download_pages(
                &client,
                config,
                &results,
                &request.output_dir,
                Some(crawl_id),
                request.limit,
                &cancel,
            )
            .await
            {
                Ok(descriptors) => outcome.downloaded.extend(descriptors),
                // A snapshot whose output cannot be written must not stop
                // the remaining snapshots; anything else is retry
                // exhaustion and ends the run.
                Err(FetchError::IoError(e)) => {
                    error!("Download failed for {}: {}", crawl_id, e)
                }
                Err(e) => return Err(e),
            }
        }
        outcome.results.extend(results);
    }

    info!(
        "TOTAL: {} results found across {} indices",
        outcome.results.len(),
        request.crawl_ids.len()
    );

    if request.download {
        std::fs::create_dir_all(&request.output_dir)?;
        let manifest_path = request.output_dir.join("manifest.json");
        let manifest = serde_json::to_string_pretty(&outcome.downloaded)?;
        std::fs::write(&manifest_path, manifest)?;
        info!(
            "Downloaded {} files. Manifest: {}",
            outcome.downloaded.len(),
            manifest_path.display()
        );
    }

    Ok(outcome)
}
