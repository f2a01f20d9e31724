//! Page download and on-disk layout.

use crate::client::RetryingClient;
use crate::error::FetchError;
use crate::extract::fetch_page_content;
use crate::types::{DownloadDescriptor, FetchConfig, MatchRecord};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Characters not allowed in stored filenames.
const UNSAFE_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
/// Sanitized path cores longer than this are cut off. Collisions between
/// truncated names sharing a timestamp are an accepted rare edge case.
const MAX_CORE_LEN: usize = 100;

/// Downloads page content for a list of match records.
///
/// Records are visited in order, at most `limit` of them; the rest are
/// simply not fetched. Each page lands at
/// `output_dir/<crawl id>/<host>/<timestamp>_<sanitized path>.html`,
/// overwriting whatever is there, so re-runs re-download in place. The
/// explicit `crawl_id` wins over a record's stamped value, falling back to
/// `"unknown"`.
///
/// Per-record failures (no extractable content, unparseable URL, a write
/// error) are logged and absorbed; the returned descriptors cover exactly
/// the pages that were persisted. A transport failure that survived every
/// retry ends the call with an error.
pub async fn download_pages(
    client: &RetryingClient,
    config: &FetchConfig,
    records: &[MatchRecord],
    output_dir: &Path,
    crawl_id: Option<&str>,
    limit: Option<usize>,
    cancel: &CancellationToken,
) -> Result<Vec<DownloadDescriptor>, FetchError> {
    std::fs::create_dir_all(output_dir)?;

    let count = limit.unwrap_or(records.len()).min(records.len());
    let progress = if atty::is(atty::Stream::Stderr) {
        let pb = indicatif::ProgressBar::new(count as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓▒░ "),
        );
        pb
    } else {
        indicatif::ProgressBar::hidden()
    };

    let mut downloaded = Vec::new();
    for (i, record) in records.iter().take(count).enumerate() {
        if cancel.is_cancelled() {
            info!("Download cancelled after {} page(s)", downloaded.len());
            break;
        }
        info!("[{}/{}] {}", i + 1, count, record.url);
        progress.set_message(record.url.clone());

        let Some(content) = fetch_page_content(client, config, record).await? else {
            progress.inc(1);
            continue;
        };

        let parsed = match reqwest::Url::parse(&record.url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Skipping {}: unparseable URL ({})", record.url, e);
                progress.inc(1);
                continue;
            }
        };
        let resolved_crawl = crawl_id
            .map(str::to_string)
            .or_else(|| record.crawl_id.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let host = parsed.host_str().unwrap_or("unknown-host");
        let host_dir = match parsed.port() {
            Some(port) => format!("{host}_{port}"),
            None => host.to_string(),
        };
        let page_dir = output_dir.join(&resolved_crawl).join(host_dir);
        if let Err(e) = std::fs::create_dir_all(&page_dir) {
            error!("Failed to create {}: {}", page_dir.display(), e);
            progress.inc(1);
            continue;
        }

        let filepath = page_dir.join(sanitize_filename(parsed.path(), &record.timestamp));
        if let Err(e) = tokio::fs::write(&filepath, &content).await {
            error!("Failed to write {}: {}", filepath.display(), e);
            progress.inc(1);
            continue;
        }
        info!("Saved {} bytes -> {}", content.len(), filepath.display());

        downloaded.push(DownloadDescriptor {
            url: record.url.clone(),
            timestamp: record.timestamp.clone(),
            crawl_id: resolved_crawl,
            filepath: filepath.display().to_string(),
            size: content.len() as u64,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(downloaded)
}

/// Converts a URL path into a filesystem-safe filename.
///
/// Leading/trailing slashes are stripped (an empty path becomes `"index"`),
/// unsafe characters become `_`, the core is capped at 100 characters, and
/// the capture timestamp plus an `.html` suffix frame the result.
pub(crate) fn sanitize_filename(url_path: &str, timestamp: &str) -> String {
    let trimmed = url_path.trim_matches('/');
    let mut core: String = if trimmed.is_empty() {
        "index".to_string()
    } else {
        trimmed
            .chars()
            .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
            .collect()
    };
    if core.chars().count() > MAX_CORE_LEN {
        core = core.chars().take(MAX_CORE_LEN).collect();
    }
    format!("{timestamp}_{core}.html")
}
