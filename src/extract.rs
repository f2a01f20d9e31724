//! Byte-range fetch and page payload extraction.

use crate::client::RetryingClient;
use crate::error::FetchError;
use crate::types::{FetchConfig, MatchRecord};
use crate::warc::SegmentReader;
use futures_util::StreamExt;
use reqwest::header::RANGE;
use reqwest::StatusCode;
use tracing::warn;

/// Fetches the container segment for one match record and extracts the page
/// payload from it.
///
/// The record's `[offset, offset+length-1]` span is requested with a `Range`
/// header against archive storage and must come back as 206 Partial Content.
/// A wrong status, a body that cuts off mid-stream, or a segment that does
/// not decode are all per-record soft failures: they log and yield
/// `Ok(None)` so the caller moves on to the next record. Only a transport
/// failure that survived every retry is an error.
pub async fn fetch_page_content(
    client: &RetryingClient,
    config: &FetchConfig,
    record: &MatchRecord,
) -> Result<Option<Vec<u8>>, FetchError> {
    if record.length == 0 {
        warn!("Skipping {}: zero-length segment", record.url);
        return Ok(None);
    }
    let storage_url = format!(
        "{}/{}",
        config.storage_base_url.trim_end_matches('/'),
        record.filename
    );
    let byte_range = format!("bytes={}-{}", record.offset, record.offset + record.length - 1);

    let request = client
        .get(&storage_url)
        .header(RANGE, byte_range)
        .timeout(config.fetch_timeout);
    let response = client.execute(request).await?;
    if response.status() != StatusCode::PARTIAL_CONTENT {
        warn!("Failed to fetch {}: HTTP {}", record.url, response.status());
        return Ok(None);
    }

    // Collect the streamed segment; dropping the stream on any early return
    // releases the connection.
    let mut segment = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(piece) = stream.next().await {
        match piece {
            Ok(chunk) => segment.extend_from_slice(&chunk),
            Err(e) => {
                warn!("Failed to read segment for {}: {}", record.url, e);
                return Ok(None);
            }
        }
    }

    let reader = match SegmentReader::new(&segment) {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Error parsing segment for {}: {}", record.url, e);
            return Ok(None);
        }
    };
    match reader.first_response_payload() {
        Ok(Some(payload)) => Ok(Some(payload)),
        Ok(None) => {
            warn!("No response record in segment for {}", record.url);
            Ok(None)
        }
        Err(e) => {
            warn!("Error parsing segment for {}: {}", record.url, e);
            Ok(None)
        }
    }
}
