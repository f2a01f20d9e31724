//! Index query and result parsing.

use crate::client::RetryingClient;
use crate::error::FetchError;
use crate::types::{FetchConfig, MatchRecord};
use reqwest::StatusCode;
use tracing::{debug, warn};

/// Searches a single crawl index for URLs matching a pattern.
///
/// Issues one GET to the snapshot's index endpoint asking for line-delimited
/// JSON. A non-200 status logs and degrades to an empty list so a missing or
/// erroring snapshot cannot abort a multi-snapshot search; only a transport
/// failure that survived every retry comes back as an error. Returned
/// records are not yet stamped with the crawl id; the caller owns that.
pub async fn search_index(
    client: &RetryingClient,
    config: &FetchConfig,
    url_pattern: &str,
    crawl_id: &str,
) -> Result<Vec<MatchRecord>, FetchError> {
    let index_url = format!(
        "{}/{}-index",
        config.index_base_url.trim_end_matches('/'),
        crawl_id
    );
    let request = client
        .get(&index_url)
        .query(&[("url", url_pattern), ("output", "json")])
        .timeout(config.index_timeout);

    let response = client.execute(request).await?;
    if response.status() != StatusCode::OK {
        warn!("Error querying {}: HTTP {}", crawl_id, response.status());
        return Ok(Vec::new());
    }

    let body = response.text().await?;
    Ok(parse_index_body(&body))
}

/// Parses a line-delimited JSON index response body.
///
/// Every non-empty line is decoded independently; malformed lines are
/// skipped without aborting the rest, since the index occasionally
/// interleaves diagnostic lines with data lines. Line order is preserved.
pub(crate) fn parse_index_body(body: &str) -> Vec<MatchRecord> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<MatchRecord>(line) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed index line: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(url: &str, offset: u64) -> String {
        format!(
            r#"{{"url":"{url}","timestamp":"20240218033838","filename":"seg/file.warc.gz","offset":"{offset}","length":"100"}}"#
        )
    }

    #[test]
    fn parses_every_valid_line_in_order() {
        let body = format!("{}\n{}\n{}\n", line("https://a", 0), line("https://b", 1), line("https://c", 2));
        let records = parse_index_body(&body);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].url, "https://a");
        assert_eq!(records[1].offset, 1);
        assert_eq!(records[2].url, "https://c");
    }

    #[test]
    fn malformed_lines_do_not_reduce_valid_count() {
        let body = format!(
            "{}\nnot json at all\n{}\n{{\"broken\": \n{}",
            line("https://a", 0),
            line("https://b", 1),
            line("https://c", 2)
        );
        let records = parse_index_body(&body);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let body = format!("\n\n{}\n   \n", line("https://a", 0));
        assert_eq!(parse_index_body(&body).len(), 1);
    }

    #[test]
    fn empty_body_yields_no_records() {
        assert!(parse_index_body("").is_empty());
    }
}
