//! Data structures for index searches and page downloads.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One indexed occurrence of a URL in one crawl snapshot.
///
/// Parsed from a single line of index query output. The index payload does
/// not echo the crawl it came from, so `crawl_id` starts out `None` and is
/// stamped by the orchestrator right after the search returns. Records are
/// read-only once stamped.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MatchRecord {
    /// The captured URL.
    pub url: String,
    /// Capture time as assigned by the crawl (e.g. `"20240218033838"`).
    pub timestamp: String,
    /// Path of the WARC container file holding the captured bytes.
    pub filename: String,
    /// Byte offset of the record's segment within `filename`.
    #[serde(deserialize_with = "de_u64_flexible")]
    pub offset: u64,
    /// Byte count of the segment. The range request derived from this is
    /// inclusive: `bytes=offset..offset+length-1`.
    #[serde(deserialize_with = "de_u64_flexible")]
    pub length: u64,
    /// Snapshot identifier this record was found in. Not present in raw
    /// index output; attached by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_id: Option<String>,
    /// Remaining index fields (status, mime, digest, ...) preserved as-is
    /// so raw records survive serialization round-trips.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Record of one successfully persisted page.
///
/// Created only on successful extraction + write, one per match record,
/// and accumulated into the run-wide manifest.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DownloadDescriptor {
    /// The captured URL.
    pub url: String,
    /// Capture time of the record that was downloaded.
    pub timestamp: String,
    /// Resolved snapshot identifier (`"unknown"` when none was available).
    pub crawl_id: String,
    /// Where the page bytes were written.
    pub filepath: String,
    /// Byte count written.
    pub size: u64,
}

/// Configuration for index queries and page retrieval.
///
/// All tunables are injected through this struct rather than read from
/// module globals, so tests can point the base URLs at local stubs.
///
/// # Example
///
/// ```
/// use crawlfetch::FetchConfig;
///
/// let config = FetchConfig {
///     max_retries: 3,
///     ..FetchConfig::default()
/// };
/// assert!(config.index_base_url.contains("index.commoncrawl.org"));
/// ```
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the index query service.
    pub index_base_url: String,
    /// Base URL of the archive storage serving WARC container files.
    pub storage_base_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Number of retries after the first attempt (so `max_retries + 1`
    /// attempts total).
    pub max_retries: u32,
    /// First backoff wait; doubles after every retry.
    pub initial_backoff: Duration,
    /// Per-request timeout for index queries.
    pub index_timeout: Duration,
    /// Per-request timeout for byte-range fetches.
    pub fetch_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            index_base_url: "https://index.commoncrawl.org".to_string(),
            storage_base_url: "https://data.commoncrawl.org".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) \
                         Gecko/20100101 Firefox/133.0"
                .to_string(),
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
            index_timeout: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(60),
        }
    }
}

/// One logical search fanned out over a set of crawl snapshots.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// URL pattern to search; the index endpoint itself expands a trailing
    /// `*` wildcard.
    pub url_pattern: String,
    /// Snapshot identifiers to visit, in order.
    pub crawl_ids: Vec<String>,
    /// Root directory for downloaded pages and the manifest.
    pub output_dir: PathBuf,
    /// Whether to download page content for every match.
    pub download: bool,
    /// Maximum pages downloaded per snapshot (not globally).
    pub limit: Option<usize>,
}

/// Aggregated results of one multi-snapshot run, in snapshot-then-record
/// order.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// All match records, stamped with their crawl ids.
    pub results: Vec<MatchRecord>,
    /// One descriptor per successfully persisted page.
    pub downloaded: Vec<DownloadDescriptor>,
}

/// The index service emits `offset`/`length` as JSON strings in most
/// snapshots and as numbers in a few; accept both.
fn de_u64_flexible<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlexibleU64;

    impl<'de> Visitor<'de> for FlexibleU64 {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an unsigned integer or a string of digits")
        }

        fn visit_u64<E>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(FlexibleU64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_record_parses_string_offsets() {
        let line = r#"{"url":"https://example.com/a","timestamp":"20240218033838","filename":"crawl-data/seg/file.warc.gz","offset":"1234","length":"567","status":"200"}"#;
        let record: MatchRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.offset, 1234);
        assert_eq!(record.length, 567);
        assert!(record.crawl_id.is_none());
        assert_eq!(
            record.extra.get("status"),
            Some(&serde_json::Value::String("200".to_string()))
        );
    }

    #[test]
    fn match_record_parses_numeric_offsets() {
        let line = r#"{"url":"https://example.com/a","timestamp":"20240218033838","filename":"f.warc.gz","offset":1234,"length":567}"#;
        let record: MatchRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.offset, 1234);
        assert_eq!(record.length, 567);
    }

    #[test]
    fn stamped_crawl_id_survives_serialization() {
        let line = r#"{"url":"u","timestamp":"t","filename":"f","offset":"0","length":"1"}"#;
        let mut record: MatchRecord = serde_json::from_str(line).unwrap();
        record.crawl_id = Some("CC-MAIN-2024-51".to_string());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""crawl_id":"CC-MAIN-2024-51""#));
    }

    #[test]
    fn descriptor_uses_manifest_field_names() {
        let descriptor = DownloadDescriptor {
            url: "https://example.com".to_string(),
            timestamp: "20240218033838".to_string(),
            crawl_id: "CC-MAIN-2024-51".to_string(),
            filepath: "out/page.html".to_string(),
            size: 42,
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        for key in ["url", "timestamp", "crawl_id", "filepath", "size"] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
        }
    }
}
