//! WARC container segment decoding.
//!
//! A byte range fetched from archive storage is a self-contained segment:
//! one or more framed records back-to-back, each with a textual header block
//! and a `Content-Length`-delimited body. Common Crawl serves segments as
//! gzip members, so the reader decompresses transparently when it sees the
//! gzip magic. This module owns all knowledge of the framing; everything
//! upstream only sees "the page payload or nothing".

use flate2::read::MultiGzDecoder;
use std::io::Read;
use thiserror::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Errors raised while decoding a container segment.
///
/// These never escape the extraction layer as hard failures; a segment that
/// does not decode is treated the same as a segment with no response record.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// The segment bytes do not follow the record framing.
    #[error("malformed container segment: {0}")]
    InvalidFraming(&'static str),

    /// The compressed segment could not be decompressed.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// One framed record: header fields plus the raw body bytes.
#[derive(Debug)]
pub struct WarcRecord {
    headers: Vec<(String, String)>,
    /// Record body, exactly `Content-Length` bytes.
    pub body: Vec<u8>,
}

impl WarcRecord {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The record's declared type (`WARC-Type`), if present.
    pub fn record_type(&self) -> Option<&str> {
        self.header("WARC-Type")
    }

    /// Body bytes after the embedded HTTP header block.
    ///
    /// Response records carry a full HTTP transaction (status line, headers,
    /// body); the payload is what follows the blank line. A body without a
    /// header terminator is returned whole.
    pub fn http_payload(&self) -> &[u8] {
        if let Some(at) = find(&self.body, HEADER_TERMINATOR, 0) {
            &self.body[at + HEADER_TERMINATOR.len()..]
        } else if let Some(at) = find(&self.body, b"\n\n", 0) {
            &self.body[at + 2..]
        } else {
            &self.body
        }
    }
}

/// Sequential reader over the records of one in-memory segment.
pub struct SegmentReader {
    data: Vec<u8>,
    pos: usize,
}

impl SegmentReader {
    /// Wraps a fetched segment, decompressing gzip members if needed.
    pub fn new(segment: &[u8]) -> Result<Self, SegmentError> {
        let data = if segment.starts_with(&GZIP_MAGIC) {
            let mut decompressed = Vec::new();
            MultiGzDecoder::new(segment).read_to_end(&mut decompressed)?;
            decompressed
        } else {
            segment.to_vec()
        };
        Ok(Self { data, pos: 0 })
    }

    /// Scans records in order and returns the HTTP payload of the first one
    /// typed `response`, or `None` when the segment holds no such record.
    pub fn first_response_payload(mut self) -> Result<Option<Vec<u8>>, SegmentError> {
        while let Some(record) = self.next_record()? {
            if record
                .record_type()
                .is_some_and(|t| t.eq_ignore_ascii_case("response"))
            {
                return Ok(Some(record.http_payload().to_vec()));
            }
        }
        Ok(None)
    }

    /// Decodes the next framed record, or `None` at end of segment.
    fn next_record(&mut self) -> Result<Option<WarcRecord>, SegmentError> {
        // Skip the CRLFs separating records.
        while self.pos < self.data.len() && (self.data[self.pos] == b'\r' || self.data[self.pos] == b'\n')
        {
            self.pos += 1;
        }
        if self.pos >= self.data.len() {
            return Ok(None);
        }

        let header_end = find(&self.data, HEADER_TERMINATOR, self.pos)
            .ok_or(SegmentError::InvalidFraming("unterminated header block"))?;
        let header_text = std::str::from_utf8(&self.data[self.pos..header_end])
            .map_err(|_| SegmentError::InvalidFraming("non-UTF-8 header block"))?;

        let mut lines = header_text.split("\r\n");
        let version = lines.next().unwrap_or_default();
        if !version.starts_with("WARC/") {
            return Err(SegmentError::InvalidFraming("missing WARC version line"));
        }

        let mut headers = Vec::new();
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        let length: usize = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("Content-Length"))
            .and_then(|(_, value)| value.parse().ok())
            .ok_or(SegmentError::InvalidFraming("missing Content-Length"))?;

        let body_start = header_end + HEADER_TERMINATOR.len();
        let body_end = body_start
            .checked_add(length)
            .filter(|&end| end <= self.data.len())
            .ok_or(SegmentError::InvalidFraming("truncated record body"))?;

        self.pos = body_end;
        Ok(Some(WarcRecord {
            headers,
            body: self.data[body_start..body_end].to_vec(),
        }))
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|at| at + from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn record(record_type: &str, body: &[u8]) -> Vec<u8> {
        let mut bytes = format!(
            "WARC/1.0\r\nWARC-Type: {}\r\nWARC-Target-URI: https://example.com/\r\nContent-Length: {}\r\n\r\n",
            record_type,
            body.len()
        )
        .into_bytes();
        bytes.extend_from_slice(body);
        bytes.extend_from_slice(b"\r\n\r\n");
        bytes
    }

    fn response_record(payload: &[u8]) -> Vec<u8> {
        let mut http = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n",
            payload.len()
        )
        .into_bytes();
        http.extend_from_slice(payload);
        record("response", &http)
    }

    fn gzipped(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn extracts_payload_from_single_response_record() {
        let payload = b"<html>hello</html>";
        let reader = SegmentReader::new(&response_record(payload)).unwrap();
        assert_eq!(reader.first_response_payload().unwrap().unwrap(), payload);
    }

    #[test]
    fn extracts_payload_from_gzipped_segment() {
        let payload = b"<html>compressed</html>";
        let segment = gzipped(&response_record(payload));
        let reader = SegmentReader::new(&segment).unwrap();
        assert_eq!(reader.first_response_payload().unwrap().unwrap(), payload);
    }

    #[test]
    fn skips_non_response_records() {
        let mut segment = record("request", b"GET / HTTP/1.1\r\n\r\n");
        let payload = b"<html>second</html>";
        segment.extend_from_slice(&response_record(payload));
        let reader = SegmentReader::new(&segment).unwrap();
        assert_eq!(reader.first_response_payload().unwrap().unwrap(), payload);
    }

    #[test]
    fn segment_without_response_record_yields_none() {
        let mut segment = record("warcinfo", b"software: test\r\n");
        segment.extend_from_slice(&record("metadata", b"via: test\r\n"));
        let reader = SegmentReader::new(&segment).unwrap();
        assert!(reader.first_response_payload().unwrap().is_none());
    }

    #[test]
    fn garbage_segment_is_a_framing_error() {
        let reader = SegmentReader::new(b"this is not a warc segment").unwrap();
        assert!(reader.first_response_payload().is_err());
    }

    #[test]
    fn truncated_body_is_a_framing_error() {
        let full = response_record(b"<html>cut</html>");
        let reader = SegmentReader::new(&full[..full.len() - 12]).unwrap();
        assert!(reader.first_response_payload().is_err());
    }

    #[test]
    fn payload_without_http_terminator_is_returned_whole() {
        let body = b"no http block here";
        let segment = record("response", body);
        let reader = SegmentReader::new(&segment).unwrap();
        assert_eq!(reader.first_response_payload().unwrap().unwrap(), body);
    }

    #[test]
    fn empty_segment_yields_none() {
        let reader = SegmentReader::new(b"").unwrap();
        assert!(reader.first_response_payload().unwrap().is_none());
    }
}
