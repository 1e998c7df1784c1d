//! JSON-lines sensor trace adapter.
//!
//! Replays a recorded sensor session through [`SensorFeed`].  Each line is
//! one batch: either a single record object or an array of records.
//!
//! ```text
//! {"kind":"accelerometer","values":[0.1,0.2,9.8],"timestamp_ms":0}
//! [{"kind":"orientation","values":[0,85,0],"timestamp_ms":1200}, ...]
//! ```
//!
//! Blank lines and lines starting with `#` are skipped silently; malformed
//! lines are logged and skipped.

use std::io::BufRead;

use log::warn;
use serde::Deserialize;

use crate::app::ports::SensorFeed;
use crate::error::FeedError;
use crate::sensors::{SensorBatch, SensorRecord};

#[derive(Deserialize)]
#[serde(untagged)]
enum TraceLine {
    Many(Vec<SensorRecord>),
    One(SensorRecord),
}

/// Decode one trace line.  `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<SensorBatch>, FeedError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let parsed: TraceLine = serde_json::from_str(line).map_err(|_| FeedError::Malformed)?;
    let mut batch = SensorBatch::new();
    match parsed {
        TraceLine::One(record) => {
            // Capacity is MAX_BATCH > 0.
            let _ = batch.push(record);
        }
        TraceLine::Many(records) => {
            if records.is_empty() {
                return Ok(None);
            }
            batch = SensorBatch::from_slice(&records).map_err(|_| FeedError::BatchOverflow)?;
        }
    }
    Ok(Some(batch))
}

/// Latest timestamp in a batch.
pub fn batch_end_ms(batch: &[SensorRecord]) -> Option<u64> {
    batch.iter().map(|r| r.timestamp_ms).max()
}

pub struct JsonTraceFeed<R> {
    reader: R,
    line_no: usize,
    skipped: usize,
    buf: String,
}

impl<R: BufRead> JsonTraceFeed<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            skipped: 0,
            buf: String::new(),
        }
    }

    /// Lines rejected so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> SensorFeed for JsonTraceFeed<R> {
    fn next_batch(&mut self) -> Option<SensorBatch> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    warn!("Trace read failed after line {}: {}", self.line_no, e);
                    return None;
                }
            }
            self.line_no += 1;

            match parse_line(&self.buf) {
                Ok(Some(batch)) => return Some(batch),
                Ok(None) => {}
                Err(e) => {
                    self.skipped += 1;
                    warn!("Skipping trace line {}: {}", self.line_no, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{MAX_BATCH, SensorKind};

    const TRACE: &str = r#"# recorded on a bench
{"kind":"accelerometer","values":[0.0,0.0,9.8],"timestamp_ms":0}

[{"kind":"accelerometer","values":[0.0,0.0,40.0],"timestamp_ms":100},{"kind":"orientation","values":[0.0,85.0,0.0],"timestamp_ms":120}]
{"kind":"gyroscope","values":[0,0,0],"timestamp_ms":200}
not json at all
{"kind":"orientation","values":[0.0,2.0,0.0],"timestamp_ms":2000}
"#;

    #[test]
    fn replays_batches_and_skips_bad_lines() {
        let mut feed = JsonTraceFeed::new(TRACE.as_bytes());
        let a = feed.next_batch().unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].kind, SensorKind::Accelerometer);

        let b = feed.next_batch().unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(batch_end_ms(&b), Some(120));

        let c = feed.next_batch().unwrap();
        assert_eq!(c[0].kind, SensorKind::Orientation);
        assert_eq!(c[0].values[1], 2.0);

        assert!(feed.next_batch().is_none());
        assert_eq!(feed.skipped(), 2);
    }

    #[test]
    fn oversized_array_is_rejected() {
        let one = r#"{"kind":"accelerometer","values":[0,0,9.8],"timestamp_ms":0}"#;
        let line = format!("[{}]", vec![one; MAX_BATCH + 1].join(","));
        assert_eq!(parse_line(&line), Err(FeedError::BatchOverflow));
    }

    #[test]
    fn empty_array_is_not_a_batch() {
        assert_eq!(parse_line("[]"), Ok(None));
    }
}
