//! Fuzz target: `trace::parse_line` and `JsonTraceFeed`
//!
//! Feeds arbitrary text through the trace decoder and asserts that it
//! never panics, never yields an empty or oversized batch, and that the
//! streaming feed agrees with the line parser.
//!
//! cargo fuzz run fuzz_trace_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use pomoshake::adapters::trace::{JsonTraceFeed, parse_line};
use pomoshake::app::ports::SensorFeed;
use pomoshake::sensors::MAX_BATCH;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut expected = 0usize;
    for line in text.lines() {
        if let Ok(Some(batch)) = parse_line(line) {
            assert!(!batch.is_empty(), "parser yielded an empty batch");
            assert!(batch.len() <= MAX_BATCH);
            expected += 1;
        }
    }

    let mut feed = JsonTraceFeed::new(text.as_bytes());
    let mut seen = 0usize;
    while let Some(batch) = feed.next_batch() {
        assert!(!batch.is_empty());
        seen += 1;
    }
    assert_eq!(seen, expected, "feed and line parser disagree");
});
