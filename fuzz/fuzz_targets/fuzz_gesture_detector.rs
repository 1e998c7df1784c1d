//! Fuzz target: `GestureDetector::observe_batch`
//!
//! Decodes arbitrary bytes into sensor records (NaN, infinities and
//! out-of-order timestamps included) and checks the batch contract: a
//! shake is never mixed with orientation changes and every non-finite
//! record is counted as rejected.
//!
//! cargo fuzz run fuzz_gesture_detector

#![no_main]

use libfuzzer_sys::fuzz_target;
use pomoshake::config::SessionConfig;
use pomoshake::sensors::{Gesture, GestureDetector, MAX_BATCH, SensorKind, SensorRecord};

/// 1 kind byte + 3 × f32 + u16 timestamp delta.
const RECORD_LEN: usize = 15;

fn decode(chunk: &[u8], t: &mut u64) -> SensorRecord {
    let f = |i: usize| f32::from_le_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]]);
    let dt = u16::from_le_bytes([chunk[13], chunk[14]]);
    // Top bit of the delta steps backwards in time.
    if dt & 0x8000 != 0 {
        *t = t.saturating_sub(u64::from(dt & 0x7fff));
    } else {
        *t += u64::from(dt);
    }
    let kind = if chunk[0] & 1 == 0 {
        SensorKind::Accelerometer
    } else {
        SensorKind::Orientation
    };
    SensorRecord {
        kind,
        values: [f(1), f(5), f(9)],
        timestamp_ms: *t,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut detector = GestureDetector::new(&SessionConfig::default());
    let mut t = 0u64;

    for batch_bytes in data.chunks(RECORD_LEN * MAX_BATCH) {
        let records: Vec<SensorRecord> = batch_bytes
            .chunks_exact(RECORD_LEN)
            .map(|c| decode(c, &mut t))
            .collect();

        let non_finite = records
            .iter()
            .filter(|r| match r.kind {
                SensorKind::Accelerometer => r.values.iter().any(|v| !v.is_finite()),
                SensorKind::Orientation => !r.values[1].is_finite(),
            })
            .count();

        let out = detector.observe_batch(&records);
        let shakes = out.gestures.iter().filter(|g| **g == Gesture::Shake).count();
        assert!(shakes <= 1);
        if shakes == 1 {
            assert_eq!(out.gestures.len(), 1, "shake mixed with tilt");
            // Orientation records are skipped once a shake fires.
            assert!(out.rejected as usize <= non_finite);
        } else {
            assert_eq!(out.rejected as usize, non_finite);
        }
        assert!(!detector.shake_intensity().is_nan());
    }
});
