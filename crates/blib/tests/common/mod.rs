#![allow(dead_code)]

use blib::arr::{Mapping, Value};
use blib::sql::FixedClock;
use chrono::NaiveDate;
use tracing::Level;

/// Routes library logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Parses a JSON object literal into a [`Mapping`].
pub fn tree(json: &str) -> Mapping {
    let value: serde_json::Value =
        serde_json::from_str(json).unwrap_or_else(|e| panic!("Bad JSON: {json}\nError: {e}"));
    match Value::from(value) {
        Value::Map(m) => m,
        other => panic!("Expected a JSON object, got {other:?}"),
    }
}

/// Renders a mapping as compact JSON.
pub fn to_json(mapping: &Mapping) -> String {
    serde_json::to_string(mapping).expect("mapping serializes")
}

/// A clock stopped at 2024-03-15 18:45:30.
pub fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .and_then(|d| d.and_hms_opt(18, 45, 30))
            .expect("valid timestamp"),
    )
}
