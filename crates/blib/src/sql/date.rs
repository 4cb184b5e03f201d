//! Coercion of loosely formatted date strings into SQL date literals.
//!
//! Input may use `/` or `-` separators, an ISO `T` joiner, and day-first
//! ordering (`DD-MM-YYYY`). Output is `YYYY-MM-DD`, or
//! `YYYY-MM-DD HH:MM:SS` in date-time mode, where a truncated input is
//! completed from a reference timestamp taken from a [`Clock`].
//!
//! The day-first detection is positional: a `-` at byte 1, 2 or 3 means the
//! string is reordered as `<token 3>-<token 2>-<token 1>`. Inputs that do not
//! fit the `D-M-YYYY` shape come out reordered all the same.

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tracing::trace;

/// Length of `YYYY-MM-DD HH:MM:SS`.
const DATE_TIME_LEN: usize = 19;

/// Source of the reference timestamp used to complete partial inputs.
pub trait Clock {
    /// Returns the current wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Options for [`normalize_date_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateOptions {
    /// Complete a partial date-time from the current time. When `false`
    /// the missing time is `00:00:00`.
    pub preset_now: bool,
    /// Emit `YYYY-MM-DD HH:MM:SS` instead of `YYYY-MM-DD`.
    pub date_time: bool,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            preset_now: true,
            date_time: false,
        }
    }
}

impl DateOptions {
    /// Options for a date-time column.
    #[must_use]
    pub const fn date_time(preset_now: bool) -> Self {
        Self {
            preset_now,
            date_time: true,
        }
    }
}

/// Normalizes `field` using the local wall clock.
///
/// ```rust
/// use blib::sql::normalize_date;
///
/// assert_eq!(normalize_date("31/12/2023", true, false), "2023-12-31");
/// assert_eq!(
///     normalize_date("2023-12-31T10:00:00", true, true),
///     "2023-12-31 10:00:00"
/// );
/// ```
#[must_use]
pub fn normalize_date(field: &str, preset_now: bool, is_date_time: bool) -> String {
    let options = DateOptions {
        preset_now,
        date_time: is_date_time,
    };
    normalize_date_with(field, &options, &SystemClock)
}

/// Normalizes `field`, taking the reference timestamp from `clock`.
#[must_use]
pub fn normalize_date_with(field: &str, options: &DateOptions, clock: &dyn Clock) -> String {
    let mut out = field.replace('/', "-").replace('T', " ");

    if options.date_time && out.len() < DATE_TIME_LEN {
        let reference = reference_timestamp(clock.now(), options.preset_now);
        out.push_str(&reference[out.len()..]);
    }

    let bytes = out.as_bytes();
    let day_first = matches!(
        bytes.iter().take(4).position(|b| *b == b'-'),
        Some(pos) if pos > 0
    );
    if day_first {
        out = reorder_day_first(bytes, options.date_time);
    }

    let normalized = trim(&out).to_owned();
    trace!(input = field, output = %normalized, "normalized date");
    normalized
}

fn reference_timestamp(now: NaiveDateTime, preset_now: bool) -> String {
    if preset_now {
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        now.format("%Y-%m-%d 00:00:00").to_string()
    }
}

/// Rewrites `D-M-Y[rest]` as `Y-M-D`, appending ` rest` in date-time mode.
/// Missing tokens read as empty.
fn reorder_day_first(bytes: &[u8], date_time: bool) -> String {
    let tokens: Vec<&[u8]> = bytes.split(|b| *b == b'-').collect();
    let token = |i: usize| tokens.get(i).copied().unwrap_or_default();
    let (day, month, tail) = (token(0), token(1), token(2));
    let split = tail.len().min(4);
    let (year, rest) = tail.split_at(split);

    let mut reordered = Vec::with_capacity(bytes.len() + 1);
    reordered.extend_from_slice(year);
    reordered.push(b'-');
    reordered.extend_from_slice(month);
    reordered.push(b'-');
    reordered.extend_from_slice(day);
    if date_time {
        reordered.push(b' ');
        reordered.extend_from_slice(trim_bytes(rest));
    }
    String::from_utf8_lossy(&reordered).into_owned()
}

const fn is_trimmed(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | 0x0B)
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii() && is_trimmed(c as u8))
}

fn trim_bytes(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !is_trimmed(*first) {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !is_trimmed(*last) {
            break;
        }
        bytes = rest;
    }
    bytes
}
