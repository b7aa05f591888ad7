// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Submission calendar normalization.
//!
//! Platforms report activity as a sparse map of epoch-second keys to
//! submission counts. This module turns that into a [`DailyActivityMap`]
//! keyed by calendar day, truncating each timestamp under the caller's
//! [`TimezonePolicy`]. Normalization is pure and all-or-nothing: the first
//! malformed entry fails the whole call.

use chrono::DateTime;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::CalendarError;
use crate::models::{ActivitySample, DailyActivityMap, TimezonePolicy};

/// Raw "epoch seconds -> count" mapping as delivered by a platform.
pub type RawCalendar = BTreeMap<String, Value>;

/// Normalize a raw calendar into per-day counts under `policy`.
///
/// Keys must be base-10 epoch seconds; values must be non-negative integers.
/// Samples landing on the same day are summed, so the output total always
/// equals the input total.
pub fn normalize(
    raw: &RawCalendar,
    policy: TimezonePolicy,
) -> Result<DailyActivityMap, CalendarError> {
    let samples = raw
        .iter()
        .map(|(key, value)| -> Result<ActivitySample, CalendarError> {
            Ok(ActivitySample {
                epoch_seconds: parse_epoch_key(key)?,
                count: parse_count(key, value)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    normalize_samples(samples, policy)
}

/// Normalize already-typed samples under `policy`.
pub fn normalize_samples(
    samples: impl IntoIterator<Item = ActivitySample>,
    policy: TimezonePolicy,
) -> Result<DailyActivityMap, CalendarError> {
    let mut calendar = DailyActivityMap::new(policy);

    for sample in samples {
        let instant = i64::try_from(sample.epoch_seconds)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| CalendarError::MalformedKey {
                key: sample.epoch_seconds.to_string(),
                reason: "timestamp out of range",
            })?;

        calendar.add(policy.date_of(instant), sample.count)?;
    }

    Ok(calendar)
}

/// Decode the JSON-encoded calendar string LeetCode embeds in its profile
/// payload (`"{\"1751760000\": 3}"`). Blank input is an empty calendar.
pub fn parse_submission_calendar(text: &str) -> Result<RawCalendar, CalendarError> {
    if text.trim().is_empty() {
        return Ok(RawCalendar::new());
    }

    serde_json::from_str(text).map_err(|e| CalendarError::MalformedCalendar(e.to_string()))
}

fn parse_epoch_key(key: &str) -> Result<u64, CalendarError> {
    let malformed = |reason| CalendarError::MalformedKey {
        key: key.to_string(),
        reason,
    };

    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("expected non-negative base-10 epoch seconds"));
    }

    key.parse::<u64>()
        .map_err(|_| malformed("timestamp out of range"))
}

fn parse_count(key: &str, value: &Value) -> Result<u64, CalendarError> {
    value.as_u64().ok_or_else(|| CalendarError::MalformedValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
