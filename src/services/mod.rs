// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calendar;
pub mod codeforces;
pub mod leetcode;

pub use calendar::{normalize, normalize_samples, parse_submission_calendar, RawCalendar};
pub use codeforces::CodeforcesClient;
pub use leetcode::LeetCodeClient;

use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;

/// Check a platform response status and parse its JSON body.
pub(crate) async fn read_json_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Platform rate limit hit (429)");
            return Err(AppError::PlatformApi(AppError::PLATFORM_RATE_LIMIT.to_string()));
        }

        return Err(AppError::PlatformApi(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::PlatformApi(format!("JSON parse error: {}", e)))
}
