// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Codeforces API client.
//!
//! Codeforces has no calendar endpoint; `user.status` lists every
//! submission with its creation time, and each one becomes a sample of one.

use crate::error::{AppError, CalendarError, Result};
use crate::models::ActivitySample;
use serde::Deserialize;

/// Codeforces REST client.
#[derive(Clone)]
pub struct CodeforcesClient {
    http: reqwest::Client,
    base_url: String,
}

impl CodeforcesClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// List all submissions for a handle.
    pub async fn list_submissions(&self, handle: &str) -> Result<Vec<CodeforcesSubmission>> {
        let url = format!("{}/api/user.status", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("handle", handle)])
            .send()
            .await
            .map_err(|e| AppError::PlatformApi(format!("Codeforces request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            tracing::warn!("Codeforces rate limit hit (429)");
            return Err(AppError::PlatformApi(AppError::PLATFORM_RATE_LIMIT.to_string()));
        }

        // Codeforces reports API failures (unknown handle, bad params) as
        // HTTP 400 with a FAILED envelope, so decode the body first.
        let body = response.text().await.map_err(|e| {
            AppError::PlatformApi(format!("Codeforces response read failed: {}", e))
        })?;
        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(AppError::PlatformApi(format!("HTTP {}: {}", status, body)));
            }
            Err(e) => {
                return Err(AppError::PlatformApi(format!("JSON parse error: {}", e)));
            }
        };

        match envelope.status.as_str() {
            "OK" => {
                let submissions = envelope.result.unwrap_or_default();
                tracing::debug!(handle, count = submissions.len(), "Fetched Codeforces submissions");
                Ok(submissions)
            }
            _ => {
                let comment = envelope.comment.unwrap_or_default();
                if comment.contains("not found") {
                    Err(AppError::NotFound(format!("Codeforces user {}", handle)))
                } else {
                    Err(AppError::PlatformApi(format!("Codeforces: {}", comment)))
                }
            }
        }
    }
}

/// Turn submissions into one-count samples. With `accepted_only`, only
/// submissions with verdict `OK` are kept.
pub fn submission_samples(
    submissions: &[CodeforcesSubmission],
    accepted_only: bool,
) -> std::result::Result<Vec<ActivitySample>, CalendarError> {
    submissions
        .iter()
        .filter(|s| !accepted_only || s.verdict.as_deref() == Some("OK"))
        .map(|s| -> std::result::Result<ActivitySample, CalendarError> {
            let epoch_seconds =
                u64::try_from(s.creation_time_seconds).map_err(|_| CalendarError::MalformedKey {
                    key: s.creation_time_seconds.to_string(),
                    reason: "negative submission time",
                })?;
            Ok(ActivitySample {
                epoch_seconds,
                count: 1,
            })
        })
        .collect()
}

/// Submission record from `user.status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesSubmission {
    pub id: u64,
    pub creation_time_seconds: i64,
    /// Missing while the submission is still being judged
    pub verdict: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    comment: Option<String>,
    result: Option<Vec<CodeforcesSubmission>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(id: u64, at: i64, verdict: Option<&str>) -> CodeforcesSubmission {
        CodeforcesSubmission {
            id,
            creation_time_seconds: at,
            verdict: verdict.map(String::from),
        }
    }

    #[test]
    fn test_submission_samples_filters_verdicts() {
        let submissions = vec![
            submission(1, 1_751_760_000, Some("OK")),
            submission(2, 1_751_760_100, Some("WRONG_ANSWER")),
            submission(3, 1_751_760_200, None),
        ];

        assert_eq!(submission_samples(&submissions, false).unwrap().len(), 3);

        let accepted = submission_samples(&submissions, true).unwrap();
        assert_eq!(
            accepted,
            vec![ActivitySample {
                epoch_seconds: 1_751_760_000,
                count: 1
            }]
        );
    }

    #[test]
    fn test_submission_samples_rejects_negative_time() {
        let err = submission_samples(&[submission(1, -5, Some("OK"))], false).unwrap_err();
        assert_eq!(err.kind(), "malformed_key");
    }
}
