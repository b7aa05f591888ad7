// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LeetCode API client for fetching submission calendars.
//!
//! LeetCode exposes the calendar through its public GraphQL endpoint as a
//! JSON-encoded string (`"{\"1751760000\": 3, ...}"`), keyed by the UTC
//! midnight of each active day.

use crate::error::{AppError, Result};
use crate::services::calendar::{parse_submission_calendar, RawCalendar};
use crate::services::read_json_response;
use serde::Deserialize;

const CALENDAR_QUERY: &str = r#"query userProfileCalendar($username: String!, $year: Int) {
  matchedUser(username: $username) {
    userCalendar(year: $year) {
      submissionCalendar
    }
  }
}"#;

/// LeetCode GraphQL client.
#[derive(Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl LeetCodeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch a user's submission calendar, optionally restricted to one year.
    pub async fn fetch_calendar(
        &self,
        username: &str,
        year: Option<i32>,
    ) -> Result<RawCalendar> {
        let url = format!("{}/graphql", self.base_url);

        let body = serde_json::json!({
            "operationName": "userProfileCalendar",
            "query": CALENDAR_QUERY,
            "variables": { "username": username, "year": year },
        });

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::REFERER, format!("{}/u/{}/", self.base_url, username))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::PlatformApi(format!("LeetCode request failed: {}", e)))?;

        let payload: GraphQlResponse = read_json_response(response).await?;

        let calendar = payload
            .data
            .and_then(|d| d.matched_user)
            .map(|u| u.user_calendar)
            .ok_or_else(|| {
                let reason = payload
                    .errors
                    .first()
                    .map(|e| e.message.as_str())
                    .unwrap_or("no such user");
                AppError::NotFound(format!("LeetCode user {}: {}", username, reason))
            })?;

        let Some(calendar) = calendar else {
            // Users with no public activity have a null calendar.
            return Ok(RawCalendar::new());
        };

        let submission_calendar = parse_submission_calendar(&calendar.submission_calendar)?;

        tracing::debug!(
            username,
            year = ?year,
            days = submission_calendar.len(),
            "Fetched LeetCode calendar"
        );

        Ok(submission_calendar)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlData {
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    user_calendar: Option<UserCalendar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserCalendar {
    #[serde(default)]
    submission_calendar: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}
