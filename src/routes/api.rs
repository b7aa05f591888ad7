// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar and platform API routes.
//!
//! Every endpoint takes the timezone policy (`utc` or `local`) explicitly;
//! there is no server-side default.

use crate::error::{AppError, Result};
use crate::models::stats::heatmap_series;
use crate::models::{
    ActivityStats, DailyActivityMap, HeatmapCell, Platform, PolicyKind,
};
use crate::services::codeforces::submission_samples;
use crate::services::{normalize, normalize_samples, parse_submission_calendar, RawCalendar};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

const MAX_USERNAME_LEN: usize = 64;
const MAX_COMBINED_SOURCES: usize = 8;
/// Heatmap length when only one end of the range is given.
const DEFAULT_HEATMAP_DAYS: i64 = 365;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calendar/normalize", post(normalize_calendar))
        .route("/api/calendar/stats", post(calendar_stats))
        .route("/api/calendar/combined", post(combined_stats))
        .route(
            "/api/platforms/{platform}/{username}/calendar",
            get(platform_calendar),
        )
}

// ─── Request Types ───────────────────────────────────────────

/// A submission calendar either as an object or in LeetCode's
/// JSON-encoded string form.
#[derive(Deserialize)]
#[serde(untagged)]
enum CalendarInput {
    Encoded(String),
    Map(RawCalendar),
}

impl CalendarInput {
    fn into_raw(self) -> Result<RawCalendar> {
        match self {
            CalendarInput::Map(raw) => Ok(raw),
            CalendarInput::Encoded(text) => Ok(parse_submission_calendar(&text)?),
        }
    }
}

#[derive(Deserialize)]
struct NormalizeRequest {
    calendar: CalendarInput,
    policy: PolicyKind,
}

/// Optional heatmap range and "today" override shared by stats endpoints.
#[derive(Deserialize, Default)]
struct ViewOptions {
    /// Day the current streak is measured from (defaults to now under
    /// the requested policy)
    today: Option<NaiveDate>,
    /// Heatmap start (inclusive)
    from: Option<NaiveDate>,
    /// Heatmap end (inclusive)
    to: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct StatsRequest {
    calendar: CalendarInput,
    policy: PolicyKind,
    platform: Option<Platform>,
    #[serde(flatten)]
    view: ViewOptions,
}

#[derive(Deserialize)]
struct CombinedSource {
    platform: Platform,
    calendar: CalendarInput,
}

#[derive(Deserialize)]
struct CombinedRequest {
    sources: Vec<CombinedSource>,
    policy: PolicyKind,
    #[serde(flatten)]
    view: ViewOptions,
}

#[derive(Deserialize)]
struct PlatformCalendarQuery {
    policy: PolicyKind,
    /// LeetCode only: restrict to one calendar year
    year: Option<i32>,
    /// Codeforces only: count accepted submissions only
    #[serde(default)]
    accepted_only: bool,
    today: Option<NaiveDate>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl PlatformCalendarQuery {
    fn view(&self) -> ViewOptions {
        ViewOptions {
            today: self.today,
            from: self.from,
            to: self.to,
        }
    }
}

// ─── Response Types ──────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    pub calendar: DailyActivityMap,
    pub stats: ActivityStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Vec<HeatmapCell>>,
}

#[derive(Serialize)]
pub struct CombinedResponse {
    pub calendar: DailyActivityMap,
    pub stats: ActivityStats,
    /// Submission totals per contributing platform
    pub by_platform: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Vec<HeatmapCell>>,
}

// ─── Handlers ────────────────────────────────────────────────

/// Normalize a raw calendar into `YYYY-MM-DD` counts.
async fn normalize_calendar(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<DailyActivityMap>> {
    let policy = req.policy.resolve(state.config.local_utc_offset);
    let raw = req.calendar.into_raw()?;

    let calendar = normalize(&raw, policy)?;

    tracing::debug!(
        %policy,
        entries = raw.len(),
        days = calendar.len(),
        total = calendar.total(),
        "Normalized calendar"
    );

    Ok(Json(calendar))
}

/// Normalize a calendar and compute streaks, totals and an optional heatmap.
async fn calendar_stats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StatsRequest>,
) -> Result<Json<StatsResponse>> {
    let policy = req.policy.resolve(state.config.local_utc_offset);
    let calendar = normalize(&req.calendar.into_raw()?, policy)?;

    build_stats_response(req.platform, calendar, &req.view).map(Json)
}

/// Merge calendars from several platforms and summarize them together.
async fn combined_stats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CombinedRequest>,
) -> Result<Json<CombinedResponse>> {
    if req.sources.is_empty() {
        return Err(AppError::BadRequest(
            "At least one calendar source is required".to_string(),
        ));
    }
    if req.sources.len() > MAX_COMBINED_SOURCES {
        return Err(AppError::BadRequest(format!(
            "Too many calendar sources (max {})",
            MAX_COMBINED_SOURCES
        )));
    }

    let policy = req.policy.resolve(state.config.local_utc_offset);
    let mut combined = DailyActivityMap::new(policy);
    let mut by_platform: BTreeMap<String, u64> = BTreeMap::new();

    for source in req.sources {
        let calendar = normalize(&source.calendar.into_raw()?, policy)?;
        let slot = by_platform
            .entry(source.platform.display_name().to_string())
            .or_insert(0);
        *slot = slot.saturating_add(calendar.total());
        combined.merge(&calendar)?;
    }

    let StatsResponse {
        calendar,
        stats,
        heatmap,
        ..
    } = build_stats_response(None, combined, &req.view)?;

    Ok(Json(CombinedResponse {
        calendar,
        stats,
        by_platform,
        heatmap,
    }))
}

/// Fetch a user's calendar from a platform, normalize and summarize it.
async fn platform_calendar(
    State(state): State<Arc<AppState>>,
    Path((platform, username)): Path<(Platform, String)>,
    Query(params): Query<PlatformCalendarQuery>,
) -> Result<Json<StatsResponse>> {
    validate_username(&username)?;
    let policy = params.policy.resolve(state.config.local_utc_offset);

    tracing::info!(%platform, username = %username, %policy, "Fetching platform calendar");

    let calendar = match platform {
        Platform::LeetCode => {
            let raw = state.leetcode.fetch_calendar(&username, params.year).await?;
            normalize(&raw, policy)?
        }
        Platform::Codeforces => {
            let submissions = state.codeforces.list_submissions(&username).await?;
            normalize_samples(
                submission_samples(&submissions, params.accepted_only)?,
                policy,
            )?
        }
        Platform::HackerRank | Platform::InterviewBit => {
            return Err(AppError::BadRequest(format!(
                "{} calendars cannot be fetched; post them to /api/calendar/stats",
                platform
            )));
        }
    };

    build_stats_response(Some(platform), calendar, &params.view()).map(Json)
}

// ─── Helpers ─────────────────────────────────────────────────

fn build_stats_response(
    platform: Option<Platform>,
    calendar: DailyActivityMap,
    view: &ViewOptions,
) -> Result<StatsResponse> {
    let today = view
        .today
        .unwrap_or_else(|| calendar.policy().date_of(Utc::now()));
    let stats = ActivityStats::from_calendar(&calendar, today);
    let heatmap = heatmap_range(view, today)?
        .map(|(start, end)| heatmap_series(&calendar, start, end))
        .transpose()?;

    Ok(StatsResponse {
        platform,
        calendar,
        stats,
        heatmap,
    })
}

/// Resolve the requested heatmap range. Returns `None` when neither end is
/// given; a single end is widened to a year.
fn heatmap_range(
    view: &ViewOptions,
    today: NaiveDate,
) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let span = Duration::days(DEFAULT_HEATMAP_DAYS - 1);
    let out_of_range =
        || AppError::BadRequest("Heatmap range falls outside the supported dates".to_string());

    let range = match (view.from, view.to) {
        (None, None) => None,
        (Some(from), Some(to)) => Some((from, to)),
        (Some(from), None) => {
            let end = from.checked_add_signed(span).ok_or_else(out_of_range)?;
            Some((from, end.min(today.max(from))))
        }
        (None, Some(to)) => {
            let start = to.checked_sub_signed(span).ok_or_else(out_of_range)?;
            Some((start, to))
        }
    };
    Ok(range)
}

fn validate_username(username: &str) -> Result<()> {
    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if username.is_empty() || username.len() > MAX_USERNAME_LEN || !valid_chars {
        return Err(AppError::BadRequest(format!(
            "Username must be 1-{} characters of letters, digits, '_', '-' or '.'",
            MAX_USERNAME_LEN
        )));
    }
    Ok(())
}
