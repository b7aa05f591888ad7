// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard statistics derived from a normalized activity calendar.
//!
//! These are computed per request from a [`DailyActivityMap`] and never
//! stored.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::models::DailyActivityMap;
use crate::time_utils::format_date_key;

/// Longest range a heatmap may span (a little over two years).
pub const MAX_HEATMAP_DAYS: i64 = 800;

/// Summary statistics for a user's submission calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    // ─── Totals ──────────────────────────────────────────────────
    /// Sum of submissions across all days
    pub total_submissions: u64,
    /// Days with at least one submission
    pub active_days: u32,

    // ─── Streaks ─────────────────────────────────────────────────
    /// Consecutive active days ending today (or yesterday, if today is
    /// still empty)
    pub current_streak: u32,
    /// Longest run of consecutive active days
    pub longest_streak: u32,

    // ─── Notable Days ────────────────────────────────────────────
    /// First day with activity ("YYYY-MM-DD")
    pub first_active: Option<String>,
    /// Most recent day with activity ("YYYY-MM-DD")
    pub last_active: Option<String>,
    /// Day with the most submissions (earliest on ties)
    pub busiest_day: Option<HeatmapCell>,

    // ─── Time Series ─────────────────────────────────────────────
    /// Submissions per month ("YYYY-MM" format)
    pub submissions_by_month: BTreeMap<String, u64>,
    /// Submissions per year ("YYYY" format)
    pub submissions_by_year: BTreeMap<String, u64>,
}

/// One day of a heatmap series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: String,
    pub count: u64,
}

impl ActivityStats {
    /// Compute stats for `calendar` as seen on `today` (a date in the
    /// calendar's own policy).
    pub fn from_calendar(calendar: &DailyActivityMap, today: NaiveDate) -> Self {
        let mut stats = Self {
            total_submissions: calendar.total(),
            ..Self::default()
        };

        let mut longest = 0u32;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        let mut busiest: Option<(NaiveDate, u64)> = None;

        for (&date, &count) in calendar.days() {
            if count == 0 {
                continue;
            }

            stats.active_days += 1;

            run = match prev {
                Some(p) if p.succ_opt() == Some(date) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            prev = Some(date);

            if busiest.map_or(true, |(_, best)| count > best) {
                busiest = Some((date, count));
            }

            *stats
                .submissions_by_month
                .entry(format!("{:04}-{:02}", date.year(), date.month()))
                .or_insert(0) += count;
            *stats
                .submissions_by_year
                .entry(format!("{:04}", date.year()))
                .or_insert(0) += count;

            if stats.first_active.is_none() {
                stats.first_active = Some(format_date_key(date));
            }
        }

        stats.longest_streak = longest;
        stats.last_active = prev.map(format_date_key);
        stats.busiest_day = busiest.map(|(date, count)| HeatmapCell {
            date: format_date_key(date),
            count,
        });
        stats.current_streak = current_streak(calendar, today);
        stats
    }
}

/// Consecutive active days ending on `today`, or on the day before when
/// nothing has been submitted yet today.
fn current_streak(calendar: &DailyActivityMap, today: NaiveDate) -> u32 {
    let mut cursor = if calendar.get(today) > 0 {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(date) = cursor {
        if calendar.get(date) == 0 {
            break;
        }
        streak += 1;
        cursor = date.pred_opt();
    }
    streak
}

/// Dense, date-ordered cells for every day in `[start, end]`, zero-filled.
pub fn heatmap_series(
    calendar: &DailyActivityMap,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<HeatmapCell>> {
    if start > end {
        return Err(AppError::BadRequest(
            "Heatmap start must not be after end".to_string(),
        ));
    }
    let span = (end - start).num_days() + 1;
    if span > MAX_HEATMAP_DAYS {
        return Err(AppError::BadRequest(format!(
            "Heatmap range too large: {} days (max {})",
            span, MAX_HEATMAP_DAYS
        )));
    }

    Ok(start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| HeatmapCell {
            date: format_date_key(date),
            count: calendar.get(date),
        })
        .collect())
}
