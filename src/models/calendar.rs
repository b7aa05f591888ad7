// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Submission calendar models.
//!
//! A platform hands us a sparse "epoch seconds -> submissions" record. Once
//! normalized it becomes a [`DailyActivityMap`] keyed by calendar day under
//! an explicit [`TimezonePolicy`].

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::CalendarError;
use crate::time_utils::{format_date_key, format_utc_offset};

/// One external record of "`count` submissions on the day starting at
/// `epoch_seconds`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySample {
    pub epoch_seconds: u64,
    pub count: u64,
}

/// Policy name as accepted on the wire (`"utc"` / `"local"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Utc,
    Local,
}

impl PolicyKind {
    /// Bind the policy name to a concrete offset. `local` uses the
    /// configured process offset; `utc` ignores it.
    pub fn resolve(self, local_offset: FixedOffset) -> TimezonePolicy {
        match self {
            PolicyKind::Utc => TimezonePolicy::Utc,
            PolicyKind::Local => TimezonePolicy::Local(local_offset),
        }
    }
}

/// Which calendar a timestamp is truncated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimezonePolicy {
    /// Truncate to the UTC day boundary.
    Utc,
    /// Truncate to the day boundary of a fixed local offset.
    Local(FixedOffset),
}

impl TimezonePolicy {
    pub fn kind(&self) -> PolicyKind {
        match self {
            TimezonePolicy::Utc => PolicyKind::Utc,
            TimezonePolicy::Local(_) => PolicyKind::Local,
        }
    }

    /// Offset applied by this policy (zero for UTC).
    pub fn offset(&self) -> FixedOffset {
        match self {
            TimezonePolicy::Utc => Utc.fix(),
            TimezonePolicy::Local(offset) => *offset,
        }
    }

    /// Calendar day an instant falls on under this policy.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            TimezonePolicy::Utc => instant.date_naive(),
            TimezonePolicy::Local(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}

impl std::fmt::Display for TimezonePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimezonePolicy::Utc => write!(f, "utc"),
            TimezonePolicy::Local(offset) => write!(f, "local({})", format_utc_offset(*offset)),
        }
    }
}

impl Serialize for TimezonePolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr {
            kind: PolicyKind,
            utc_offset: String,
        }

        Repr {
            kind: self.kind(),
            utc_offset: format_utc_offset(self.offset()),
        }
        .serialize(serializer)
    }
}

/// Submission counts per calendar day.
///
/// Keys are unique days; adding to an existing day sums the counts. The
/// running total always equals the sum of all per-day counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivityMap {
    policy: TimezonePolicy,
    /// Serialized as `"YYYY-MM-DD": count`.
    days: BTreeMap<NaiveDate, u64>,
    #[serde(rename = "total_submissions")]
    total: u64,
}

impl DailyActivityMap {
    pub fn new(policy: TimezonePolicy) -> Self {
        Self {
            policy,
            days: BTreeMap::new(),
            total: 0,
        }
    }

    pub fn policy(&self) -> TimezonePolicy {
        self.policy
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, u64> {
        &self.days
    }

    /// Count recorded for `date` (0 if absent).
    pub fn get(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Add `count` submissions to `date`, summing on collision.
    pub fn add(&mut self, date: NaiveDate, count: u64) -> Result<(), CalendarError> {
        let overflow = || CalendarError::CountOverflow {
            date: format_date_key(date),
        };

        let total = self.total.checked_add(count).ok_or_else(overflow)?;
        let slot = self.days.entry(date).or_insert(0);
        *slot = slot.checked_add(count).ok_or_else(overflow)?;
        self.total = total;
        Ok(())
    }

    /// Fold another calendar into this one. Both must have been normalized
    /// under the same policy; on error `self` is left untouched.
    pub fn merge(&mut self, other: &DailyActivityMap) -> Result<(), CalendarError> {
        if self.policy != other.policy {
            return Err(CalendarError::PolicyMismatch {
                left: self.policy.to_string(),
                right: other.policy.to_string(),
            });
        }

        let mut merged = self.clone();
        for (&date, &count) in &other.days {
            merged.add(date, count)?;
        }
        *self = merged;
        Ok(())
    }

    /// Days rendered as canonical `YYYY-MM-DD` keys.
    pub fn to_date_keys(&self) -> BTreeMap<String, u64> {
        self.days
            .iter()
            .map(|(&date, &count)| (format_date_key(date), count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_sums_on_collision() {
        let mut map = DailyActivityMap::new(TimezonePolicy::Utc);
        map.add(day(2025, 7, 6), 3).unwrap();
        map.add(day(2025, 7, 6), 2).unwrap();
        map.add(day(2025, 7, 7), 1).unwrap();

        assert_eq!(map.get(day(2025, 7, 6)), 5);
        assert_eq!(map.get(day(2025, 7, 8)), 0);
        assert_eq!(map.total(), 6);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_add_overflow_leaves_map_untouched() {
        let mut map = DailyActivityMap::new(TimezonePolicy::Utc);
        map.add(day(2025, 1, 1), u64::MAX).unwrap();

        let err = map.add(day(2025, 1, 2), 1).unwrap_err();
        assert_eq!(
            err,
            CalendarError::CountOverflow {
                date: "2025-01-02".to_string()
            }
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.total(), u64::MAX);
    }

    #[test]
    fn test_merge_requires_same_policy() {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        let mut utc = DailyActivityMap::new(TimezonePolicy::Utc);
        let local = DailyActivityMap::new(TimezonePolicy::Local(ist));

        let err = utc.merge(&local).unwrap_err();
        assert_eq!(err.kind(), "policy_mismatch");
        assert!(err.to_string().contains("local(+05:30)"));
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut leetcode = DailyActivityMap::new(TimezonePolicy::Utc);
        leetcode.add(day(2025, 3, 1), 4).unwrap();
        let mut codeforces = DailyActivityMap::new(TimezonePolicy::Utc);
        codeforces.add(day(2025, 3, 1), 1).unwrap();
        codeforces.add(day(2025, 3, 2), 2).unwrap();

        leetcode.merge(&codeforces).unwrap();

        assert_eq!(leetcode.get(day(2025, 3, 1)), 5);
        assert_eq!(leetcode.get(day(2025, 3, 2)), 2);
        assert_eq!(leetcode.total(), 7);
    }

    #[test]
    fn test_serializes_date_keys_and_policy() {
        let pst = FixedOffset::west_opt(8 * 3600).unwrap();
        let mut map = DailyActivityMap::new(TimezonePolicy::Local(pst));
        map.add(day(2025, 7, 5), 3).unwrap();

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["days"]["2025-07-05"], 3);
        assert_eq!(json["total_submissions"], 3);
        assert_eq!(json["policy"]["kind"], "local");
        assert_eq!(json["policy"]["utc_offset"], "-08:00");
    }

    #[test]
    fn test_policy_resolve() {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        assert_eq!(PolicyKind::Utc.resolve(ist), TimezonePolicy::Utc);
        assert_eq!(PolicyKind::Local.resolve(ist), TimezonePolicy::Local(ist));
        assert_eq!(TimezonePolicy::Utc.offset().local_minus_utc(), 0);
    }
}
