// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar;
pub mod platform;
pub mod stats;

pub use calendar::{ActivitySample, DailyActivityMap, PolicyKind, TimezonePolicy};
pub use platform::Platform;
pub use stats::{ActivityStats, HeatmapCell};
