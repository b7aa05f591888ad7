// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! CodeTrail: coding-practice activity across competitive-programming sites
//!
//! This crate normalizes the submission calendars that LeetCode, Codeforces
//! and friends report into per-day counts under an explicit timezone
//! policy, and serves streak and heatmap statistics built on top of them.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{CodeforcesClient, LeetCodeClient};
use std::time::Duration;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub leetcode: LeetCodeClient,
    pub codeforces: CodeforcesClient,
}

impl AppState {
    /// Build platform clients from configuration, sharing one HTTP pool.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!("codetrail/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            leetcode: LeetCodeClient::new(http.clone(), config.leetcode_base_url.clone()),
            codeforces: CodeforcesClient::new(http, config.codeforces_base_url.clone()),
            config,
        })
    }
}
