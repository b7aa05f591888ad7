// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coding platforms whose activity we track.

use serde::{Deserialize, Serialize};

/// Competitive-programming platform a calendar was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LeetCode,
    Codeforces,
    HackerRank,
    InterviewBit,
}

impl Platform {
    /// Human-readable name for dashboards and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::HackerRank => "HackerRank",
            Platform::InterviewBit => "InterviewBit",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_wire_names() {
        assert_eq!(serde_json::to_value(Platform::LeetCode).unwrap(), "leetcode");
        assert_eq!(
            serde_json::from_value::<Platform>(serde_json::json!("interviewbit")).unwrap(),
            Platform::InterviewBit
        );
        assert_eq!(Platform::Codeforces.to_string(), "Codeforces");
    }
}
