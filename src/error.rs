// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors produced while turning a raw submission calendar into dated counts.
///
/// Normalization is all-or-nothing: any of these aborts the whole call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Malformed calendar key {key:?}: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    #[error("Malformed count for calendar key {key:?}: {value}")]
    MalformedValue { key: String, value: String },

    #[error("Malformed submission calendar: {0}")]
    MalformedCalendar(String),

    #[error("Submission count overflow on {date}")]
    CountOverflow { date: String },

    #[error("Cannot merge calendars normalized under different policies ({left} vs {right})")]
    PolicyMismatch { left: String, right: String },
}

impl CalendarError {
    /// Stable machine-readable discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            CalendarError::MalformedKey { .. } => "malformed_key",
            CalendarError::MalformedValue { .. } => "malformed_value",
            CalendarError::MalformedCalendar(_) => "malformed_calendar",
            CalendarError::CountOverflow { .. } => "count_overflow",
            CalendarError::PolicyMismatch { .. } => "policy_mismatch",
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Platform API error: {0}")]
    PlatformApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message used when an upstream platform answers 429.
    pub const PLATFORM_RATE_LIMIT: &'static str = "Rate limit exceeded";

    /// Stable machine-readable discriminator, also used as the `error` field
    /// of JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Calendar(err) => err.kind(),
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::PlatformApi(_) => "platform_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Check if this error is an upstream rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::PlatformApi(msg) if msg == Self::PLATFORM_RATE_LIMIT)
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Calendar(CalendarError::CountOverflow { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Calendar(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PlatformApi(_) if self.is_rate_limited() => StatusCode::TOO_MANY_REQUESTS,
            AppError::PlatformApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                None
            }
            AppError::PlatformApi(msg) => {
                tracing::warn!(error = %msg, "Platform API error");
                Some(msg.clone())
            }
            AppError::Calendar(err) => Some(err.to_string()),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => Some(msg.clone()),
        };

        let body = ErrorResponse {
            error: self.kind().to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
