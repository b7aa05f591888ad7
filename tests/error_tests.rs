// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use codetrail::error::{AppError, CalendarError};

#[test]
fn test_kind_discriminators() {
    let err = AppError::from(CalendarError::MalformedKey {
        key: "abc".to_string(),
        reason: "expected non-negative base-10 epoch seconds",
    });
    assert_eq!(err.kind(), "malformed_key");

    let err = AppError::from(CalendarError::MalformedValue {
        key: "1751760000".to_string(),
        value: "-1".to_string(),
    });
    assert_eq!(err.kind(), "malformed_value");

    assert_eq!(AppError::NotFound("x".to_string()).kind(), "not_found");
    assert_eq!(AppError::PlatformApi("x".to_string()).kind(), "platform_error");
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("x")).kind(),
        "internal_error"
    );
}

#[test]
fn test_is_rate_limited() {
    let err = AppError::PlatformApi(AppError::PLATFORM_RATE_LIMIT.to_string());
    assert!(err.is_rate_limited());

    let err = AppError::PlatformApi("HTTP 500: boom".to_string());
    assert!(!err.is_rate_limited());

    let err = AppError::BadRequest(AppError::PLATFORM_RATE_LIMIT.to_string());
    assert!(!err.is_rate_limited());
}

#[test]
fn test_status_codes() {
    let cases = [
        (
            AppError::from(CalendarError::MalformedCalendar("eof".to_string())),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::from(CalendarError::CountOverflow {
                date: "2025-07-06".to_string(),
            }),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (AppError::NotFound("u".to_string()), StatusCode::NOT_FOUND),
        (
            AppError::PlatformApi("HTTP 500".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (
            AppError::PlatformApi(AppError::PLATFORM_RATE_LIMIT.to_string()),
            StatusCode::TOO_MANY_REQUESTS,
        ),
        (
            AppError::Internal(anyhow::anyhow!("oops")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}
