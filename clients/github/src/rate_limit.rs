use chrono::{DateTime, TimeZone, Utc};
use derive_more::Constructor;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use std::str::FromStr;

/// Quota reported in the `x-ratelimit-*` headers of every API response.
#[derive(Constructor, Debug, PartialEq, Eq, Clone, Copy)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    /// Unix timestamp in seconds.
    pub reset: i64,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap<HeaderValue>) -> Option<RateLimit> {
        Some(RateLimit {
            limit: read_header(headers, "x-ratelimit-limit")?,
            remaining: read_header(headers, "x-ratelimit-remaining")?,
            reset: read_header(headers, "x-ratelimit-reset")?,
        })
    }

    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.reset, 0).single()
    }
}

/// Reset time of an exhausted quota. Only needs the reset header.
pub fn reset_at(headers: &HeaderMap<HeaderValue>) -> Option<DateTime<Utc>> {
    read_header::<i64>(headers, "x-ratelimit-reset").and_then(|reset| Utc.timestamp_opt(reset, 0).single())
}

fn read_header<T: FromStr>(headers: &HeaderMap<HeaderValue>, header: &str) -> Option<T> {
    headers.get(header)?.to_str().ok()?.trim().parse::<T>().ok()
}

#[test]
fn from_headers_test() -> Result<(), reqwest::header::InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    assert_eq!(RateLimit::from_headers(&headers), None);

    headers.insert("x-ratelimit-limit", HeaderValue::from_str("60")?);
    headers.insert("x-ratelimit-remaining", HeaderValue::from_str("0")?);
    headers.insert("x-ratelimit-reset", HeaderValue::from_str("1714566600")?);
    let limit = RateLimit::from_headers(&headers);
    assert_eq!(limit, Some(RateLimit::new(60, 0, 1714566600)));
    assert_eq!(
        limit.and_then(|limit| limit.reset_at()).map(|at| at.to_rfc3339()),
        Some("2024-05-01T12:30:00+00:00".to_string())
    );

    headers.insert("x-ratelimit-remaining", HeaderValue::from_str("many")?);
    assert_eq!(RateLimit::from_headers(&headers), None, "Unparsable header is ignored");
    assert!(reset_at(&headers).is_some(), "Reset time does not need the other headers");

    Ok(())
}
