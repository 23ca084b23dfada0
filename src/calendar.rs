//! # Calendar Adapter
//!
//! Loads the multi-day agenda from a JSON endpoint. The endpoint returns the
//! days in display order:
//!
//! ```json
//! [
//!   {"label": "TODAY", "date": "2026-10-18",
//!    "events": [{"time": "09:00", "title": "Standup", "is_all_day": false}]}
//! ]
//! ```
//!
//! `events` and `is_all_day` may be omitted. Labels are taken as given.

use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::CalendarConfig;
use crate::CalendarDay;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while loading the agenda.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// HTTP request failed or the body was not a valid agenda
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No endpoint configured
    #[error("no calendar url configured")]
    NotConfigured,
}

/// Fetch the agenda from the configured endpoint.
pub async fn fetch(config: &CalendarConfig) -> Result<Vec<CalendarDay>, CalendarError> {
    let url = config.url.as_deref().ok_or(CalendarError::NotConfigured)?;

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let days: Vec<CalendarDay> = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    debug!(days = days.len(), "agenda fetched");
    Ok(days)
}
