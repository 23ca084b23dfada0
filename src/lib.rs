//! # Inkboard Core Library
//!
//! This library renders a compact status board (current weather plus a short
//! calendar agenda) into a single grayscale image and encodes it as a minimal
//! bitmap file for an e-ink panel.
//!
//! ## Design Philosophy
//!
//! ### Fixed Budget Rendering
//! - **One owned buffer per render**: a [`canvas::PixelBuffer`] is created, painted
//!   and handed to [`bmp::encode_grayscale`] exactly once
//! - **Deterministic geometry**: every band height and row height is a design
//!   constant in [`composer`]; content never changes the layout grid
//! - **Graceful truncation**: long titles are shortened with an ellipsis and
//!   agenda overflow collapses into a single `+N more...` marker
//!
//! ### Data Flow
//! 1. **Fetch**: weather and calendar adapters run concurrently
//! 2. **Fallback**: any failure is replaced by [`fallback`] data, never an error
//! 3. **Compose**: [`composer::compose_page`] paints the buffer
//! 4. **Encode**: [`bmp::encode_grayscale`] produces the bytes served as `image/bmp`
//!
//! ## Core Types
//!
//! - [`WeatherSnapshot`]: current conditions, already normalized
//! - [`CalendarDay`]: one labelled day with its chronologically ordered [`Event`]s

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod bmp;
pub mod calendar;
pub mod canvas;
pub mod composer;
pub mod config;
pub mod fallback;
pub mod font;
pub mod icons;
pub mod pattern;
pub mod preview;
pub mod shapes;
pub mod text;
pub mod upload;
pub mod weather;


/// Current weather conditions as consumed by the page composer.
///
/// Temperatures are whole degrees Fahrenheit. `condition_code` is a WMO
/// weather code and is the only field the icon library looks at; a negative
/// code is the "unavailable" sentinel and renders the unknown icon.
///
/// # Example
/// ```
/// use inkboard_lib::WeatherSnapshot;
///
/// let clear = WeatherSnapshot {
///     temperature: 72,
///     temperature_high: 78,
///     temperature_low: 61,
///     condition: "Clear".to_string(),
///     condition_code: 0,
/// };
/// assert!(!clear.is_unavailable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current temperature in °F
    pub temperature: i32,
    /// Forecast high for today in °F
    pub temperature_high: i32,
    /// Forecast low for today in °F
    pub temperature_low: i32,
    /// Human readable condition, e.g. "Partly Cloudy"
    pub condition: String,
    /// WMO weather interpretation code
    pub condition_code: i32,
}

impl WeatherSnapshot {
    /// True for the sentinel produced when no provider data could be fetched.
    pub fn is_unavailable(&self) -> bool {
        self.condition_code < 0
    }
}

/// A single agenda entry.
///
/// `time` is already formatted for display ("09:00") or is the literal
/// `"All Day"`. Titles are unbounded; the composer truncates them to fit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub is_all_day: bool,
}

impl Event {
    /// A timed event with a pre-formatted start time.
    pub fn timed(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
            is_all_day: false,
        }
    }

    /// An all-day event; its time column reads "All Day".
    pub fn all_day(title: impl Into<String>) -> Self {
        Self {
            time: ALL_DAY.to_string(),
            title: title.into(),
            is_all_day: true,
        }
    }
}

/// Display string used in the time column of all-day events.
pub const ALL_DAY: &str = "All Day";

/// One day of the agenda.
///
/// Days arrive already sorted by `date`; the composer renders them in the
/// given order and never re-sorts. `date` is informational only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// `TODAY`, `TOMORROW` or an upper-case weekday name
    pub label: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl CalendarDay {
    /// Whether this day is rendered with the emphasised (black) header.
    pub fn is_today(&self) -> bool {
        self.label == TODAY
    }
}

pub const TODAY: &str = "TODAY";
pub const TOMORROW: &str = "TOMORROW";

/// Label for `date` as seen from `today`.
///
/// ```
/// use chrono::NaiveDate;
/// use inkboard_lib::day_label;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// assert_eq!(day_label(today, today), "TODAY");
/// assert_eq!(day_label(today.succ_opt().unwrap(), today), "TOMORROW");
/// assert_eq!(day_label(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(), today), "TUESDAY");
/// ```
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => TODAY.to_string(),
        1 => TOMORROW.to_string(),
        _ => weekday_name(date).to_uppercase(),
    }
}

/// Full English weekday name for `date`.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    use chrono::Weekday;
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
