//! # Offline Fallbacks
//!
//! Data substituted when a provider cannot be reached or is not configured.
//! Both fallbacks are deterministic so a board rendered offline is stable
//! between refreshes:
//!
//! - **Weather**: the "Unavailable" sentinel. Its negative condition code routes
//!   to the unknown icon and the composer prints `--` instead of a temperature.
//! - **Calendar**: a small mock agenda anchored on the render date.

use chrono::{Days, NaiveDateTime};

use crate::{day_label, CalendarDay, Event, WeatherSnapshot};

/// Condition text of the sentinel snapshot.
pub const UNAVAILABLE: &str = "Unavailable";

/// Weather shown when the provider fails.
pub fn unavailable_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 0,
        temperature_high: 0,
        temperature_low: 0,
        condition: UNAVAILABLE.to_string(),
        condition_code: -1,
    }
}

/// Mock agenda of `days` days starting on the date of `now`.
///
/// The first day has two timed events, the second one all-day event and any
/// further day is empty, which exercises every agenda row type.
pub fn mock_agenda(now: NaiveDateTime, days: u32) -> Vec<CalendarDay> {
    let today = now.date();
    (0..days.max(1))
        .filter_map(|offset| {
            let date = today.checked_add_days(Days::new(offset as u64))?;
            let events = match offset {
                0 => vec![
                    Event::timed("09:00", "Team Standup"),
                    Event::timed("13:30", "Design Review"),
                ],
                1 => vec![Event::all_day("Company Offsite")],
                _ => Vec::new(),
            };
            Some(CalendarDay {
                label: day_label(date, today),
                date,
                events,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_unavailable_is_sentinel() {
        let weather = unavailable_weather();
        assert!(weather.is_unavailable());
        assert_eq!(weather.temperature, 0);
        assert_eq!(weather.condition, "Unavailable");
        assert_eq!(weather.condition_code, -1);
    }

    #[test]
    fn test_mock_agenda_is_deterministic() {
        assert_eq!(mock_agenda(noon(), 3), mock_agenda(noon(), 3));
    }

    #[test]
    fn test_mock_agenda_labels_and_order() {
        let days = mock_agenda(noon(), 3);
        let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
        // 2026-10-20 is a Tuesday
        assert_eq!(labels, vec!["TODAY", "TOMORROW", "TUESDAY"]);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));

        assert_eq!(days[0].events.len(), 2);
        assert!(days[1].events[0].is_all_day);
        assert_eq!(days[1].events[0].time, crate::ALL_DAY);
        assert!(days[2].events.is_empty());
    }

    #[test]
    fn test_mock_agenda_has_at_least_one_day() {
        assert_eq!(mock_agenda(noon(), 0).len(), 1);
    }
}
