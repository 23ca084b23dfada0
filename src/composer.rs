//! Page composer
//!
//! Lays out the whole board on a single forward-moving vertical cursor:
//!
//! ```text
//! +------------------------------------+  0
//! | 72°            [icon]              |
//! |                Location            |  weather band
//! |                Condition  H:78 L:61|
//! |====================================|  180
//! |        Sunday, October 18          |  date header
//! |------------------------------------|  230
//! | TODAY                              |
//! |   09:00   Team Standup             |  agenda
//! |   - - - - - - - - - - - - - - - -  |
//! | TOMORROW                           |
//! |   ...                              |  height - FOOTER_HEIGHT
//! |------------------------------------|
//! |                    Generated 14:05 |  footer
//! +------------------------------------+
//! ```
//!
//! The agenda is planned first ([`plan_agenda`]) and then painted, so the
//! truncation policy can be checked without looking at pixels. Space is
//! checked before each unit is placed; the composer never shrinks text,
//! wraps or goes back to reflow earlier content.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::canvas::{ink, PixelBuffer};
use crate::font::DEGREE;
use crate::icons::{draw_icon, ICON_SIZE};
use crate::shapes::{dashed_hline, solid_hline};
use crate::text::{draw_centered, draw_left, draw_right_aligned, measure_width, truncate_to_width};
use crate::{CalendarDay, WeatherSnapshot};

// Layout constants. They must keep `height - FOOTER_HEIGHT` below the first
// event row (`AGENDA_TOP + DAY_HEADER_HEIGHT + EVENT_ROW_HEIGHT`) for the
// agenda to show anything; this is not checked at runtime.
pub const MARGIN: i32 = 20;
pub const WEATHER_BAND_HEIGHT: i32 = 180;
pub const DATE_HEADER_HEIGHT: i32 = 50;
pub const AGENDA_TOP: i32 = WEATHER_BAND_HEIGHT + DATE_HEADER_HEIGHT + 10;
pub const DAY_HEADER_HEIGHT: i32 = 32;
pub const EVENT_ROW_HEIGHT: i32 = 30;
pub const MIN_EVENT_HEIGHT: i32 = EVENT_ROW_HEIGHT;
pub const DAY_SEPARATOR_HEIGHT: i32 = 14;
pub const OVERFLOW_ROW_HEIGHT: i32 = 16;
pub const FOOTER_HEIGHT: i32 = 56;
pub const EVENT_INDENT: i32 = 10;
pub const TIME_COLUMN_WIDTH: i32 = 120;
/// Blank space kept between the event time and its title.
pub const TIME_GAP: i32 = 8;

pub const TEXT_SCALE: i32 = 2;
pub const TEMPERATURE_SCALE: i32 = 8;
pub const DEGREE_SCALE: i32 = 3;
pub const OVERFLOW_SCALE: i32 = 1;

const NO_EVENTS: &str = "No events";

/// Forward-only vertical cursor over the agenda area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgendaCursor {
    y: i32,
    max_y: i32,
}

impl AgendaCursor {
    pub fn new(top: i32, max_y: i32) -> Self {
        Self { y: top, max_y }
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Whether a unit `height` pixels tall fits below the cursor.
    pub fn fits(&self, height: i32) -> bool {
        self.y + height <= self.max_y
    }

    /// Move down by `height` and return the row the unit starts on.
    pub fn advance(&mut self, height: i32) -> i32 {
        let start = self.y;
        self.y += height;
        start
    }
}

/// One placed unit of the agenda, with the row it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgendaItem {
    Separator {
        y: i32,
    },
    DayHeader {
        y: i32,
        label: String,
        today: bool,
    },
    NoEvents {
        y: i32,
    },
    Event {
        y: i32,
        time: String,
        title: String,
        /// Light rule under this event; false for the last event of a day
        divider: bool,
    },
    Overflow {
        y: i32,
        remaining: usize,
    },
}

/// Why the agenda stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgendaEnd {
    /// Every day was placed.
    Complete,
    /// A day header did not fit; this many days were dropped silently.
    DaysDropped(usize),
    /// An event did not fit and the `+N more...` marker was placed.
    Overflowed,
}

/// Result of laying out the agenda.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgendaPlan {
    pub items: Vec<AgendaItem>,
    pub end: AgendaEnd,
    /// Cursor position after the last placed unit
    pub end_y: i32,
}

impl AgendaPlan {
    pub fn events_placed(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, AgendaItem::Event { .. }))
            .count()
    }

    pub fn days_placed(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, AgendaItem::DayHeader { .. }))
            .count()
    }

    /// Unplaced events reported by the overflow marker, if any.
    pub fn overflow(&self) -> Option<usize> {
        self.items.iter().find_map(|item| match item {
            AgendaItem::Overflow { remaining, .. } => Some(*remaining),
            _ => None,
        })
    }
}

/// Lay out `days` between `cursor` and its limit.
///
/// Titles are truncated to `title_width` pixels at [`TEXT_SCALE`].
pub fn plan_agenda(days: &[CalendarDay], mut cursor: AgendaCursor, title_width: i32) -> AgendaPlan {
    let mut items = Vec::new();

    for (index, day) in days.iter().enumerate() {
        if index > 0 {
            items.push(AgendaItem::Separator {
                y: cursor.advance(DAY_SEPARATOR_HEIGHT),
            });
        }

        if !cursor.fits(DAY_HEADER_HEIGHT + EVENT_ROW_HEIGHT) {
            return AgendaPlan {
                items,
                end: AgendaEnd::DaysDropped(days.len() - index),
                end_y: cursor.y(),
            };
        }

        items.push(AgendaItem::DayHeader {
            y: cursor.advance(DAY_HEADER_HEIGHT),
            label: day.label.clone(),
            today: day.is_today(),
        });

        if day.events.is_empty() {
            items.push(AgendaItem::NoEvents {
                y: cursor.advance(EVENT_ROW_HEIGHT),
            });
            continue;
        }

        let count = day.events.len();
        for (position, event) in day.events.iter().enumerate() {
            if !cursor.fits(MIN_EVENT_HEIGHT) {
                items.push(AgendaItem::Overflow {
                    y: cursor.advance(OVERFLOW_ROW_HEIGHT),
                    remaining: count - position,
                });
                return AgendaPlan {
                    items,
                    end: AgendaEnd::Overflowed,
                    end_y: cursor.y(),
                };
            }

            items.push(AgendaItem::Event {
                y: cursor.advance(EVENT_ROW_HEIGHT),
                time: truncate_to_width(&event.time, TEXT_SCALE, TIME_COLUMN_WIDTH - TIME_GAP),
                title: truncate_to_width(&event.title, TEXT_SCALE, title_width),
                divider: position + 1 < count,
            });
        }
    }

    AgendaPlan {
        items,
        end: AgendaEnd::Complete,
        end_y: cursor.y(),
    }
}

/// Everything the board shows for one render.
#[derive(Clone, Copy, Debug)]
pub struct Board<'a> {
    pub weather: &'a WeatherSnapshot,
    pub days: &'a [CalendarDay],
    /// Place name shown above the condition
    pub location: &'a str,
    /// Render timestamp, used for the date header and the footer
    pub now: NaiveDateTime,
}

/// A painted page together with the agenda layout that produced it.
#[derive(Clone, Debug)]
pub struct Composition {
    pub buffer: PixelBuffer,
    pub agenda: AgendaPlan,
}

/// Board renderer for a fixed canvas size.
pub struct PageRenderer {
    width: i32,
    height: i32,
    margin: i32,
}

impl PageRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1) as i32,
            height: height.max(1) as i32,
            margin: MARGIN,
        }
    }

    /// Bottom limit of the agenda area.
    pub fn max_content_y(&self) -> i32 {
        self.height - FOOTER_HEIGHT
    }

    /// Left edge of the title column.
    pub fn title_x(&self) -> i32 {
        self.margin + EVENT_INDENT + TIME_COLUMN_WIDTH
    }

    /// Width available to event titles.
    pub fn title_width(&self) -> i32 {
        self.width - self.margin - self.title_x()
    }

    /// Paint the full board into a fresh buffer.
    pub fn render(&self, board: &Board<'_>) -> Composition {
        let mut buffer = PixelBuffer::new(self.width as usize, self.height as usize);

        self.draw_weather_band(&mut buffer, board);
        self.draw_date_header(&mut buffer, board.now);

        let cursor = AgendaCursor::new(AGENDA_TOP, self.max_content_y());
        let agenda = plan_agenda(board.days, cursor, self.title_width());
        self.paint_agenda(&mut buffer, &agenda);
        debug!(
            days = agenda.days_placed(),
            events = agenda.events_placed(),
            end = ?agenda.end,
            "agenda laid out"
        );

        self.draw_footer(&mut buffer, board.now);

        Composition { buffer, agenda }
    }

    fn draw_weather_band(&self, buffer: &mut PixelBuffer, board: &Board<'_>) {
        let weather = board.weather;

        // Big temperature, top left, with a small degree mark
        let temperature = if weather.is_unavailable() {
            "--".to_string()
        } else {
            weather.temperature.to_string()
        };
        let temp_y = 36;
        draw_left(buffer, self.margin, temp_y, &temperature, ink::BLACK, TEMPERATURE_SCALE);
        let degree_x = self.margin + measure_width(&temperature, TEMPERATURE_SCALE);
        draw_left(buffer, degree_x, temp_y, &DEGREE.to_string(), ink::BLACK, DEGREE_SCALE);

        // Icon with the text block beneath it on the right half
        let block_x = self.width / 2 + 10;
        draw_icon(buffer, block_x, 24, weather.condition_code);

        let block_width = self.width - self.margin - block_x;
        let mut line_y = 24 + ICON_SIZE + 12;
        for (line, level) in [
            (board.location.to_string(), ink::BLACK),
            (weather.condition.clone(), ink::BLACK),
            (
                format!("H:{} L:{}", weather.temperature_high, weather.temperature_low),
                ink::GRAY,
            ),
        ] {
            if line.is_empty() {
                continue;
            }
            let line = truncate_to_width(&line, TEXT_SCALE, block_width);
            draw_left(buffer, block_x, line_y, &line, level, TEXT_SCALE);
            line_y += 28;
        }

        solid_hline(
            buffer,
            self.margin,
            self.width - self.margin,
            WEATHER_BAND_HEIGHT - 12,
            4,
            ink::BLACK,
        );
    }

    fn draw_date_header(&self, buffer: &mut PixelBuffer, now: NaiveDateTime) {
        let date = now.format("%A, %B %-d").to_string();
        draw_centered(buffer, WEATHER_BAND_HEIGHT + 12, &date, ink::BLACK, TEXT_SCALE);
        solid_hline(
            buffer,
            self.margin,
            self.width - self.margin,
            WEATHER_BAND_HEIGHT + DATE_HEADER_HEIGHT - 8,
            2,
            ink::BLACK,
        );
    }

    fn paint_agenda(&self, buffer: &mut PixelBuffer, plan: &AgendaPlan) {
        let event_x = self.margin + EVENT_INDENT;
        let right = self.width - self.margin;

        for item in &plan.items {
            match item {
                AgendaItem::Separator { y } => {
                    dashed_hline(
                        buffer,
                        self.margin,
                        right,
                        y + DAY_SEPARATOR_HEIGHT / 2,
                        ink::GRAY,
                        6,
                        4,
                    );
                }
                AgendaItem::DayHeader { y, label, today } => {
                    let level = if *today { ink::BLACK } else { ink::GRAY };
                    draw_left(buffer, self.margin, y + 4, label, level, TEXT_SCALE);
                }
                AgendaItem::NoEvents { y } => {
                    draw_left(buffer, event_x, y + 3, NO_EVENTS, ink::GRAY, TEXT_SCALE);
                }
                AgendaItem::Event {
                    y,
                    time,
                    title,
                    divider,
                } => {
                    draw_left(buffer, event_x, y + 3, time, ink::BLACK, TEXT_SCALE);
                    draw_left(buffer, self.title_x(), y + 3, title, ink::BLACK, TEXT_SCALE);
                    if *divider {
                        solid_hline(buffer, event_x, right, y + EVENT_ROW_HEIGHT - 2, 1, ink::LIGHT);
                    }
                }
                AgendaItem::Overflow { y, remaining } => {
                    let marker = overflow_marker(*remaining);
                    draw_left(buffer, event_x, y + 2, &marker, ink::FAINT, OVERFLOW_SCALE);
                }
            }
        }
    }

    fn draw_footer(&self, buffer: &mut PixelBuffer, now: NaiveDateTime) {
        let rule_y = self.height - 36;
        solid_hline(buffer, self.margin, self.width - self.margin, rule_y, 1, ink::BLACK);
        let stamp = format!("Generated {}", now.format("%H:%M"));
        draw_right_aligned(buffer, rule_y + 8, &stamp, ink::GRAY, TEXT_SCALE, self.margin);
    }
}

/// Text of the overflow marker for `remaining` unplaced events.
pub fn overflow_marker(remaining: usize) -> String {
    format!("+{remaining} more...")
}

/// Paint the board on a `width × height` canvas.
pub fn compose_page(width: usize, height: usize, board: &Board<'_>) -> PixelBuffer {
    PageRenderer::new(width, height).render(board).buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use chrono::NaiveDate;

    fn day(label: &str, events: Vec<Event>) -> CalendarDay {
        CalendarDay {
            label: label.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            events,
        }
    }

    fn events(n: usize) -> Vec<Event> {
        (0..n)
            .map(|i| Event::timed(format!("{:02}:00", i % 24), format!("Event {i}")))
            .collect()
    }

    #[test]
    fn test_cursor_fits_and_advances() {
        let mut cursor = AgendaCursor::new(100, 160);
        assert!(cursor.fits(60));
        assert!(!cursor.fits(61));
        assert_eq!(cursor.advance(30), 100);
        assert_eq!(cursor.y(), 130);
        assert!(!cursor.fits(31));
    }

    #[test]
    fn test_empty_agenda_places_nothing() {
        let plan = plan_agenda(&[], AgendaCursor::new(0, 500), 300);
        assert!(plan.items.is_empty());
        assert_eq!(plan.end, AgendaEnd::Complete);
        assert_eq!(plan.end_y, 0);
    }

    #[test]
    fn test_day_without_events_gets_placeholder() {
        let days = [day("TODAY", vec![])];
        let plan = plan_agenda(&days, AgendaCursor::new(0, 500), 300);
        assert_eq!(
            plan.items,
            vec![
                AgendaItem::DayHeader {
                    y: 0,
                    label: "TODAY".to_string(),
                    today: true
                },
                AgendaItem::NoEvents {
                    y: DAY_HEADER_HEIGHT
                },
            ]
        );
        assert_eq!(plan.end_y, DAY_HEADER_HEIGHT + EVENT_ROW_HEIGHT);
    }

    #[test]
    fn test_separators_only_between_days() {
        let days = [
            day("TODAY", events(1)),
            day("TOMORROW", vec![]),
            day("TUESDAY", events(2)),
        ];
        let plan = plan_agenda(&days, AgendaCursor::new(0, 1000), 300);
        let separators = plan
            .items
            .iter()
            .filter(|i| matches!(i, AgendaItem::Separator { .. }))
            .count();
        assert_eq!(separators, 2);
        assert!(matches!(plan.items[0], AgendaItem::DayHeader { .. }));
        assert_eq!(plan.end, AgendaEnd::Complete);
    }

    #[test]
    fn test_no_divider_after_last_event_of_day() {
        let days = [day("TODAY", events(3))];
        let plan = plan_agenda(&days, AgendaCursor::new(0, 1000), 300);
        let dividers: Vec<bool> = plan
            .items
            .iter()
            .filter_map(|i| match i {
                AgendaItem::Event { divider, .. } => Some(*divider),
                _ => None,
            })
            .collect();
        assert_eq!(dividers, vec![true, true, false]);
    }

    #[test]
    fn test_day_that_cannot_fit_stops_silently() {
        // Room for the first day (header + one event) and nothing else
        let max_y = DAY_HEADER_HEIGHT + EVENT_ROW_HEIGHT + DAY_SEPARATOR_HEIGHT + 10;
        let days = [
            day("TODAY", events(1)),
            day("TOMORROW", events(1)),
            day("TUESDAY", events(1)),
        ];
        let plan = plan_agenda(&days, AgendaCursor::new(0, max_y), 300);
        assert_eq!(plan.days_placed(), 1);
        assert_eq!(plan.end, AgendaEnd::DaysDropped(2));
        assert_eq!(plan.overflow(), None);
    }

    #[test]
    fn test_overflow_mid_day_stops_everything() {
        let max_y = DAY_HEADER_HEIGHT + 3 * EVENT_ROW_HEIGHT + 5;
        let days = [day("TODAY", events(10)), day("TOMORROW", events(2))];
        let plan = plan_agenda(&days, AgendaCursor::new(0, max_y), 300);
        assert_eq!(plan.events_placed(), 3);
        assert_eq!(plan.overflow(), Some(7));
        assert_eq!(plan.end, AgendaEnd::Overflowed);
        assert_eq!(plan.days_placed(), 1);
        assert!(matches!(plan.items.last(), Some(AgendaItem::Overflow { .. })));
    }

    #[test]
    fn test_titles_are_truncated_to_column() {
        let long = "An extremely long meeting title that cannot possibly fit";
        let days = [day("TODAY", vec![Event::timed("10:30", long)])];
        let plan = plan_agenda(&days, AgendaCursor::new(0, 1000), 160);
        match &plan.items[1] {
            AgendaItem::Event { title, .. } => {
                assert!(measure_width(title, TEXT_SCALE) <= 160);
                assert!(title.ends_with("..."));
            }
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[test]
    fn test_times_are_truncated_to_column() {
        let days = [day(
            "TODAY",
            vec![Event::timed("10:00 AM", "Review"), Event::all_day("Holiday")],
        )];
        let plan = plan_agenda(&days, AgendaCursor::new(0, 1000), 300);
        let times: Vec<&str> = plan
            .items
            .iter()
            .filter_map(|i| match i {
                AgendaItem::Event { time, .. } => Some(time.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(times, vec!["10:0...", "All Day"]);
        for time in times {
            assert!(measure_width(time, TEXT_SCALE) <= TIME_COLUMN_WIDTH - TIME_GAP);
        }
    }

    #[test]
    fn test_long_time_stays_out_of_title_column() {
        let weather = WeatherSnapshot {
            temperature: 50,
            temperature_high: 55,
            temperature_low: 45,
            condition: "Clear".to_string(),
            condition_code: 0,
        };
        let days = [day("TODAY", vec![Event::timed("10:00 AM", "")])];
        let board = Board {
            weather: &weather,
            days: &days,
            location: "",
            now: NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        };
        let renderer = PageRenderer::new(480, 800);
        let composition = renderer.render(&board);

        let row_top = AGENDA_TOP + DAY_HEADER_HEIGHT;
        let buffer = &composition.buffer;
        let row_bottom = row_top + EVENT_ROW_HEIGHT;
        let title_x = renderer.title_x();
        assert!(buffer.inked_in(MARGIN + EVENT_INDENT, row_top, title_x, row_bottom) > 0);
        assert_eq!(buffer.inked_in(title_x, row_top, 480, row_bottom), 0);
    }

    #[test]
    fn test_overflow_marker_text() {
        assert_eq!(overflow_marker(43), "+43 more...");
    }

    #[test]
    fn test_title_column_geometry() {
        let renderer = PageRenderer::new(480, 800);
        assert_eq!(renderer.title_x(), 150);
        assert_eq!(renderer.title_width(), 310);
        assert_eq!(renderer.max_content_y(), 744);
        // "All Day" fits in the time column at text scale
        assert!(measure_width(crate::ALL_DAY, TEXT_SCALE) <= TIME_COLUMN_WIDTH);
    }
}
