//! Dashboard view presets and the calendar windows they map to.
//!
//! A preset plus an anchor date identifies a period: the calendar day, month
//! or year containing the anchor. The period exposes both its inclusive date
//! range (for display) and the half-open `[from, to)` datetime window used to
//! query the store. All window arithmetic is in UTC.

use serde::Deserialize;
use time::{Date, Duration, Month, OffsetDateTime, Time};

use crate::endpoints;

/// The query parameters accepted by the dashboard page.
#[derive(Deserialize)]
pub struct PeriodQuery {
    /// The view preset to display.
    pub view: Option<ViewPreset>,
    /// The anchor date that determines the current period.
    pub anchor: Option<Date>,
}

/// How much of the calendar the dashboard summarizes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPreset {
    Daily,
    Monthly,
    Yearly,
}

/// The presets offered by the dashboard's view selector.
pub const ALL_PRESETS: [ViewPreset; 3] = [
    ViewPreset::Daily,
    ViewPreset::Monthly,
    ViewPreset::Yearly,
];

impl ViewPreset {
    pub fn default_preset() -> Self {
        Self::Monthly
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

/// A preset-shaped span of the calendar identified by an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub preset: ViewPreset,
    /// First date of the period, inclusive.
    pub start: Date,
    /// Last date of the period, inclusive.
    pub end: Date,
}

/// The period of the given preset that contains `anchor_date`.
pub fn current_period(preset: ViewPreset, anchor_date: Date) -> Period {
    let (start, end) = match preset {
        ViewPreset::Daily => (anchor_date, anchor_date),
        ViewPreset::Monthly => month_bounds(anchor_date.year(), anchor_date.month()),
        ViewPreset::Yearly => year_bounds(anchor_date.year()),
    };

    Period { preset, start, end }
}

impl Period {
    /// The half-open UTC datetime window `[from, to)` covering this period,
    /// suitable for the store's windowed query.
    pub fn query_window(&self) -> (OffsetDateTime, OffsetDateTime) {
        let from = OffsetDateTime::new_utc(self.start, Time::MIDNIGHT);
        let to = OffsetDateTime::new_utc(self.end + Duration::days(1), Time::MIDNIGHT);

        (from, to)
    }

    /// The period of the same preset immediately before this one.
    pub fn previous(&self) -> Period {
        current_period(self.preset, self.start - Duration::days(1))
    }

    /// The period of the same preset immediately after this one.
    pub fn next(&self) -> Period {
        current_period(self.preset, self.end + Duration::days(1))
    }

    /// A short human-readable label for the period, e.g. "Jan 2024".
    pub fn label(&self) -> String {
        match self.preset {
            ViewPreset::Daily => format!(
                "{} {} {}",
                self.start.day(),
                month_abbrev(self.start.month()),
                self.start.year()
            ),
            ViewPreset::Monthly => {
                format!("{} {}", month_abbrev(self.start.month()), self.start.year())
            }
            ViewPreset::Yearly => self.start.year().to_string(),
        }
    }

    /// The dashboard URL that displays this period.
    pub fn href(&self) -> String {
        format!(
            "{}?{}",
            endpoints::DASHBOARD_VIEW,
            anchor_query(self.preset, self.start)
        )
    }
}

/// The query string selecting `preset` anchored at `anchor`.
pub fn anchor_query(preset: ViewPreset, anchor: Date) -> String {
    format!("view={}&anchor={}", preset.as_query_value(), anchor)
}

fn month_bounds(year: i32, month: Month) -> (Date, Date) {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    (start, end)
}

fn year_bounds(year: i32) -> (Date, Date) {
    let start =
        Date::from_calendar_date(year, Month::January, 1).expect("invalid year start date");
    let end =
        Date::from_calendar_date(year, Month::December, 31).expect("invalid year end date");

    (start, end)
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::{Period, ViewPreset, anchor_query, current_period};

    #[test]
    fn daily_period_is_the_anchor_date() {
        let period = current_period(ViewPreset::Daily, date!(2024 - 01 - 15));

        assert_eq!(period.start, date!(2024 - 01 - 15));
        assert_eq!(period.end, date!(2024 - 01 - 15));
    }

    #[test]
    fn monthly_period_spans_the_calendar_month() {
        let period = current_period(ViewPreset::Monthly, date!(2024 - 01 - 15));

        assert_eq!(period.start, date!(2024 - 01 - 01));
        assert_eq!(period.end, date!(2024 - 01 - 31));
    }

    #[test]
    fn monthly_period_handles_leap_february() {
        let leap = current_period(ViewPreset::Monthly, date!(2024 - 02 - 10));
        assert_eq!(leap.end, date!(2024 - 02 - 29));

        let common = current_period(ViewPreset::Monthly, date!(2023 - 02 - 10));
        assert_eq!(common.end, date!(2023 - 02 - 28));

        let century = current_period(ViewPreset::Monthly, date!(1900 - 02 - 10));
        assert_eq!(century.end, date!(1900 - 02 - 28));

        let quad_century = current_period(ViewPreset::Monthly, date!(2000 - 02 - 10));
        assert_eq!(quad_century.end, date!(2000 - 02 - 29));
    }

    #[test]
    fn yearly_period_spans_the_calendar_year() {
        let period = current_period(ViewPreset::Yearly, date!(2024 - 06 - 15));

        assert_eq!(period.start, date!(2024 - 01 - 01));
        assert_eq!(period.end, date!(2024 - 12 - 31));
    }

    #[test]
    fn query_window_is_half_open_in_utc() {
        let period = current_period(ViewPreset::Monthly, date!(2024 - 01 - 15));

        let (from, to) = period.query_window();

        assert_eq!(from, datetime!(2024-01-01 00:00 UTC));
        assert_eq!(to, datetime!(2024-02-01 00:00 UTC));
    }

    #[test]
    fn previous_and_next_chain_without_gaps() {
        let period = current_period(ViewPreset::Monthly, date!(2024 - 03 - 15));

        let previous = period.previous();
        assert_eq!(previous.start, date!(2024 - 02 - 01));
        assert_eq!(previous.end, date!(2024 - 02 - 29));

        let next = period.next();
        assert_eq!(next.start, date!(2024 - 04 - 01));
        assert_eq!(next.end, date!(2024 - 04 - 30));

        assert_eq!(previous.next(), period);
        assert_eq!(next.previous(), period);
    }

    #[test]
    fn yearly_navigation_crosses_year_boundary() {
        let period = current_period(ViewPreset::Yearly, date!(2024 - 06 - 15));

        assert_eq!(period.previous().start, date!(2023 - 01 - 01));
        assert_eq!(period.next().start, date!(2025 - 01 - 01));
    }

    #[test]
    fn labels_match_preset_granularity() {
        assert_eq!(
            current_period(ViewPreset::Daily, date!(2024 - 01 - 05)).label(),
            "5 Jan 2024"
        );
        assert_eq!(
            current_period(ViewPreset::Monthly, date!(2024 - 01 - 05)).label(),
            "Jan 2024"
        );
        assert_eq!(
            current_period(ViewPreset::Yearly, date!(2024 - 01 - 05)).label(),
            "2024"
        );
    }

    #[test]
    fn anchor_query_round_trips_through_serde() {
        let query = anchor_query(ViewPreset::Monthly, date!(2024 - 01 - 15));
        assert_eq!(query, "view=monthly&anchor=2024-01-15");

        let parsed: super::PeriodQuery = serde_html_form::from_str(&query).unwrap();
        assert_eq!(parsed.view, Some(ViewPreset::Monthly));
        assert_eq!(parsed.anchor, Some(date!(2024 - 01 - 15)));
    }

    #[test]
    fn href_targets_the_dashboard() {
        let period = Period {
            preset: ViewPreset::Daily,
            start: date!(2024 - 01 - 05),
            end: date!(2024 - 01 - 05),
        };

        assert_eq!(period.href(), "/dashboard?view=daily&anchor=2024-01-05");
    }
}
