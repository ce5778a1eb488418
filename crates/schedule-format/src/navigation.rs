//! View granularity, prev/next stepping and the callback payloads carried by navigation buttons.

use campus_core::DateRange;
use chrono::{Datelike, Days, Months, NaiveDate};

/// Callback payload prefix of schedule navigation buttons.
pub const VIEW_CALLBACK_PREFIX: &str = "view:";

/// Which slice of the calendar a view shows. Week and month carry a normalized anchor
/// (the Monday and the first of the month respectively), built via [`ViewMode::week_of`] / [`ViewMode::month_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Day(NaiveDate),
    Week(NaiveDate),
    Month(NaiveDate),
}

impl ViewMode {
    pub fn day(date: NaiveDate) -> Self {
        ViewMode::Day(date)
    }

    /// Week containing `date`; weeks start on Monday.
    pub fn week_of(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as u64;
        ViewMode::Week(date.checked_sub_days(Days::new(offset)).unwrap_or(date))
    }

    /// Month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        ViewMode::Month(date.with_day(1).unwrap_or(date))
    }

    /// Anchor date: the day, the week's Monday, or the month's first day.
    pub fn anchor(&self) -> NaiveDate {
        match *self {
            ViewMode::Day(d) | ViewMode::Week(d) | ViewMode::Month(d) => d,
        }
    }

    /// Calendar dates covered by the view, inclusive.
    pub fn range(&self) -> DateRange {
        match *self {
            ViewMode::Day(d) => DateRange::day(d),
            ViewMode::Week(monday) => DateRange::new(monday, week_end(monday)),
            ViewMode::Month(first) => {
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(first);
                DateRange::new(first, last)
            }
        }
    }

    pub fn previous(&self) -> Self {
        match *self {
            ViewMode::Day(d) => ViewMode::Day(d.pred_opt().unwrap_or(d)),
            ViewMode::Week(monday) => {
                ViewMode::Week(monday.checked_sub_days(Days::new(7)).unwrap_or(monday))
            }
            ViewMode::Month(first) => {
                ViewMode::Month(first.checked_sub_months(Months::new(1)).unwrap_or(first))
            }
        }
    }

    pub fn next(&self) -> Self {
        match *self {
            ViewMode::Day(d) => ViewMode::Day(d.succ_opt().unwrap_or(d)),
            ViewMode::Week(monday) => {
                ViewMode::Week(monday.checked_add_days(Days::new(7)).unwrap_or(monday))
            }
            ViewMode::Month(first) => {
                ViewMode::Month(first.checked_add_months(Months::new(1)).unwrap_or(first))
            }
        }
    }

    /// `view:d:2025-09-01`, `view:w:2025-09-01`, `view:m:2025-09`.
    pub fn callback_data(&self) -> String {
        match *self {
            ViewMode::Day(d) => format!("{}d:{}", VIEW_CALLBACK_PREFIX, d.format("%Y-%m-%d")),
            ViewMode::Week(d) => format!("{}w:{}", VIEW_CALLBACK_PREFIX, d.format("%Y-%m-%d")),
            ViewMode::Month(d) => format!("{}m:{}", VIEW_CALLBACK_PREFIX, d.format("%Y-%m")),
        }
    }

    /// Inverse of [`callback_data`](Self::callback_data). Week/month anchors are re-normalized.
    pub fn parse_callback(data: &str) -> Option<Self> {
        let rest = data.strip_prefix(VIEW_CALLBACK_PREFIX)?;
        let (kind, value) = rest.split_once(':')?;
        match kind {
            "d" => parse_date(value).map(ViewMode::Day),
            "w" => parse_date(value).map(ViewMode::week_of),
            "m" => parse_month(value).map(ViewMode::Month),
            _ => None,
        }
    }
}

/// Sunday of the week starting at `monday`; the last representable date when the week runs past it.
pub fn week_end(monday: NaiveDate) -> NaiveDate {
    monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

/// `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM` → first day of that month.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()
}
