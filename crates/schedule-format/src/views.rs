//! Day, week and month schedule views.
//!
//! Input order is preserved within a day (the store already returns entries by start time);
//! only the month view re-sorts a day's entries by their time label.
//! The viewer's role decides the "who" line: teachers see the group, everyone else the teacher.

use std::collections::BTreeMap;

use campus_core::{InlineButton, InlineKeyboard, OutgoingMessage, Role, Schedule};
use chrono::{Datelike, Days, NaiveDate};

use crate::labels::{
    date_label, duration_label, escape_html, month_name, time_label, weekday_header,
    weekday_name, weekday_short,
};
use crate::navigation::{week_end, ViewMode};

const NO_CLASSES: &str = "Занятий нет";

/// Rendered schedule view: HTML text plus the neighbouring views for navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub mode: ViewMode,
    pub text: String,
    pub previous: ViewMode,
    pub next: ViewMode,
}

impl RenderedView {
    fn new(mode: ViewMode, text: String) -> Self {
        Self {
            mode,
            text,
            previous: mode.previous(),
            next: mode.next(),
        }
    }

    /// `◀` / `▶` buttons carrying the neighbouring views.
    pub fn keyboard(&self) -> InlineKeyboard {
        InlineKeyboard::new().row(vec![
            InlineButton::new("◀", self.previous.callback_data()),
            InlineButton::new("▶", self.next.callback_data()),
        ])
    }

    pub fn to_message(&self) -> OutgoingMessage {
        OutgoingMessage::text(self.text.clone())
            .with_keyboard(self.keyboard())
            .html()
    }
}

/// Renders `entries` for the given view. Entries outside the view's range are ignored.
pub fn render(entries: &[Schedule], mode: ViewMode, role: Role) -> RenderedView {
    match mode {
        ViewMode::Day(date) => day_view(entries, date, role),
        ViewMode::Week(date) => week_view(entries, date, role),
        ViewMode::Month(date) => month_view(entries, date, role),
    }
}

fn who(entry: &Schedule, role: Role) -> String {
    match role {
        Role::Teacher => format!("👥 {}", escape_html(&entry.group_name)),
        Role::Student | Role::Admin => format!("👤 {}", escape_html(entry.teacher_label())),
    }
}

fn time_span(entry: &Schedule) -> String {
    format!("{}–{}", time_label(entry.start), time_label(entry.end()))
}

fn entries_on(entries: &[Schedule], date: NaiveDate) -> Vec<&Schedule> {
    entries.iter().filter(|e| e.date() == date).collect()
}

/// Single day: numbered entries with end time, room, type and a count/duration summary.
pub fn day_view(entries: &[Schedule], date: NaiveDate, role: Role) -> RenderedView {
    let day = entries_on(entries, date);
    let mut text = format!("<b>📅 {}, {}</b>\n\n", weekday_name(date), date_label(date));

    if day.is_empty() {
        text.push_str(NO_CLASSES);
        return RenderedView::new(ViewMode::Day(date), text);
    }

    for (n, entry) in day.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} <b>{}</b>\n   {} · ауд. {}\n   {}\n",
            n + 1,
            time_span(entry),
            escape_html(&entry.course_name),
            entry.lesson_type.label(),
            escape_html(&entry.room),
            who(entry, role),
        ));
        if !entry.description.is_empty() {
            text.push_str(&format!("   <i>{}</i>\n", escape_html(&entry.description)));
        }
    }

    let total: i64 = day.iter().map(|e| e.duration_minutes).sum();
    text.push_str(&format!(
        "\nЗанятий: {}, всего {}",
        day.len(),
        duration_label(total)
    ));
    RenderedView::new(ViewMode::Day(date), text)
}

/// The seven days (Monday first) of the week containing `reference`, each with its entries or a "no classes" line.
pub fn week_view(entries: &[Schedule], reference: NaiveDate, role: Role) -> RenderedView {
    let mode = ViewMode::week_of(reference);
    let monday = mode.anchor();
    let sunday = week_end(monday);
    let mut text = format!(
        "<b>🗓 Неделя {} – {}</b>\n",
        date_label(monday),
        date_label(sunday)
    );

    for offset in 0..7 {
        let Some(date) = monday.checked_add_days(Days::new(offset)) else {
            break;
        };
        text.push_str(&format!(
            "\n<b>{}, {}</b>\n",
            weekday_name(date),
            date.format("%d.%m")
        ));
        let day = entries_on(entries, date);
        if day.is_empty() {
            text.push_str(NO_CLASSES);
            text.push('\n');
            continue;
        }
        for entry in day {
            text.push_str(&format!(
                "• {} {} ({}, ауд. {}) {}\n",
                time_span(entry),
                escape_html(&entry.course_name),
                entry.lesson_type.label(),
                escape_html(&entry.room),
                who(entry, role),
            ));
        }
    }
    RenderedView::new(mode, text)
}

/// Monday-first calendar grid with event days marked `*`, then every event day in date order
/// with its entries sorted by time of day.
pub fn month_view(entries: &[Schedule], reference: NaiveDate, role: Role) -> RenderedView {
    let mode = ViewMode::month_of(reference);
    let range = mode.range();
    let first = range.start;

    let mut by_day: BTreeMap<NaiveDate, Vec<&Schedule>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| range.contains(e.date())) {
        by_day.entry(entry.date()).or_default().push(entry);
    }

    let mut text = format!("<b>📆 {} {}</b>\n<pre>", month_name(first), first.year());
    text.push_str(&calendar_grid(first, range.end, |d| by_day.contains_key(&d)));
    text.push_str("</pre>\n");

    if by_day.is_empty() {
        text.push('\n');
        text.push_str(NO_CLASSES);
        return RenderedView::new(mode, text);
    }

    for (date, mut day) in by_day {
        day.sort_by_key(|e| time_label(e.start));
        text.push_str(&format!(
            "\n<b>{} {}</b>\n",
            date.format("%d.%m"),
            weekday_short(date)
        ));
        for entry in day {
            text.push_str(&format!(
                "• {} {} ({}, ауд. {}) {}\n",
                time_span(entry),
                escape_html(&entry.course_name),
                entry.lesson_type.label(),
                escape_html(&entry.room),
                who(entry, role),
            ));
        }
    }
    RenderedView::new(mode, text)
}

/// Fixed-width grid: 3-character cells (`dd` + marker) separated by one space.
fn calendar_grid(first: NaiveDate, last: NaiveDate, marked: impl Fn(NaiveDate) -> bool) -> String {
    let mut grid = weekday_header()
        .iter()
        .map(|name| format!("{:<3}", name))
        .collect::<Vec<_>>()
        .join(" ");
    grid.push('\n');

    let mut cells: Vec<String> =
        vec!["   ".to_string(); first.weekday().num_days_from_monday() as usize];
    let mut date = first;
    while date <= last {
        let mark = if marked(date) { '*' } else { ' ' };
        cells.push(format!("{:>2}{}", date.day(), mark));
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let rows: Vec<String> = cells
        .chunks(7)
        .map(|week| week.join(" ").trim_end().to_string())
        .collect();
    grid.push_str(&rows.join("\n"));
    grid
}
