//! Calendar labels and escaping for HTML parse mode.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

const WEEKDAYS: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

const WEEKDAYS_SHORT: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

const MONTHS: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

pub fn weekday_short(date: NaiveDate) -> &'static str {
    WEEKDAYS_SHORT[date.weekday().num_days_from_monday() as usize]
}

pub fn weekday_header() -> &'static [&'static str; 7] {
    &WEEKDAYS_SHORT
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `HH:MM`
pub fn time_label(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// `DD.MM.YYYY`
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `3 ч 15 мин`, or `45 мин` under an hour.
pub fn duration_label(minutes: i64) -> String {
    let minutes = minutes.max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} мин", m),
        (h, 0) => format!("{} ч", h),
        (h, m) => format!("{} ч {:02} мин", h, m),
    }
}

/// Escapes the characters Telegram's HTML mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_and_month_names() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(weekday_name(date), "Понедельник");
        assert_eq!(weekday_short(date), "Пн");
        assert_eq!(month_name(date), "Сентябрь");
        assert_eq!(date_label(date), "01.09.2025");
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(duration_label(45), "45 мин");
        assert_eq!(duration_label(120), "2 ч");
        assert_eq!(duration_label(195), "3 ч 15 мин");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("C++ <intro> & more"), "C++ &lt;intro&gt; &amp; more");
    }
}
