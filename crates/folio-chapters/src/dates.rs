// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Date extraction from OCR'd page text.
//
// Two pattern families are recognised:
//
// - month-name dates ("March 12, 2002", "Mar. 12th 2002"), used to group
//   letters by year; the day is not validated.
// - long dates with an optional leading weekday ("Tuesday, March 12, 2002"),
//   used to group journal entries by month; the span must be a real
//   calendar date.
//
// Matching is case-insensitive and scans the whole page, not only its
// first line.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

const MONTH: &str = r"(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
const DAY_YEAR: &str = r"\.?\s+(?P<day>\d{1,2})(?:st|nd|rd|th)?,?\s+(?P<year>\d{4})\b";
const WEEKDAY: &str = r"(?:(?:mon|tues?|wed(?:nes)?|thu(?:rs?)?|fri|sat(?:ur)?|sun)(?:day)?\.?,?\s+)?";

static MONTH_DAY_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{MONTH}{DAY_YEAR}")).expect("valid month-day-year regex")
});

static LONG_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{WEEKDAY}{MONTH}{DAY_YEAR}")).expect("valid long-date regex")
});

/// A date located in page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// The exact text that matched, as it appears on the page.
    pub span: String,
    pub year: i32,
    /// The parsed calendar date, when the span names a real day.
    pub date: Option<NaiveDate>,
}

impl DateMatch {
    /// `"{MonthName} {Year}"`, e.g. `"March 2002"`. Only available when the
    /// span parsed to a real date.
    pub fn month_year(&self) -> Option<String> {
        self.date.map(|d| d.format("%B %Y").to_string())
    }
}

/// Find the first month-name + day + year date anywhere in `text`.
///
/// Only the year is needed downstream, so an impossible day such as
/// "February 30, 1990" still matches, with `date` left empty.
pub fn find_month_day_year(text: &str) -> Option<DateMatch> {
    let caps = MONTH_DAY_YEAR_RE.captures(text)?;
    Some(to_match(&caps))
}

/// Find the first weekday- or month-led long date in `text`.
///
/// Only the first match is considered: if that span is not a valid calendar
/// date the page is treated as undated.
pub fn find_long_date(text: &str) -> Option<DateMatch> {
    let caps = LONG_DATE_RE.captures(text)?;
    let found = to_match(&caps);
    found.date?;
    Some(found)
}

fn to_match(caps: &Captures<'_>) -> DateMatch {
    let span = caps
        .get(0)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    // Digit-only captures of bounded width.
    let year: i32 = caps["year"].parse().unwrap_or_default();
    let day: u32 = caps["day"].parse().unwrap_or_default();
    let date = month_number(&caps["month"]).and_then(|m| NaiveDate::from_ymd_opt(year, m, day));
    DateMatch { span, year, date }
}

/// Month number (1-12) for an English month name or abbreviation.
fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_day_year_full_name() {
        let found = find_month_day_year("Dear Ruth,\nWritten March 12, 2002 at home").expect("match");
        assert_eq!(found.span, "March 12, 2002");
        assert_eq!(found.year, 2002);
        assert_eq!(found.date, NaiveDate::from_ymd_opt(2002, 3, 12));
    }

    #[test]
    fn month_day_year_abbreviated_with_period() {
        let found = find_month_day_year("Mar. 12, 2002").expect("match");
        assert_eq!(found.year, 2002);
        assert_eq!(found.span, "Mar. 12, 2002");
    }

    #[test]
    fn month_day_year_ignores_case_and_ordinals() {
        let found = find_month_day_year("posted JAN 5th 1990").expect("match");
        assert_eq!(found.year, 1990);
    }

    #[test]
    fn month_day_year_keeps_year_for_impossible_day() {
        let found = find_month_day_year("February 30, 1990").expect("match");
        assert_eq!(found.year, 1990);
        assert!(found.date.is_none());
        assert!(found.month_year().is_none());
    }

    #[test]
    fn month_word_inside_other_word_does_not_match() {
        assert!(find_month_day_year("summary 12, 2002").is_none());
    }

    #[test]
    fn no_date_is_none() {
        assert!(find_month_day_year("Just a note without dates").is_none());
        assert!(find_long_date("").is_none());
    }

    #[test]
    fn long_date_with_weekday() {
        let found = find_long_date("Tuesday, March 12, 2002\nDear diary").expect("match");
        assert_eq!(found.span, "Tuesday, March 12, 2002");
        assert_eq!(found.month_year().as_deref(), Some("March 2002"));
    }

    #[test]
    fn long_date_found_past_first_line() {
        let found = find_long_date("Morning\nwoke early\nJuly 4, 1976").expect("match");
        assert_eq!(found.month_year().as_deref(), Some("July 1976"));
    }

    #[test]
    fn long_date_rejects_invalid_calendar_date() {
        assert!(find_long_date("Friday, February 30, 2001").is_none());
    }

    #[test]
    fn long_date_only_considers_first_match() {
        // The first date is invalid, so the valid second one is not used.
        assert!(find_long_date("February 30, 2001 then March 1, 2001").is_none());
    }

    #[test]
    fn leap_day_is_valid() {
        let found = find_long_date("February 29, 2000").expect("match");
        assert_eq!(found.month_year().as_deref(), Some("February 2000"));
    }
}
