//! Text helpers for fitting names, leagues and dates into fixed-width cells.

use chrono::{Datelike, NaiveDate, Weekday};

const DATE_PLACEHOLDER: &str = "DD/MM/YYYY";
const MAX_DATE_DIGITS: usize = 8;

/// Keep only the digits of `input`, capped at `DDMMYYYY`.
pub fn date_digits(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DATE_DIGITS)
        .collect()
}

/// Progressive `DD/MM/YYYY` mask over typed digits.
pub fn mask_date(digits: &str) -> String {
    let digits = date_digits(digits);
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Pad a masked date with the remainder of `DD/MM/YYYY`.
pub fn with_placeholder(masked: &str) -> String {
    let typed = masked.chars().count();
    let rest: String = DATE_PLACEHOLDER.chars().skip(typed).collect();
    format!("{masked}{rest}")
}

/// A full, calendar-valid `DD/MM/YYYY`.
pub fn parse_date(masked: &str) -> Option<NaiveDate> {
    if masked.len() != DATE_PLACEHOLDER.len() {
        return None;
    }
    NaiveDate::parse_from_str(masked, "%d/%m/%Y").ok()
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
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

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

pub fn shorten_league(name: &str) -> String {
    let shortened = name
        .split(' ')
        .map(|word| {
            if word.chars().count() > 15 {
                format!("{}...", take_chars(word, 14))
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    if shortened.chars().count() > 35 {
        format!("{}...", take_chars(&shortened, 35))
    } else {
        shortened
    }
}

/// Break a team name into 5-character chunks so it wraps inside a narrow card.
pub fn chunk_team_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > 15 {
        return format!("{}...", chunk_team_name(&take_chars(name, 13)));
    }
    chars
        .chunks(5)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shorten_location(location: &str) -> String {
    if location.chars().count() > 22 {
        format!("{}..", take_chars(location, 22))
    } else {
        location.to_string()
    }
}

/// `"Paul Stirling"` -> `"P. Stirling"`, surname part capped at 10 chars.
pub fn card_name(name: &str) -> String {
    let mut parts = name.split(' ');
    let first = parts.next().unwrap_or_default();
    let rest = parts.collect::<Vec<_>>().join(" ");
    match first.chars().next() {
        Some(initial) => format!("{initial}. {}", take_chars(&rest, 10)),
        None => String::new(),
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect::<String>()
        .to_uppercase()
}

/// Long multi-word names lose their first name to an initial.
pub fn compact_name(name: &str) -> String {
    if name.chars().count() <= 13 {
        return name.to_string();
    }
    let words: Vec<&str> = name.split(' ').collect();
    match words.split_first() {
        Some((first, rest)) if !rest.is_empty() => {
            let initial = first.chars().next().map(String::from).unwrap_or_default();
            format!("{initial}. {}", rest.join(" "))
        }
        _ => name.to_string(),
    }
}

/// Every name part longer than 7 chars becomes its initial.
pub fn report_name(name: &str) -> String {
    name.split(' ')
        .map(|part| {
            if part.chars().count() > 7 {
                part.chars().next().map(|c| format!("{c}.")).unwrap_or_default()
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Surname words only, capped at 7 chars.
pub fn bench_label(name: &str) -> String {
    let surname = name.split(' ').skip(1).collect::<Vec<_>>().join(" ");
    take_chars(&surname, 7)
}

pub fn pitch_label(name: &str) -> String {
    take_chars(name, 13)
}

pub fn strip_second_squad(team: &str) -> &str {
    team.strip_suffix("_Second_Squad").unwrap_or(team)
}
