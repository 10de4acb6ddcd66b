//! Pattern-based extraction of locations and phone numbers from resume text,
//! and area-code geocoding.

use super::tables;
use regex::Regex;
use std::sync::OnceLock;

/// Only the head of a resume is searched; contact details live there.
pub const RESUME_SCAN_CHARS: usize = 2000;

/// Up to four capitalized words: "Salt Lake City", "St. Louis".
const CITY: &str = r"[A-Z][A-Za-z.'-]*(?:[ ][A-Z][A-Za-z.'-]*){0,3}";
/// Two-letter abbreviation or a one/two word state name.
const STATE: &str = r"[A-Z]{2}|[A-Z][a-z]+(?:[ ][A-Z][a-z]+)?";

static LABELED: OnceLock<Option<Regex>> = OnceLock::new();
static CITY_STATE_ZIP: OnceLock<Option<Regex>> = OnceLock::new();
static CITY_STATE_LINE: OnceLock<Option<Regex>> = OnceLock::new();
static CITY_STATE: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE: OnceLock<Option<Regex>> = OnceLock::new();

/// A pattern that fails to compile never matches.
fn compiled(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: impl FnOnce() -> String,
) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(&pattern()).ok()).as_ref()
}

/// "Location: Austin, TX", "Based in Portland, OR".
fn labeled() -> Option<&'static Regex> {
    compiled(&LABELED, || {
        format!(
            r"(?i:location|based in|located in|residing in|address)[ \t]*[:\-]?[ \t]*({city}),[ \t]*({state})\b",
            city = CITY,
            state = STATE
        )
    })
}

/// "Seattle, WA 98101".
fn city_state_zip() -> Option<&'static Regex> {
    compiled(&CITY_STATE_ZIP, || {
        format!(
            r"({city}),[ \t]*([A-Z]{{2}})[ \t]+\d{{5}}(?:-\d{{4}})?\b",
            city = CITY
        )
    })
}

/// "City, ST" alone on a line or between `|` / `•` separators.
fn city_state_line() -> Option<&'static Regex> {
    compiled(&CITY_STATE_LINE, || {
        format!(
            r"(?m)(?:^|[|•·])[ \t]*({city}),[ \t]*({state})[ \t]*(?:$|[|•·])",
            city = CITY,
            state = STATE
        )
    })
}

/// "City, ST" anywhere: mid-sentence, before a period, followed by a country.
fn city_state() -> Option<&'static Regex> {
    compiled(&CITY_STATE, || {
        format!(
            r"\b({city}),[ \t]*({state})(?:[ \t]+\d{{5}}(?:-\d{{4}})?)?\b",
            city = CITY,
            state = STATE
        )
    })
}

/// NANP numbers: 415-555-1234, (650) 555-9999, 206.555.7777, +1-408-555-3333.
fn phone() -> Option<&'static Regex> {
    compiled(&PHONE, || {
        r"(?:\+?1[\s.-]?)?\(?([2-9]\d{2})\)?[\s.-]?(\d{3})[\s.-]?(\d{4})\b".to_string()
    })
}

/// Leading slice of at most `RESUME_SCAN_CHARS` characters.
fn scan_window(text: &str) -> &str {
    match text.char_indices().nth(RESUME_SCAN_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First match of `re` whose state is a known state. A rejected match is
/// retried from its state group, so "Jane Roe, Seattle, WA" still finds
/// "Seattle, WA".
fn first_city_state(re: &Regex, text: &str) -> Option<String> {
    let mut start = 0;
    while start <= text.len() {
        let caps = re.captures_at(text, start)?;
        let state_group = caps.get(2)?;
        let city = caps.get(1)?.as_str().trim();
        if let Some(state) = tables::lookup_state(state_group.as_str()) {
            return Some(format!("{}, {}", city, state.abbr));
        }
        start = state_group.start();
    }
    None
}

/// First "City, ST" found in the head of a resume, normalized to the state
/// abbreviation. Labeled forms win over bare ones.
pub fn extract_location_from_resume(resume_text: &str) -> Option<String> {
    let head = scan_window(resume_text);
    [labeled(), city_state_zip(), city_state_line(), city_state()]
        .into_iter()
        .flatten()
        .find_map(|re| first_city_state(re, head))
}

/// Phone numbers in `text`, normalized to `AAA-EEE-NNNN`.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    let Some(re) = phone() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .map(|caps| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
        .collect()
}

/// Area code of a NANP number (10 digits, or 11 with a leading 1).
pub fn area_code(phone_number: &str) -> Option<String> {
    let digits: String = phone_number.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return None,
    };
    Some(national[..3].to_string())
}

/// Coarse place for a phone number; `None` for unknown or non-NANP numbers.
pub fn location_from_phone_number(phone_number: &str) -> Option<String> {
    let code = area_code(phone_number)?;
    tables::lookup_area_code(&code).map(str::to_string)
}
