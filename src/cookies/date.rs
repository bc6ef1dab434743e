//! Cookie date parsing (RFC 6265 §5.1.1).
//!
//! Servers send `Expires` in several historical formats:
//! - RFC 1123: `Sun, 06 Nov 1994 08:49:37 GMT`
//! - RFC 850: `Sunday, 06-Nov-94 08:49:37 GMT`
//! - asctime: `Sun Nov  6 08:49:37 1994`
//!
//! Rather than trying a list of fixed formats, this follows the RFC's
//! token-based algorithm, which accepts all of the above plus the many
//! broken variants seen in the wild.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse a cookie date. Returns `None` for anything the algorithm rejects.
pub fn parse_cookie_date(input: &str) -> Option<OffsetDateTime> {
    let mut time: Option<(u8, u8, u8)> = None;
    let mut day: Option<u8> = None;
    let mut month: Option<Month> = None;
    let mut year: Option<i32> = None;

    for token in input.split(is_delimiter).filter(|t| !t.is_empty()) {
        if time.is_none() {
            if let Some(hms) = parse_time(token) {
                time = Some(hms);
                continue;
            }
        }
        if day.is_none() {
            if let Some(d) = leading_digits(token, 1, 2) {
                day = Some(d as u8);
                continue;
            }
        }
        if month.is_none() {
            if let Some(m) = parse_month(token) {
                month = Some(m);
                continue;
            }
        }
        if year.is_none() {
            if let Some(y) = leading_digits(token, 2, 4) {
                year = Some(y as i32);
                continue;
            }
        }
    }

    let (hour, minute, second) = time?;
    let day = day?;
    let month = month?;
    let year = match year? {
        y @ 70..=99 => y + 1900,
        y @ 0..=69 => y + 2000,
        y => y,
    };

    if !(1..=31).contains(&day) || year < 1601 || hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    let date = Date::from_calendar_date(year, month, day).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;
    Some(PrimitiveDateTime::new(date, time).assume_utc())
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '\x09' | '\x20'..='\x2f' | '\x3b'..='\x40' | '\x5b'..='\x60' | '\x7b'..='\x7e')
}

/// `hms-time = time-field ":" time-field ":" time-field [ non-digit *OCTET ]`
fn parse_time(token: &str) -> Option<(u8, u8, u8)> {
    let mut fields = token.splitn(3, ':');
    let hour = exact_digits(fields.next()?, 1, 2)?;
    let minute = exact_digits(fields.next()?, 1, 2)?;
    let second = leading_digits(fields.next()?, 1, 2)?;
    Some((hour as u8, minute as u8, second as u8))
}

fn parse_month(token: &str) -> Option<Month> {
    let prefix = token.get(..3)?;
    let idx = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(prefix))?;
    Month::try_from(idx as u8 + 1).ok()
}

/// Digits at the start of `token`, allowing any non-digit tail.
fn leading_digits(token: &str, min: usize, max: usize) -> Option<u32> {
    let len = token.bytes().take_while(u8::is_ascii_digit).count();
    if len < min || len > max {
        return None;
    }
    token[..len].parse().ok()
}

fn exact_digits(field: &str, min: usize, max: usize) -> Option<u32> {
    if field.bytes().all(|b| b.is_ascii_digit()) {
        leading_digits(field, min, max)
    } else {
        None
    }
}
