use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::atlauncher::report::model::UpdatedAt;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalises a catalog `updated` value using the machine's local time zone.
pub fn parse_updated(raw: Option<&str>) -> UpdatedAt {
    parse_updated_in(raw, &Local)
}

/// Normalises a catalog `updated` value, converting zoned timestamps into
/// `zone` and dropping the offset. Unparseable input is kept verbatim.
pub fn parse_updated_in<Tz: TimeZone>(raw: Option<&str>, zone: &Tz) -> UpdatedAt {
    match raw {
        None | Some("") => UpdatedAt::Empty,
        Some(value) => match parse_iso8601(value, zone) {
            Some(parsed) => UpdatedAt::Timestamp(parsed),
            None => UpdatedAt::Text(value.to_string()),
        },
    }
}

fn parse_iso8601<Tz: TimeZone>(value: &str, zone: &Tz) -> Option<NaiveDateTime> {
    let zoned = match value.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => value.to_string(),
    };
    let normalized = to_extended(&zoned);

    if let Some(zoned) = parse_zoned(&normalized) {
        return Some(zoned.with_timezone(zone).naive_local());
    }
    parse_naive(&normalized)
}

fn parse_zoned(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(value, format).ok())
    })
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Rewrites ISO-8601 basic forms (`20240301T103000+0200`) and reduced
/// precision times (`2024-03-01T10`) into the extended form the format lists
/// expect. Anything that does not look like a date is returned unchanged.
fn to_extended(value: &str) -> String {
    let bytes = value.as_bytes();
    let basic_date = bytes.len() >= 8
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes.get(8).is_none_or(|&b| matches!(b, b'T' | b' '));

    let (date, rest) = if basic_date {
        (
            format!("{}-{}-{}", &value[..4], &value[4..6], &value[6..8]),
            &value[8..],
        )
    } else if value.len() >= 10 && value.is_char_boundary(10) {
        (value[..10].to_string(), &value[10..])
    } else {
        return value.to_string();
    };

    let mut chars = rest.chars();
    let separator = match chars.next() {
        None => return date,
        Some(separator @ ('T' | ' ')) => separator,
        Some(_) => return value.to_string(),
    };
    let time = chars.as_str();

    let digits = time.bytes().take_while(u8::is_ascii_digit).count();
    let (clock, tail) = time.split_at(digits);
    let clock = match (digits, tail.starts_with(':')) {
        (2, false) => format!("{clock}:00"),
        (4, false) => format!("{}:{}", &clock[..2], &clock[2..]),
        (6, false) => format!("{}:{}:{}", &clock[..2], &clock[2..4], &clock[4..]),
        _ => clock.to_string(),
    };
    format!("{date}{separator}{clock}{}", extend_offset(tail))
}

/// `+0530` becomes `+05:30` and `+05` becomes `+05:00`.
fn extend_offset(tail: &str) -> String {
    let bytes = tail.as_bytes();
    let len = bytes.len();
    let sign_at = |index: usize| matches!(bytes[index], b'+' | b'-');
    let digits_from = |index: usize| bytes[index..].iter().all(u8::is_ascii_digit);

    if len >= 5 && sign_at(len - 5) && digits_from(len - 4) {
        format!("{}:{}", &tail[..len - 2], &tail[len - 2..])
    } else if len >= 3 && sign_at(len - 3) && digits_from(len - 2) {
        format!("{tail}:00")
    } else {
        tail.to_string()
    }
}
