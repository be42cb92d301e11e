//! Persian (Jalali) calendar rendering for message timestamps.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Asia::Tehran;

const MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Epoch values above this are milliseconds.
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Convert a Gregorian date to `(year, month, day)` in the Jalali calendar.
#[must_use]
pub fn gregorian_to_jalali(gy: i32, gm: u32, gd: u32) -> (i32, u32, u32) {
    const G_D_M: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let (mut jy, gy) = if gy > 1600 {
        (979_i64, i64::from(gy) - 1600)
    } else {
        (0_i64, i64::from(gy) - 621)
    };
    let gm_idx = usize::try_from(gm.clamp(1, 12) - 1).unwrap_or(0);
    let gy2 = if gm > 2 { gy + 1 } else { gy };

    let mut days = 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400 - 80
        + i64::from(gd)
        + G_D_M[gm_idx];

    jy += 33 * (days / 12053);
    days %= 12053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    (
        i32::try_from(jy).unwrap_or_default(),
        u32::try_from(jm).unwrap_or(1),
        u32::try_from(jd).unwrap_or(1),
    )
}

/// `<day> <month> <year> - ساعت HH:MM` in Tehran local time.
#[must_use]
pub fn format_jalali(at: DateTime<Utc>) -> String {
    let local = Tehran.from_utc_datetime(&at.naive_utc());
    let (jy, jm, jd) = gregorian_to_jalali(local.year(), local.month(), local.day());
    let month = MONTHS[usize::try_from(jm.clamp(1, 12) - 1).unwrap_or(0)];
    format!(
        "{jd} {month} {jy} - ساعت {:02}:{:02}",
        local.hour(),
        local.minute()
    )
}

/// Parse a ClickUp epoch (seconds or milliseconds, possibly a string).
#[must_use]
pub fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let value: i64 = raw.trim().parse().ok()?;
    if value > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

/// Render an optional timestamp, substituting `now` when it is absent or unparsable.
#[must_use]
pub fn format_timestamp_or(raw: Option<&str>, now: DateTime<Utc>) -> String {
    format_jalali(raw.and_then(parse_epoch).unwrap_or(now))
}

#[must_use]
pub fn jalali_now() -> String {
    format_jalali(Utc::now())
}
