// dbf - a library for reading and writing dBase database files.
// Copyright (C) 2026 The dbf authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Calendar conversions for the date and datetime wire formats.
//!
//! DBF files carry temporal values in three shapes: an 8-character
//! `YYYYMMDD` text field, the Visual FoxPro pair of a Julian day number and
//! a count of milliseconds since midnight, and an 8-byte double.  This
//! module converts between the first two and [chrono] values; the double
//! form needs no calendar arithmetic.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use num::Integer;

/// Julian day number of the Unix epoch, 1970-01-01.
pub const UNIX_EPOCH_JULIAN_DAY: i64 = 2_440_588;

/// Milliseconds in one civil day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Translates a Julian day number into a Gregorian calendar date.
///
/// This is the Hatcher/Meeus integer algorithm, kept in its published form
/// because Visual FoxPro pins its datetimes to exactly these results.
pub fn julian_day_to_gregorian(julian_day: i64) -> Option<NaiveDate> {
    let s1 = julian_day + 68_569;
    let n = (4 * s1).div_floor(&146_097);
    let s2 = s1 - (146_097 * n + 3).div_floor(&4);
    let i = (4_000 * (s2 + 1)).div_floor(&1_461_001);
    let s3 = s2 - (1_461 * i).div_floor(&4) + 31;
    let q = (80 * s3).div_floor(&2_447);
    let s4 = q.div_floor(&11);
    let year = 100 * (n - 49) + i + s4;
    let month = q + 2 - 12 * s4;
    let day = s3 - (2_447 * q).div_floor(&80);
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
}

/// Composes a UTC datetime from the on-disk Visual FoxPro pair: a Julian
/// day number and milliseconds since midnight.
pub fn datetime_from_julian(julian_day: i64, msecs: i64) -> Option<DateTime<Utc>> {
    if !(0..MS_PER_DAY).contains(&msecs) {
        return None;
    }
    let date = julian_day_to_gregorian(julian_day)?;
    let hours = msecs / 3_600_000;
    let minutes = (msecs % 3_600_000) / 60_000;
    let seconds = (msecs % 60_000) / 1_000;
    let time = NaiveTime::from_hms_opt(hours as u32, minutes as u32, seconds as u32)?;
    Some(NaiveDateTime::new(date, time).and_utc())
}

/// Decomposes a UTC datetime into the Visual FoxPro pair.
///
/// The day count comes from the epoch-relative millisecond timestamp; the
/// time of day is recomputed from the clock fields so that sub-second
/// precision is dropped rather than rounded.
pub fn datetime_to_julian(datetime: DateTime<Utc>) -> (i32, i32) {
    let julian_day = datetime.timestamp_millis().div_floor(&MS_PER_DAY) + UNIX_EPOCH_JULIAN_DAY;
    let msecs = ((i64::from(datetime.hour()) * 60 + i64::from(datetime.minute())) * 60
        + i64::from(datetime.second()))
        * 1_000;
    (julian_day as i32, msecs as i32)
}

/// Parses an 8-byte `YYYYMMDD` field into a calendar date.
pub fn parse_date8(bytes: &[u8]) -> Option<NaiveDate> {
    let text = std::str::from_utf8(bytes).ok()?;
    if text.len() != 8 {
        return None;
    }
    let year: i32 = text[0..4].parse().ok()?;
    let month: u32 = text[4..6].parse().ok()?;
    let day: u32 = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a calendar date as the 8-byte `YYYYMMDD` field.
pub fn format_date8(date: NaiveDate) -> [u8; 8] {
    let mut out = [0; 8];
    write_decimal(&mut out[0..4], date.year() as u32);
    write_decimal(&mut out[4..6], date.month());
    write_decimal(&mut out[6..8], date.day());
    out
}

fn write_decimal(out: &mut [u8], mut value: u32) {
    for slot in out.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}
