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

//! Individual pieces of data.
//!
//! A [Record] is one row of a DBF file: an ordered mapping from field name
//! to [Value], plus a deletion flag.  Values are owned copies; once decoded
//! they no longer alias any I/O buffer.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// The value of one field in a record.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub enum Value {
    /// Text from a `C` or `M` field, trailing spaces trimmed.
    Text(String),
    /// A number from an `N` or `F` field.
    Number(f64),
    /// A logical from an `L` field.
    Boolean(bool),
    /// A calendar date from a `D` field.
    Date(NaiveDate),
    /// A UTC datetime from a `T` field.
    DateTime(DateTime<Utc>),
    /// A double from a `B` field.
    Double(f64),
    /// An integer from an `I` field.
    Integer(i32),
    /// An empty field of any type.
    #[default]
    Null,
}

impl Value {
    /// Whether this is the null value.
    pub fn is_null(&self) -> bool {
        *self == Self::Null
    }

    /// The text in this value, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// This value as a float, for any of the numeric variants.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) | Self::Double(n) => Some(*n),
            Self::Integer(i) => Some(f64::from(*i)),
            _ => None,
        }
    }

    /// The boolean in this value, if it is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The date in this value, if it is a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// The datetime in this value, if it is a datetime.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(datetime) => Some(*datetime),
            _ => None,
        }
    }

    /// The integer in this value, if it is an integer.
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(n) | Self::Double(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(datetime) => {
                write!(f, "{}", datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Self::Integer(i) => write!(f, "{i}"),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::DateTime(datetime)
    }
}

/// One row of a DBF file.
///
/// Field order matches the descriptor table.  A record read from a file
/// with `include_deleted` set may carry the deletion flag; records built
/// for appending are always live.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Record {
    values: IndexMap<String, Value>,
    deleted: bool,
}

impl Record {
    /// Constructs an empty live record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `name`, returning the previous value if there
    /// was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Returns the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the record carries the deletion flag.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub(crate) fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The text in field `name`, if present and text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_text()
    }

    /// The number in field `name`, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_number()
    }

    /// The boolean in field `name`, if present and a boolean.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_boolean()
    }

    /// The date in field `name`, if present and a date.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name)?.as_date()
    }

    /// The datetime in field `name`, if present and a datetime.
    pub fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name)?.as_datetime()
    }

    /// The integer in field `name`, if present and an integer.
    pub fn integer(&self, name: &str) -> Option<i32> {
        self.get(name)?.as_integer()
    }
}

impl<N, V> FromIterator<(N, V)> for Record
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
    {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            deleted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_preserves_field_order() {
        let record =
            Record::from_iter([("ZED", Value::Integer(1)), ("ALPHA", Value::Integer(2))]);
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["ZED", "ALPHA"]);
    }

    #[test]
    fn typed_getters() {
        let mut record = Record::new();
        record.insert("NAME", "petits fours");
        record.insert("QTY", 12.5);
        record.insert("OK", true);
        record.insert("NO", 7);
        assert_eq!(record.text("NAME"), Some("petits fours"));
        assert_eq!(record.number("QTY"), Some(12.5));
        assert_eq!(record.boolean("OK"), Some(true));
        assert_eq!(record.integer("NO"), Some(7));
        assert_eq!(record.number("NO"), Some(7.0));
        assert_eq!(record.text("QTY"), None);
        assert_eq!(record.get("MISSING"), None);
    }

    #[test]
    fn value_display() {
        let datetime = Utc.with_ymd_and_hms(2013, 12, 12, 8, 30, 0).unwrap();
        assert_eq!(Value::DateTime(datetime).to_string(), "2013-12-12T08:30:00Z");
        assert_eq!(Value::Number(2.92308).to_string(), "2.92308");
        assert_eq!(Value::Number(17_000_000_000.0).to_string(), "17000000000");
        assert_eq!(Value::Null.to_string(), "");
    }
}
