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

//! Encoding and decoding record frames.
//!
//! A record frame is `record_length` consecutive bytes: one deletion-flag
//! byte followed by each field's bytes in descriptor order.  Decoding
//! produces owned [Value]s; nothing borrows the batch buffer once a frame
//! has been decoded.

use encoding_rs::Encoding;
use smallvec::SmallVec;
use tokio::fs::File;

use crate::calendar;
use crate::data::{Record, Value};
use crate::encoding::FieldEncodings;
use crate::error::Error;
use crate::field::{FieldDescriptor, FieldType, FileVersion};
use crate::memo::MemoReader;

/// Deletion-flag byte of a live record.
pub(crate) const LIVE_FLAG: u8 = 0x20;

/// Deletion-flag byte of a deleted record.
pub(crate) const DELETED_FLAG: u8 = 0x2A;

/// Per-field scratch space for encoding; fields longer than this spill.
type FieldBytes = SmallVec<[u8; 32]>;

/// Decodes one record frame into a [Record].
///
/// Fields with unsupported types occupy their declared size in the frame
/// but are omitted from the result.  Memo references resolve through
/// `memo` when a reader is present; otherwise they decode as null.
pub(crate) async fn decode_record(
    frame: &[u8],
    fields: &[FieldDescriptor],
    encodings: &FieldEncodings,
    version: FileVersion,
    memo: &mut Option<MemoReader<File>>,
) -> Result<Record, Error> {
    let mut record = Record::new();
    record.set_deleted(frame[0] == DELETED_FLAG);
    let mut offset = 1;
    for field in fields {
        let bytes = &frame[offset..offset + field.size as usize];
        offset += field.size as usize;
        let encoding = encodings.for_field(&field.name);
        let value = match field.field_type {
            FieldType::Character => decode_character(bytes, encoding),
            FieldType::Numeric | FieldType::Float => decode_numeric(bytes),
            FieldType::Logical => decode_logical(bytes),
            FieldType::Date => decode_date(bytes),
            FieldType::DateTime => decode_datetime(bytes),
            FieldType::Integer => decode_integer(bytes),
            FieldType::Double => decode_double(bytes),
            FieldType::Memo => decode_memo(bytes, version, encoding, memo).await?,
            FieldType::Unknown(_) => continue,
        };
        record.insert(field.name.clone(), value);
    }
    Ok(record)
}

fn decode_character(bytes: &[u8], encoding: &'static Encoding) -> Value {
    let mut trimmed = bytes;
    while let Some(rest) = trimmed.strip_suffix(b" ") {
        trimmed = rest;
    }
    let (text, _malformed) = encoding.decode_without_bom_handling(trimmed);
    Value::Text(text.into_owned())
}

fn decode_numeric(bytes: &[u8]) -> Value {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return Value::Null;
    };
    let text = text.trim_start_matches(' ');
    if text.is_empty() {
        return Value::Null;
    }
    match text.parse::<f64>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::Null,
    }
}

fn decode_logical(bytes: &[u8]) -> Value {
    match bytes.first() {
        Some(b'T' | b't' | b'Y' | b'y') => Value::Boolean(true),
        Some(b'F' | b'f' | b'N' | b'n') => Value::Boolean(false),
        _ => Value::Null,
    }
}

fn decode_date(bytes: &[u8]) -> Value {
    if bytes.first() == Some(&b' ') {
        return Value::Null;
    }
    match calendar::parse_date8(bytes) {
        Some(date) => Value::Date(date),
        None => Value::Null,
    }
}

fn decode_datetime(bytes: &[u8]) -> Value {
    if bytes.first() == Some(&b' ') || bytes.len() != 8 {
        return Value::Null;
    }
    let julian_day = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let msecs = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    match calendar::datetime_from_julian(i64::from(julian_day), i64::from(msecs)) {
        Some(datetime) => Value::DateTime(datetime),
        None => Value::Null,
    }
}

fn decode_integer(bytes: &[u8]) -> Value {
    match <[u8; 4]>::try_from(bytes) {
        Ok(raw) => Value::Integer(i32::from_le_bytes(raw)),
        Err(_) => Value::Null,
    }
}

fn decode_double(bytes: &[u8]) -> Value {
    match <[u8; 8]>::try_from(bytes) {
        Ok(raw) => Value::Double(f64::from_le_bytes(raw)),
        Err(_) => Value::Null,
    }
}

async fn decode_memo(
    bytes: &[u8],
    version: FileVersion,
    encoding: &'static Encoding,
    memo: &mut Option<MemoReader<File>>,
) -> Result<Value, Error> {
    let Some(block_index) = memo_block_index(bytes, version) else {
        return Ok(Value::Null);
    };
    match memo {
        Some(reader) => Ok(reader
            .read_memo(block_index, encoding)
            .await?
            .map_or(Value::Null, Value::Text)),
        // Missing memo file, tolerated in loose mode.
        None => Ok(Value::Null),
    }
}

/// Extracts the memo block index from a record's memo field, if it points
/// anywhere.  Visual FoxPro stores an int32; the dBase versions store
/// space-padded decimal digits.  Blank or zero means no memo.
fn memo_block_index(bytes: &[u8], version: FileVersion) -> Option<usize> {
    if version == FileVersion::VisualFoxPro9 {
        let raw = <[u8; 4]>::try_from(bytes).ok()?;
        let index = i32::from_le_bytes(raw);
        (index > 0).then_some(index as usize)
    } else {
        let text = std::str::from_utf8(bytes).ok()?.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<usize>().ok().filter(|&index| index > 0)
    }
}

/// Encodes `record` into `frame`, replacing its contents with a live
/// record frame in descriptor order.  Fields absent from the record are
/// encoded as their type's blank form.
pub(crate) fn encode_record(
    record: &Record,
    fields: &[FieldDescriptor],
    encodings: &FieldEncodings,
    frame: &mut Vec<u8>,
) -> Result<(), Error> {
    frame.clear();
    frame.push(LIVE_FLAG);
    for field in fields {
        let value = record.get(&field.name).unwrap_or(&Value::Null);
        let bytes = encode_field(field, value, encodings.for_field(&field.name))?;
        debug_assert_eq!(bytes.len(), field.size as usize);
        frame.extend_from_slice(&bytes);
    }
    Ok(())
}

fn encode_field(
    field: &FieldDescriptor,
    value: &Value,
    encoding: &'static Encoding,
) -> Result<FieldBytes, Error> {
    let size = field.size as usize;
    let mut out = FieldBytes::new();
    match field.field_type {
        FieldType::Character => match value {
            Value::Null => out.resize(size, b' '),
            Value::Text(text) => {
                if text.chars().count() > 255 {
                    return Err(Error::TextTooLong {
                        field: field.name.clone(),
                    });
                }
                let encoded = encoding.encode(text).0;
                // Pad by encoded byte count, not source characters.
                let take = encoded.len().min(size);
                out.extend_from_slice(&encoded[..take]);
                out.resize(size, b' ');
            }
            _ => return Err(mismatch(field, "string")),
        },
        FieldType::Numeric | FieldType::Float => match numeric_value(value) {
            None => return Err(mismatch(field, "number")),
            Some(None) => out.resize(size, b' '),
            Some(Some(number)) => {
                let text = number.to_string();
                let digits = text.as_bytes();
                let take = digits.len().min(size);
                out.resize(size - take, b' ');
                out.extend_from_slice(&digits[..take]);
            }
        },
        FieldType::Logical => match value {
            Value::Null => out.push(b' '),
            Value::Boolean(true) => out.push(b'T'),
            Value::Boolean(false) => out.push(b'F'),
            _ => return Err(mismatch(field, "boolean")),
        },
        FieldType::Date => match value {
            Value::Null => out.resize(size, b' '),
            Value::Date(date) => out.extend_from_slice(&calendar::format_date8(*date)),
            Value::DateTime(datetime) => {
                out.extend_from_slice(&calendar::format_date8(datetime.date_naive()))
            }
            _ => return Err(mismatch(field, "date")),
        },
        FieldType::DateTime => match value {
            Value::Null => out.resize(size, b' '),
            Value::DateTime(datetime) => {
                let (julian_day, msecs) = calendar::datetime_to_julian(*datetime);
                out.extend_from_slice(&julian_day.to_le_bytes());
                out.extend_from_slice(&msecs.to_le_bytes());
            }
            Value::Date(date) => {
                let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
                let (julian_day, msecs) = calendar::datetime_to_julian(midnight);
                out.extend_from_slice(&julian_day.to_le_bytes());
                out.extend_from_slice(&msecs.to_le_bytes());
            }
            _ => return Err(mismatch(field, "date")),
        },
        FieldType::Integer => match value {
            Value::Null => out.extend_from_slice(&0i32.to_le_bytes()),
            Value::Integer(i) => out.extend_from_slice(&i.to_le_bytes()),
            Value::Number(n) | Value::Double(n)
                if n.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(n) =>
            {
                out.extend_from_slice(&(*n as i32).to_le_bytes())
            }
            _ => return Err(mismatch(field, "number")),
        },
        FieldType::Double => match numeric_value(value) {
            None => return Err(mismatch(field, "number")),
            Some(None) => out.extend_from_slice(&0f64.to_le_bytes()),
            Some(Some(number)) => out.extend_from_slice(&number.to_le_bytes()),
        },
        FieldType::Memo => return Err(Error::MemoWriteUnsupported),
        FieldType::Unknown(code) => {
            return Err(crate::field::Error::UnsupportedFieldType {
                name: field.name.clone(),
                code,
            }
            .into())
        }
    }
    Ok(out)
}

/// Classifies `value` for a numeric target: `None` is a type mismatch,
/// `Some(None)` is null.
fn numeric_value(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) | Value::Double(n) => Some(Some(*n)),
        Value::Integer(i) => Some(Some(f64::from(*i))),
        _ => None,
    }
}

fn mismatch(field: &FieldDescriptor, expected: &'static str) -> Error {
    Error::ValueTypeMismatch {
        field: field.name.clone(),
        expected,
    }
}
