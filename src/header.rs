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

//! The DBF header: a fixed 32-byte prelude, a table of 32-byte field
//! descriptors, and a `0x0D` terminator.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{Cursor, Error as IoError};
use std::path::{Path, PathBuf};

use binrw::{BinRead, BinWrite};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::encoding::{decode_name, encode_name};
use crate::error::{Error, Warning};
use crate::field::{self, FieldDescriptor, FieldType, FileVersion};
use crate::file::ReadMode;

/// Terminator byte that closes the field descriptor table.
const DESCRIPTOR_TERMINATOR: u8 = 0x0D;

/// End-of-file marker written after the last record.
pub(crate) const EOF_MARKER: u8 = 0x1A;

/// The fixed 32-byte prelude of a DBF file.
#[derive(Clone, Debug, BinRead, BinWrite)]
#[brw(little)]
struct RawHeader {
    version: u8,
    last_update: [u8; 3],
    record_count: i32,
    header_length: u16,
    record_length: u16,
    _reserved: [u8; 20],
}

/// One 32-byte field descriptor.
#[derive(Clone, Debug, BinRead, BinWrite)]
#[brw(little)]
struct RawFieldDescriptor {
    name: [u8; 11],
    field_type: u8,
    _reserved0: [u8; 4],
    size: u8,
    decimal_places: u8,
    _reserved1: [u8; 14],
}

/// The date-of-last-update triple from the header, kept verbatim.
///
/// The on-disk year byte is `year − 1900` and the month byte has been
/// written both 0-based and 1-based by different tools over the years, so
/// the triple is not forced into a calendar date; files with nonsense
/// header dates survive unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdateDate {
    /// Full year, `1900 + YY`.
    pub year: u16,
    /// Month byte as stored, 0 through 12 in practice.
    pub month: u8,
    /// Day byte as stored.
    pub day: u8,
}

impl UpdateDate {
    fn from_raw(raw: [u8; 3]) -> Self {
        Self {
            year: 1900 + u16::from(raw[0]),
            month: raw[1],
            day: raw[2],
        }
    }

    fn to_raw(self) -> [u8; 3] {
        [(self.year.saturating_sub(1900)).min(255) as u8, self.month, self.day]
    }

    /// Today's date, as written into newly created files.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year() as u16,
            month: today.month() as u8,
            day: today.day() as u8,
        }
    }

    /// This triple as a calendar date, when it denotes one.
    pub fn as_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))
    }
}

impl Display for UpdateDate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Everything learned from the header region of a DBF file.
#[derive(Clone, Debug)]
pub(crate) struct Header {
    pub version: FileVersion,
    pub last_update: UpdateDate,
    pub record_count: u32,
    pub header_length: u16,
    /// Effective record length.  In loose mode a header that contradicts
    /// its own descriptors has this recomputed from the field sizes.
    pub record_length: u16,
    pub fields: Vec<FieldDescriptor>,
}

/// Reads and checks the header region.
///
/// `reader` must be positioned at the start of the file.  Descriptors are
/// consumed until the `0x0D` terminator or until `header_length` is
/// exhausted; a missing terminator is an error in either read mode.
pub(crate) async fn read_header<R>(
    reader: &mut R,
    read_mode: ReadMode,
    warn: &mut dyn FnMut(Warning),
) -> Result<Header, Error>
where
    R: AsyncRead + Unpin,
{
    let mut prelude = [0; 32];
    reader.read_exact(&mut prelude).await?;
    let raw = RawHeader::read_le(&mut Cursor::new(prelude.as_slice())).map_err(IoError::other)?;

    let version = FileVersion::from_code(raw.version);
    if let FileVersion::Unknown(code) = version {
        match read_mode {
            ReadMode::Strict => return Err(Error::UnsupportedVersion(code)),
            ReadMode::Loose => warn(Warning::UnknownVersion(code)),
        }
    }

    let header_length = raw.header_length as usize;
    let mut fields = Vec::new();
    let mut consumed = 32;
    let mut terminated = false;
    while consumed < header_length {
        let mut first = [0; 1];
        reader.read_exact(&mut first).await?;
        consumed += 1;
        if first[0] == DESCRIPTOR_TERMINATOR {
            terminated = true;
            break;
        }
        if consumed + 31 > header_length {
            // Ran out of header before the descriptor did.
            break;
        }
        let mut buf = [0; 32];
        buf[0] = first[0];
        reader.read_exact(&mut buf[1..]).await?;
        consumed += 31;
        let raw_field =
            RawFieldDescriptor::read_le(&mut Cursor::new(buf.as_slice())).map_err(IoError::other)?;
        let descriptor = FieldDescriptor {
            name: decode_name(&raw_field.name),
            field_type: FieldType::from_code(raw_field.field_type),
            size: raw_field.size,
            decimal_places: raw_field.decimal_places,
        };
        match read_mode {
            ReadMode::Strict => descriptor.validate(version)?,
            ReadMode::Loose => {
                if let FieldType::Unknown(code) = descriptor.field_type {
                    warn(Warning::UnknownFieldType {
                        name: descriptor.name.clone(),
                        code,
                    });
                }
            }
        }
        fields.push(descriptor);
    }
    if !terminated {
        return Err(Error::BadHeaderTerminator);
    }

    field::check_unique_names(&fields)?;

    let computed = record_length(&fields);
    let record_length = if computed == raw.record_length {
        computed
    } else {
        match read_mode {
            ReadMode::Strict => {
                return Err(Error::WrongRecordLength {
                    stored: raw.record_length,
                    computed,
                })
            }
            ReadMode::Loose => {
                warn(Warning::RecordLengthMismatch {
                    stored: raw.record_length,
                    computed,
                });
                computed
            }
        }
    };

    Ok(Header {
        version,
        last_update: UpdateDate::from_raw(raw.last_update),
        record_count: raw.record_count.max(0) as u32,
        header_length: raw.header_length,
        record_length,
        fields,
    })
}

/// `1 + Σ size` over the descriptors.
pub(crate) fn record_length(fields: &[FieldDescriptor]) -> u16 {
    1 + fields.iter().map(|f| u16::from(f.size)).sum::<u16>()
}

/// `32-byte prelude + 32·N descriptors + terminator + pad`.
pub(crate) fn header_length(field_count: usize) -> u16 {
    34 + 32 * field_count as u16
}

/// Emits the complete header region of a new, empty file: prelude,
/// descriptors, terminator, one pad byte, and the EOF marker.
pub(crate) fn write_header(
    version: FileVersion,
    last_update: UpdateDate,
    fields: &[FieldDescriptor],
) -> Result<Vec<u8>, Error> {
    let mut cursor = Cursor::new(Vec::with_capacity(36 + 32 * fields.len()));
    RawHeader {
        version: version.code(),
        last_update: last_update.to_raw(),
        record_count: 0,
        header_length: header_length(fields.len()),
        record_length: record_length(fields),
        _reserved: [0; 20],
    }
    .write_le(&mut cursor)
    .map_err(IoError::other)?;
    for descriptor in fields {
        // Work-area id byte, at descriptor offset 0x14.
        let mut reserved1 = [0; 14];
        reserved1[2] = 1;
        RawFieldDescriptor {
            name: encode_name(&descriptor.name),
            field_type: descriptor.field_type.code(),
            _reserved0: [0; 4],
            size: descriptor.size,
            decimal_places: descriptor.decimal_places,
            _reserved1: reserved1,
        }
        .write_le(&mut cursor)
        .map_err(IoError::other)?;
    }
    let mut bytes = cursor.into_inner();
    bytes.push(DESCRIPTOR_TERMINATOR);
    bytes.push(0);
    bytes.push(EOF_MARKER);
    Ok(bytes)
}

/// Candidate paths for the memo sidecar of `path`, most likely first.
///
/// dBase versions swap the extension for `.dbt`.  Visual FoxPro pairs
/// `.dbf` with `.fpt`, and any other extension with its second character
/// replaced by `t` (`.pjx` → `.pjt`).  Both cases are tried because DOS
/// and Unix files disagree about them.
pub(crate) fn memo_path_candidates(path: &Path, version: FileVersion) -> Vec<PathBuf> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (lower, upper) = match version {
        FileVersion::VisualFoxPro9 if !extension.eq_ignore_ascii_case("dbf") => {
            let mut memo_ext: String = extension.chars().take(2).collect();
            memo_ext.push('t');
            (memo_ext.to_ascii_lowercase(), memo_ext.to_ascii_uppercase())
        }
        FileVersion::VisualFoxPro9 => (String::from("fpt"), String::from("FPT")),
        _ => (String::from("dbt"), String::from("DBT")),
    };
    vec![
        path.with_extension(lower),
        path.with_extension(upper),
    ]
}
