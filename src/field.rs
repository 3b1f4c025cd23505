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

//! File versions, field types, and field descriptors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error as ThisError;

/// An error in a field descriptor or a descriptor table.
#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Two fields share a name.
    #[error("Duplicate field name: '{0}'")]
    DuplicateFieldName(String),

    /// A field name is empty or longer than the 10 bytes the descriptor
    /// slot can hold.
    #[error("Field name {0:?} is not between 1 and 10 bytes long.")]
    FieldNameInvalid(String),

    /// A field's size or decimal count is outside the range its type
    /// allows.
    #[error("Field {name}: size {size} with {decimal_places} decimal places is not valid for type {field_type}.")]
    FieldSizeInvalid {
        /// Name of the offending field.
        name: String,
        /// Its type.
        field_type: FieldType,
        /// The rejected size.
        size: u8,
        /// The rejected decimal count.
        decimal_places: u8,
    },

    /// A field carries a type code this library cannot decode.
    #[error("Field {name}: unsupported field type '{}'.", *code as char)]
    UnsupportedFieldType {
        /// Name of the offending field.
        name: String,
        /// The raw type byte.
        code: u8,
    },
}

/// The version byte of a DBF file.
///
/// The version governs which memo sidecar accompanies the file and how that
/// sidecar frames its blocks.  Codes outside the supported set are carried
/// as [FileVersion::Unknown]; such files can be read in loose mode but
/// never created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FileVersion {
    /// dBase III without memo fields (`0x03`).
    #[default]
    DBase3,
    /// dBase III with a `.dbt` memo file (`0x83`).
    DBase3Memo,
    /// dBase IV with a `.dbt` memo file (`0x8B`).
    DBase4Memo,
    /// Visual FoxPro 9 with an `.fpt` memo file (`0x30`).
    VisualFoxPro9,
    /// Any other version byte.
    Unknown(u8),
}

impl FileVersion {
    /// Returns the version for a raw header byte.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x03 => Self::DBase3,
            0x83 => Self::DBase3Memo,
            0x8B => Self::DBase4Memo,
            0x30 => Self::VisualFoxPro9,
            other => Self::Unknown(other),
        }
    }

    /// Returns the raw header byte for this version.
    pub fn code(self) -> u8 {
        match self {
            Self::DBase3 => 0x03,
            Self::DBase3Memo => 0x83,
            Self::DBase4Memo => 0x8B,
            Self::VisualFoxPro9 => 0x30,
            Self::Unknown(code) => code,
        }
    }

    /// Whether files of this version have a memo sidecar.
    pub fn has_memo(self) -> bool {
        matches!(
            self,
            Self::DBase3Memo | Self::DBase4Memo | Self::VisualFoxPro9
        )
    }
}

impl Display for FileVersion {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let name = match self {
            Self::DBase3 => "dBase III",
            Self::DBase3Memo => "dBase III with memo",
            Self::DBase4Memo => "dBase IV with memo",
            Self::VisualFoxPro9 => "Visual FoxPro 9",
            Self::Unknown(_) => "unknown",
        };
        write!(f, "{:#04x} ({name})", self.code())
    }
}

/// The type of one field, from the single-letter code in its descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// `C`: fixed-width text, space-padded.
    Character,
    /// `N`: a number stored as right-aligned decimal text.
    Numeric,
    /// `F`: float-as-text; same representation as `N`.
    Float,
    /// `L`: a single-byte logical.
    Logical,
    /// `D`: an 8-byte `YYYYMMDD` date.
    Date,
    /// `I`: a 32-bit little-endian signed integer.
    Integer,
    /// `T`: a Visual FoxPro datetime (Julian day + ms since midnight).
    DateTime,
    /// `B`: an IEEE-754 little-endian double.
    Double,
    /// `M`: a reference into the memo file.
    Memo,
    /// Any other type code, retained but never decoded.
    Unknown(u8),
}

impl FieldType {
    /// Returns the type for a raw descriptor byte.
    pub fn from_code(code: u8) -> Self {
        match code {
            b'C' => Self::Character,
            b'N' => Self::Numeric,
            b'F' => Self::Float,
            b'L' => Self::Logical,
            b'D' => Self::Date,
            b'I' => Self::Integer,
            b'T' => Self::DateTime,
            b'B' => Self::Double,
            b'M' => Self::Memo,
            other => Self::Unknown(other),
        }
    }

    /// Returns the raw descriptor byte for this type.
    pub fn code(self) -> u8 {
        match self {
            Self::Character => b'C',
            Self::Numeric => b'N',
            Self::Float => b'F',
            Self::Logical => b'L',
            Self::Date => b'D',
            Self::Integer => b'I',
            Self::DateTime => b'T',
            Self::Double => b'B',
            Self::Memo => b'M',
            Self::Unknown(code) => code,
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.code() as char)
    }
}

/// The description of one column of a DBF file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name, at most 10 bytes of ISO-8859-1.
    pub name: String,

    /// Field type.
    pub field_type: FieldType,

    /// Width of the field within a record frame, in bytes.
    pub size: u8,

    /// Digits to the right of the decimal point, for `N` and `F` fields.
    pub decimal_places: u8,
}

impl FieldDescriptor {
    /// Constructs a descriptor with no decimal places.
    pub fn new(name: impl Into<String>, field_type: FieldType, size: u8) -> Self {
        Self {
            name: name.into(),
            field_type,
            size,
            decimal_places: 0,
        }
    }

    /// Returns `self` with the decimal count set to `decimal_places`.
    pub fn with_decimal_places(self, decimal_places: u8) -> Self {
        Self {
            decimal_places,
            ..self
        }
    }

    /// Checks this descriptor against the layout rules for `version`.
    pub fn validate(&self, version: FileVersion) -> Result<(), Error> {
        // Names are stored as ISO-8859-1, one byte per character, so the
        // 10-byte descriptor slot holds 10 characters.
        if self.name.is_empty() || self.name.chars().count() > 10 {
            return Err(Error::FieldNameInvalid(self.name.clone()));
        }
        let size_ok = match self.field_type {
            FieldType::Character => self.size >= 1,
            FieldType::Numeric | FieldType::Float => (1..=20).contains(&self.size),
            FieldType::Logical => self.size == 1,
            FieldType::Date | FieldType::DateTime | FieldType::Double => self.size == 8,
            FieldType::Integer => self.size == 4,
            // Visual FoxPro stores the memo reference as an int32; the
            // older versions store 10 decimal digits.
            FieldType::Memo => {
                self.size == if version == FileVersion::VisualFoxPro9 { 4 } else { 10 }
            }
            FieldType::Unknown(code) => {
                return Err(Error::UnsupportedFieldType {
                    name: self.name.clone(),
                    code,
                })
            }
        };
        let decimals_ok = match self.field_type {
            FieldType::Numeric | FieldType::Float => {
                let max = if version == FileVersion::DBase4Memo {
                    18
                } else {
                    15
                };
                self.decimal_places <= max
            }
            _ => true,
        };
        if size_ok && decimals_ok {
            Ok(())
        } else {
            Err(Error::FieldSizeInvalid {
                name: self.name.clone(),
                field_type: self.field_type,
                size: self.size,
                decimal_places: self.decimal_places,
            })
        }
    }
}

/// Checks that no two descriptors share a name.
pub(crate) fn check_unique_names(fields: &[FieldDescriptor]) -> Result<(), Error> {
    match fields.iter().map(|f| f.name.as_str()).duplicates().next() {
        Some(name) => Err(Error::DuplicateFieldName(name.into())),
        None => Ok(()),
    }
}
