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

//! Errors and warnings.

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::{encoding, field};

/// An error opening, creating, reading, or appending to a DBF file.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The version byte is not one this library supports.
    #[error("Unsupported file version {0:#04x}.")]
    UnsupportedVersion(u8),

    /// The version calls for a memo sidecar, but none exists.
    #[error("Memo file not found for {}.", .0.display())]
    MissingMemoFile(PathBuf),

    /// The field descriptor table is not terminated by `0x0D`.
    #[error("Field descriptors are not terminated by 0x0D.")]
    BadHeaderTerminator,

    /// The record length in the header contradicts the field sizes.
    #[error("Record length {stored} in the header does not match the {computed} bytes implied by the field descriptors.")]
    WrongRecordLength {
        /// The length stored in the header.
        stored: u16,
        /// `1 + Σ size` over the descriptors.
        computed: u16,
    },

    /// Memo fields can be read but never written.
    #[error("Writing to files with memo fields is not supported.")]
    MemoWriteUnsupported,

    /// A record references a memo block beyond the end of the memo file.
    #[error("Memo block {block} lies past the end of the memo file.")]
    MemoReadPastEnd {
        /// The out-of-range block index.
        block: usize,
    },

    /// A value has the wrong type for the field it is bound to.
    #[error("{field}: expected a {expected}")]
    ValueTypeMismatch {
        /// Name of the field, verbatim.
        field: String,
        /// The kind of value the field takes.
        expected: &'static str,
    },

    /// Text too long for any character field.
    #[error("{field}: text is too long (maximum length is 255 chars)")]
    TextTooLong {
        /// Name of the field, verbatim.
        field: String,
    },

    /// A bad field descriptor or descriptor table.
    #[error("{0}")]
    Field(#[from] field::Error),

    /// A bad character-set configuration.
    #[error("{0}")]
    Encoding(#[from] encoding::Error),

    /// An operating-system I/O failure.
    #[error("I/O error ({0})")]
    Io(#[from] IoError),
}

/// A recoverable oddity found while opening a file in loose mode.
///
/// In strict mode each of these is an [Error] instead.
#[derive(ThisError, Debug)]
pub enum Warning {
    /// The version byte is unknown; the file is read as if memoless
    /// dBase III.
    #[error("Unsupported file version {0:#04x}; reading anyway.")]
    UnknownVersion(u8),

    /// The memo sidecar is missing; memo values will decode as null.
    #[error("Memo file not found for {}; memo values will read as null.", .0.display())]
    MissingMemoFile(PathBuf),

    /// A field has an undecodable type; it is skipped during decoding.
    #[error("Field {name} has unsupported type '{}' and will not be decoded.", *code as char)]
    UnknownFieldType {
        /// Name of the field.
        name: String,
        /// The raw type byte.
        code: u8,
    },

    /// The header's record length disagrees with the field sizes; the
    /// computed value is used.
    #[error("Record length {stored} in the header does not match the {computed} bytes implied by the field descriptors; using {computed}.")]
    RecordLengthMismatch {
        /// The length stored in the header.
        stored: u16,
        /// `1 + Σ size` over the descriptors.
        computed: u16,
    },
}
