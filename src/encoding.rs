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

//! Character encodings for DBF text data.
//!
//! Text in a DBF file is stored in some legacy character set, named here by
//! WHATWG encoding label and resolved through [encoding_rs].  A file may use
//! one encoding throughout, or different encodings for individual fields
//! (mixed-script data sets in the wild really do this).  Field *names* in
//! the descriptor table are always ISO-8859-1, regardless of the data
//! encoding.

use std::collections::HashMap;

use encoding_rs::mem::decode_latin1;
use encoding_rs::Encoding;
use thiserror::Error as ThisError;

/// An error resolving a character-set configuration.
#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The label does not name an encoding the transcoder knows.
    #[error("Unsupported character encoding {0:?}.")]
    UnsupportedEncoding(String),
}

/// Character-set configuration for a DBF file.
///
/// Labels are resolved eagerly when a file is opened or created, so a typo
/// fails fast instead of surfacing mid-read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodingConfig {
    /// One label for every field.
    Single(String),

    /// A default label plus per-field overrides, keyed by field name.
    PerField {
        /// Label used for fields without an override.
        default: String,
        /// Field name to label overrides.
        fields: HashMap<String, String>,
    },
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self::Single(String::from("ISO-8859-1"))
    }
}

impl From<&str> for EncodingConfig {
    fn from(label: &str) -> Self {
        Self::Single(label.into())
    }
}

impl From<String> for EncodingConfig {
    fn from(label: String) -> Self {
        Self::Single(label)
    }
}

impl EncodingConfig {
    /// Returns a configuration using `label` for every field.
    pub fn new(label: impl Into<String>) -> Self {
        Self::Single(label.into())
    }

    /// Returns `self` with `label` overriding the encoding for `field`.
    pub fn with_field(self, field: impl Into<String>, label: impl Into<String>) -> Self {
        let (default, mut fields) = match self {
            Self::Single(default) => (default, HashMap::new()),
            Self::PerField { default, fields } => (default, fields),
        };
        fields.insert(field.into(), label.into());
        Self::PerField { default, fields }
    }

    /// Resolves every label in the configuration.
    pub fn resolve(&self) -> Result<FieldEncodings, Error> {
        match self {
            Self::Single(label) => Ok(FieldEncodings {
                default: lookup(label)?,
                fields: HashMap::new(),
            }),
            Self::PerField { default, fields } => Ok(FieldEncodings {
                default: lookup(default)?,
                fields: fields
                    .iter()
                    .map(|(name, label)| Ok((name.clone(), lookup(label)?)))
                    .collect::<Result<_, Error>>()?,
            }),
        }
    }
}

fn lookup(label: &str) -> Result<&'static Encoding, Error> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnsupportedEncoding(label.into()))
}

/// A resolved [EncodingConfig]: every label replaced by its encoding.
#[derive(Clone, Debug)]
pub struct FieldEncodings {
    default: &'static Encoding,
    fields: HashMap<String, &'static Encoding>,
}

impl FieldEncodings {
    /// Returns the encoding to use for the field named `name`.
    pub fn for_field(&self, name: &str) -> &'static Encoding {
        self.fields.get(name).copied().unwrap_or(self.default)
    }
}

/// Decodes a descriptor-table field name: ISO-8859-1, NUL-padded.
pub(crate) fn decode_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    decode_latin1(&bytes[..end]).into_owned()
}

/// Encodes a field name into its 11-byte descriptor slot: ISO-8859-1 with
/// NUL padding.  Code points outside Latin-1 have no representation and
/// become `?`.
pub(crate) fn encode_name(name: &str) -> [u8; 11] {
    let mut out = [0; 11];
    for (slot, c) in out.iter_mut().take(10).zip(name.chars()) {
        *slot = if (c as u32) <= 0xFF { c as u8 } else { b'?' };
    }
    out
}
