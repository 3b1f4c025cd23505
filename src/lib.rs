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

//! # dbf
//!
//! Reading and writing dBase-family database files.
//!
//! The `.dbf` format dates back to the early 1980s and never really went
//! away: point-of-sale systems, GIS shapefiles, and government data drops
//! still produce it.  This crate reads and writes the dBase III (`0x03`,
//! `0x83`), dBase IV (`0x8B`), and Visual FoxPro 9 (`0x30`) layouts,
//! including the text held in `.dbt`/`.fpt` memo sidecar files, which each
//! version frames differently.
//!
//! All I/O is asynchronous on tokio.  A [DbfFile] keeps no file descriptor
//! between calls; each operation opens the file, works in batches, and
//! closes it.
//!
//! ```no_run
//! use dbf::DbfFile;
//!
//! # async fn demo() -> Result<(), dbf::Error> {
//! let mut file = DbfFile::open("PYACFL.DBF").await?;
//! println!(
//!     "{} records, last updated {}",
//!     file.record_count(),
//!     file.date_of_last_update()
//! );
//! for record in file.read_all_records().await? {
//!     println!("{:?}", record.text("AFCLPD"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Files whose text is not Latin-1 take an [EncodingConfig], per file or
//! per field; deviant files can be opened with
//! [ReadMode::Loose](file::ReadMode::Loose), which downgrades unknown
//! versions, unknown field types, and missing memo files from errors to
//! [Warning]s.
//!
//! Not covered: index sidecars (`.mdx`, `.ndx`, `.cdx`), writing memo
//! fields, rewriting existing records in place, and coordinating
//! concurrent writers.

pub mod calendar;
pub mod data;
pub mod encoding;
pub mod error;
pub mod field;
pub mod file;
pub mod header;
mod memo;
mod record;

pub use data::{Record, Value};
pub use encoding::EncodingConfig;
pub use error::{Error, Warning};
pub use field::{FieldDescriptor, FieldType, FileVersion};
pub use file::{CreateOptions, DbfFile, ReadMode, ReaderOptions};
pub use header::UpdateDate;
