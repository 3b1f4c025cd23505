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

//! Opening, creating, reading, and appending to DBF files.
//!
//! A [DbfFile] is the open-file handle.  It holds no OS file descriptor
//! between calls; every operation opens the file, does its I/O, and closes
//! it again.  What persists on the handle is the schema and two pieces of
//! mutable state: the read cursor and the record count.  The handle is not
//! reentrant; a single task drives it, and every filesystem call inside
//! is an await point.

use std::collections::VecDeque;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use futures::stream::Stream;
use tokio::fs::{metadata, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use crate::data::Record;
use crate::encoding::{EncodingConfig, FieldEncodings};
use crate::error::{Error, Warning};
use crate::field::{self, FieldDescriptor, FieldType, FileVersion};
use crate::header::{self, UpdateDate, EOF_MARKER};
use crate::memo::MemoReader;
use crate::record::{decode_record, encode_record, DELETED_FLAG};

/// How many records one random read pulls in at a time.
const READ_BATCH: usize = 1000;

/// How many records each step of the async stream fetches.
const STREAM_CHUNK: usize = 100;

/// Tolerance towards deviant files when opening.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Reject unknown versions and field types, missing memo files, and
    /// headers that contradict themselves.
    #[default]
    Strict,

    /// Tolerate all of those, reporting each as a [Warning].
    Loose,
}

/// Options for opening an existing DBF file.
///
/// ```no_run
/// use dbf::{EncodingConfig, ReaderOptions, ReadMode};
///
/// # async fn demo() -> Result<(), dbf::Error> {
/// let mut file = ReaderOptions::new()
///     .with_read_mode(ReadMode::Loose)
///     .with_encoding(EncodingConfig::new("tis-620").with_field("PNAME", "latin1"))
///     .open("WSPMST.DBF")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReaderOptions {
    read_mode: ReadMode,
    encoding: EncodingConfig,
    include_deleted: bool,
}

impl ReaderOptions {
    /// Constructs the default options: strict mode, ISO-8859-1, deleted
    /// records filtered out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `self` with the read mode set to `read_mode`.
    pub fn with_read_mode(self, read_mode: ReadMode) -> Self {
        Self { read_mode, ..self }
    }

    /// Returns `self` with the character-set configuration set to
    /// `encoding`.
    pub fn with_encoding(self, encoding: impl Into<EncodingConfig>) -> Self {
        Self {
            encoding: encoding.into(),
            ..self
        }
    }

    /// Returns `self` configured to yield deleted records too.
    pub fn with_include_deleted(self, include_deleted: bool) -> Self {
        Self {
            include_deleted,
            ..self
        }
    }

    /// Opens the DBF file at `path`, discarding warnings.
    pub async fn open(self, path: impl AsRef<Path>) -> Result<DbfFile, Error> {
        self.open_with_warnings(path, |_| ()).await
    }

    /// Opens the DBF file at `path`, reporting loose-mode recoveries to
    /// `warn`.
    pub async fn open_with_warnings(
        self,
        path: impl AsRef<Path>,
        mut warn: impl FnMut(Warning),
    ) -> Result<DbfFile, Error> {
        let path = path.as_ref().to_path_buf();
        let header = {
            let mut file = File::open(&path).await?;
            header::read_header(&mut file, self.read_mode, &mut warn).await?
        };

        let memo_path = if header.version.has_memo() {
            let candidates = header::memo_path_candidates(&path, header.version);
            let mut found = None;
            for candidate in &candidates {
                if metadata(candidate).await.is_ok() {
                    found = Some(candidate.clone());
                    break;
                }
            }
            match (found, self.read_mode) {
                (Some(memo_path), _) => Some(memo_path),
                (None, ReadMode::Strict) => {
                    return Err(Error::MissingMemoFile(
                        candidates.into_iter().next().unwrap_or(path),
                    ))
                }
                (None, ReadMode::Loose) => {
                    warn(Warning::MissingMemoFile(
                        candidates.into_iter().next().unwrap_or_else(|| path.clone()),
                    ));
                    None
                }
            }
        } else {
            None
        };

        let encodings = self.encoding.resolve()?;
        Ok(DbfFile {
            path,
            version: header.version,
            last_update: header.last_update,
            record_count: header.record_count as usize,
            fields: header.fields,
            encodings,
            read_mode: self.read_mode,
            include_deleted: self.include_deleted,
            cursor: 0,
            header_length: header.header_length as usize,
            record_length: header.record_length as usize,
            memo_path,
        })
    }
}

/// Options for creating a new DBF file.
#[derive(Clone, Debug, Default)]
pub struct CreateOptions {
    file_version: FileVersion,
    encoding: EncodingConfig,
}

impl CreateOptions {
    /// Constructs the default options: dBase III, ISO-8859-1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `self` with the file version set to `file_version`.
    pub fn with_file_version(self, file_version: FileVersion) -> Self {
        Self {
            file_version,
            ..self
        }
    }

    /// Returns `self` with the character-set configuration set to
    /// `encoding`.
    pub fn with_encoding(self, encoding: impl Into<EncodingConfig>) -> Self {
        Self {
            encoding: encoding.into(),
            ..self
        }
    }

    /// Creates a new, empty DBF file at `path`.
    ///
    /// Fails if a file already exists there, if any descriptor is invalid,
    /// or if any field is a memo field (memo writing is unsupported).
    pub async fn create(
        self,
        path: impl AsRef<Path>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<DbfFile, Error> {
        let path = path.as_ref().to_path_buf();
        if let FileVersion::Unknown(code) = self.file_version {
            return Err(Error::UnsupportedVersion(code));
        }
        if fields.iter().any(|f| f.field_type == FieldType::Memo) {
            return Err(Error::MemoWriteUnsupported);
        }
        for descriptor in &fields {
            descriptor.validate(self.file_version)?;
        }
        field::check_unique_names(&fields)?;
        let encodings = self.encoding.resolve()?;

        let last_update = UpdateDate::today();
        let bytes = header::write_header(self.file_version, last_update, &fields)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        Ok(DbfFile {
            path,
            version: self.file_version,
            last_update,
            record_count: 0,
            record_length: header::record_length(&fields) as usize,
            header_length: header::header_length(fields.len()) as usize,
            fields,
            encodings,
            read_mode: ReadMode::Strict,
            include_deleted: false,
            cursor: 0,
            memo_path: None,
        })
    }
}

/// An open DBF file.
#[derive(Debug)]
pub struct DbfFile {
    path: PathBuf,
    version: FileVersion,
    last_update: UpdateDate,
    record_count: usize,
    fields: Vec<FieldDescriptor>,
    encodings: FieldEncodings,
    read_mode: ReadMode,
    include_deleted: bool,
    cursor: usize,
    header_length: usize,
    record_length: usize,
    memo_path: Option<PathBuf>,
}

impl DbfFile {
    /// Opens the DBF file at `path` with default options.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        ReaderOptions::new().open(path).await
    }

    /// Creates a new DBF file at `path` with default options.
    pub async fn create(
        path: impl AsRef<Path>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, Error> {
        CreateOptions::new().create(path, fields).await
    }

    /// The path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file's version.
    pub fn file_version(&self) -> FileVersion {
        self.version
    }

    /// Number of records in the file, deleted ones included.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// The header's date-of-last-update triple.
    pub fn date_of_last_update(&self) -> UpdateDate {
        self.last_update
    }

    /// The field descriptors, in file order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The read mode the file was opened with.
    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    /// Reads up to `max_count` records, starting at the read cursor.
    ///
    /// The cursor advances past every record visited, including deleted
    /// ones being skipped, so successive calls return disjoint contiguous
    /// runs.  I/O happens in batches of up to 1000 records.
    pub async fn read_records(&mut self, max_count: usize) -> Result<Vec<Record>, Error> {
        let mut output = Vec::new();
        if max_count == 0 || self.cursor >= self.record_count {
            return Ok(output);
        }
        let mut file = File::open(&self.path).await?;
        let mut memo = match &self.memo_path {
            Some(memo_path) => Some(MemoReader::open(memo_path, self.version).await?),
            None => None,
        };
        let mut buffer = vec![0; READ_BATCH * self.record_length];
        let mut position = (self.header_length + self.record_length * self.cursor) as u64;
        loop {
            let remaining_in_file = self.record_count - self.cursor;
            let remaining_in_request = max_count - output.len();
            let this_batch = remaining_in_file.min(remaining_in_request).min(READ_BATCH);
            if this_batch == 0 {
                break;
            }
            let len = this_batch * self.record_length;
            file.seek(SeekFrom::Start(position)).await?;
            file.read_exact(&mut buffer[..len]).await?;
            position += len as u64;
            self.cursor += this_batch;
            for frame in buffer[..len].chunks_exact(self.record_length) {
                if frame[0] == DELETED_FLAG && !self.include_deleted {
                    continue;
                }
                output.push(
                    decode_record(frame, &self.fields, &self.encodings, self.version, &mut memo)
                        .await?,
                );
            }
        }
        Ok(output)
    }

    /// Reads every record from the cursor to the end of the file.
    pub async fn read_all_records(&mut self) -> Result<Vec<Record>, Error> {
        self.read_records(usize::MAX).await
    }

    /// Appends `records` to the end of the file.
    ///
    /// Each record is validated against the descriptors as it is encoded;
    /// on error, the in-memory record count is unchanged and the bytes of
    /// any half-appended record are overwritten by the next successful
    /// append.
    pub async fn append_records(&mut self, records: &[Record]) -> Result<(), Error> {
        if records.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .await?;
        let mut position = (self.header_length + self.record_length * self.record_count) as u64;
        let mut frame = Vec::with_capacity(self.record_length);
        let mut appended = 0;
        for record in records {
            encode_record(record, &self.fields, &self.encodings, &mut frame)?;
            file.seek(SeekFrom::Start(position)).await?;
            file.write_all(&frame).await?;
            position += self.record_length as u64;
            appended += 1;
        }
        file.seek(SeekFrom::Start(position)).await?;
        file.write_all(&[EOF_MARKER]).await?;
        self.record_count += appended;
        file.seek(SeekFrom::Start(4)).await?;
        file.write_all(&(self.record_count as i32).to_le_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }

    /// Streams the remaining records, fetching 100 at a time.
    ///
    /// The stream borrows the handle; the cursor it advances is the same
    /// one [read_records](Self::read_records) uses.
    pub fn records(&mut self) -> impl Stream<Item = Result<Record, Error>> + '_ {
        futures::stream::try_unfold(
            (self, VecDeque::new()),
            |(this, mut pending)| async move {
                while pending.is_empty() && this.cursor < this.record_count {
                    pending = VecDeque::from(this.read_records(STREAM_CHUNK).await?);
                }
                Ok(pending.pop_front().map(|record| (record, (this, pending))))
            },
        )
    }
}
