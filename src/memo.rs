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

//! Reading memo sidecar files.
//!
//! A memo file is an array of fixed-size blocks.  A memo value starts at
//! the block a record points to and may span several consecutive blocks;
//! where the value ends depends on the file version.  dBase III scans for a
//! `0x1A` terminator, dBase IV and Visual FoxPro put a length up front
//! (little-endian for dBase IV, big-endian for FoxPro).

use std::io::SeekFrom;
use std::path::Path;

use encoding_rs::Encoding;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::error::Error;
use crate::field::FileVersion;

const DEFAULT_BLOCK_SIZE: usize = 512;

/// Terminator byte ending a dBase III memo.  FoxPro-written files double
/// it; scanning for a single one covers both.
const MEMO_TERMINATOR: u8 = 0x1A;

/// Memo type tag for text in a Visual FoxPro file (0 is a picture).
const VFP_TEXT_MEMO: u32 = 1;

/// A reader over one open memo file.
///
/// One of these lives for the duration of a single record batch; the block
/// buffer is allocated once and reused for every block of every memo in
/// the batch.
#[derive(Debug)]
pub(crate) struct MemoReader<R = File> {
    reader: R,
    version: FileVersion,
    block_size: usize,
    file_size: u64,
    block: Vec<u8>,
}

impl MemoReader<File> {
    /// Opens the memo file at `path`.
    pub async fn open(path: &Path, version: FileVersion) -> Result<Self, Error> {
        let file = File::open(path).await?;
        let file_size = file.metadata().await?.len();
        Self::new(file, version, file_size).await
    }
}

impl<R> MemoReader<R>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    /// Wraps an open memo file, discovering its block size.
    pub async fn new(mut reader: R, version: FileVersion, file_size: u64) -> Result<Self, Error> {
        let block_size = match version {
            FileVersion::VisualFoxPro9 => {
                let mut header = [0; 8];
                reader.read_exact(&mut header).await?;
                match u16::from_be_bytes([header[6], header[7]]) {
                    0 => DEFAULT_BLOCK_SIZE,
                    size => size as usize,
                }
            }
            FileVersion::DBase4Memo => {
                let mut header = [0; 8];
                reader.read_exact(&mut header).await?;
                let size = i32::from_le_bytes([header[4], header[5], header[6], header[7]]);
                if size > 0 {
                    size as usize
                } else {
                    DEFAULT_BLOCK_SIZE
                }
            }
            _ => DEFAULT_BLOCK_SIZE,
        };
        Ok(Self {
            reader,
            version,
            block_size,
            file_size,
            block: vec![0; block_size],
        })
    }

    /// Resolves `block_index` into the full memo text.
    ///
    /// Returns `None` for a Visual FoxPro block that holds something other
    /// than text.  The accumulated bytes are transcoded once, at the end.
    pub async fn read_memo(
        &mut self,
        block_index: usize,
        encoding: &'static Encoding,
    ) -> Result<Option<String>, Error> {
        let start = block_index as u64 * self.block_size as u64;
        if start >= self.file_size {
            return Err(Error::MemoReadPastEnd { block: block_index });
        }
        let mut bytes = Vec::new();
        match self.version {
            FileVersion::DBase4Memo => self.read_dbase4(start, &mut bytes).await?,
            FileVersion::VisualFoxPro9 => {
                if !self.read_vfp9(start, &mut bytes).await? {
                    return Ok(None);
                }
            }
            _ => self.read_dbase3(start, &mut bytes).await?,
        }
        let (text, _malformed) = encoding.decode_without_bom_handling(&bytes);
        Ok(Some(text.into_owned()))
    }

    /// Reads the block starting at `position` into the block buffer,
    /// returning how many bytes of it are inside the file.
    async fn read_block(&mut self, position: u64) -> Result<usize, Error> {
        self.reader.seek(SeekFrom::Start(position)).await?;
        let available = (self.file_size.saturating_sub(position) as usize).min(self.block_size);
        self.reader.read_exact(&mut self.block[..available]).await?;
        Ok(available)
    }

    /// dBase III: no length header; the memo runs to a `0x1A` terminator.
    /// A file written without one ends at EOF.
    async fn read_dbase3(&mut self, mut position: u64, out: &mut Vec<u8>) -> Result<(), Error> {
        while position < self.file_size {
            let n = self.read_block(position).await?;
            match self.block[..n].iter().position(|&b| b == MEMO_TERMINATOR) {
                Some(end) => {
                    out.extend_from_slice(&self.block[..end]);
                    return Ok(());
                }
                None => {
                    out.extend_from_slice(&self.block[..n]);
                    position += self.block_size as u64;
                }
            }
        }
        Ok(())
    }

    /// dBase IV: the first block opens with `FF FF 08 00` and a u32 LE
    /// total length that includes that 8-byte header.
    async fn read_dbase4(&mut self, start: u64, out: &mut Vec<u8>) -> Result<(), Error> {
        let n = self.read_block(start).await?;
        if n < 8 {
            return Ok(());
        }
        let total = u32::from_le_bytes([self.block[4], self.block[5], self.block[6], self.block[7]])
            as usize;
        let mut remaining = total.saturating_sub(8);
        let take = remaining.min(n - 8);
        out.extend_from_slice(&self.block[8..8 + take]);
        remaining -= take;
        self.read_continuation(start, remaining, out).await
    }

    /// Visual FoxPro: u32 BE type tag then u32 BE data length.  Returns
    /// whether the block held text.
    async fn read_vfp9(&mut self, start: u64, out: &mut Vec<u8>) -> Result<bool, Error> {
        let n = self.read_block(start).await?;
        if n < 8 {
            return Ok(false);
        }
        let memo_type =
            u32::from_be_bytes([self.block[0], self.block[1], self.block[2], self.block[3]]);
        if memo_type != VFP_TEXT_MEMO {
            return Ok(false);
        }
        let mut remaining =
            u32::from_be_bytes([self.block[4], self.block[5], self.block[6], self.block[7]])
                as usize;
        let take = remaining.min(n - 8);
        out.extend_from_slice(&self.block[8..8 + take]);
        remaining -= take;
        self.read_continuation(start, remaining, out).await?;
        Ok(true)
    }

    /// Takes `remaining` more bytes from the blocks after the one at
    /// `start`.  A truncated file yields what it has.
    async fn read_continuation(
        &mut self,
        start: u64,
        mut remaining: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), Error> {
        let mut position = start + self.block_size as u64;
        while remaining > 0 && position < self.file_size {
            let n = self.read_block(position).await?;
            let take = remaining.min(n);
            out.extend_from_slice(&self.block[..take]);
            remaining -= take;
            position += self.block_size as u64;
        }
        Ok(())
    }
}
