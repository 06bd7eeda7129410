//! Streaming C4Group reader
//!
//! [`GroupReader`] decodes the group header and the complete entry table up
//! front, then exposes a strictly sequential cursor over the payload
//! region. The entry table is buffered deliberately so the listing can be
//! inspected without touching the compressed stream again.

use std::io::{self, Read};

use flate2::read::GzDecoder;
use tracing::{debug, trace};

use crate::format::{self, GroupEntry, GroupHeader};
use crate::magic::MagicReader;
use crate::{Error, Result};

/// Read access to a C4Group archive.
///
/// Created with [`GroupReader::new`] for the top level, or with
/// [`GroupReader::read_group`] for an entry carrying a nested group. A
/// nested reader borrows the parent's decompressed stream; the borrow ends
/// when the nested reader is dropped. Only the top-level reader owns the
/// gzip decoder, which is released on drop.
#[derive(Debug)]
pub struct GroupReader<R: Read> {
    header: GroupHeader,
    entries: Vec<GroupEntry>,
    /// Payload offset of each entry, from the entry table.
    offsets: Vec<u32>,
    r: R,
    /// Position within the payload region (0 = start of first payload).
    offset: u64,
    /// Index of the current entry, `None` before the first `next_entry`.
    cur: Option<usize>,
}

impl<R: Read> GroupReader<GzDecoder<MagicReader<R>>> {
    /// Open a top-level archive, validating its magic bytes and header.
    pub fn new(source: R) -> Result<Self> {
        Self::open(GzDecoder::new(MagicReader::new(source)))
    }
}

impl<R: Read> GroupReader<R> {
    /// Read the group header and the full entry table from `r`.
    fn open(mut r: R) -> Result<Self> {
        let header = format::read_header(&mut r)?;
        let count = header.entries as usize;
        debug!(entries = count, author = %header.author, "opened group");

        // Guard the preallocation against absurd counts in corrupt
        // headers; reading the records hits EOF long before that.
        let mut entries = Vec::with_capacity(count.min(1 << 16));
        let mut offsets = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            let (entry, offset) = format::read_entry(&mut r)?;
            entries.push(entry);
            offsets.push(offset);
        }

        Ok(Self {
            header,
            entries,
            offsets,
            r,
            offset: 0,
            cur: None,
        })
    }

    /// The parsed group header.
    pub fn header(&self) -> &GroupHeader {
        &self.header
    }

    /// All entries of this group, in on-disk order.
    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    /// Advance to the next entry, discarding any unread payload bytes of
    /// the current one.
    ///
    /// Returns `Ok(None)` once all entries have been visited.
    pub fn next_entry(&mut self) -> Result<Option<&GroupEntry>> {
        let next = match self.cur {
            None => 0,
            Some(i) => i + 1,
        };
        if next >= self.entries.len() {
            return Ok(None);
        }
        // Skip to the entry's payload. The gap is usually the rest of the
        // current entry, but the table may also declare holes between
        // payloads.
        let target = u64::from(self.offsets[next]);
        if self.offset < target {
            let gap = target - self.offset;
            trace!(gap, entry = %self.entries[next].name, "skipping to payload");
            let skipped = io::copy(&mut (&mut self.r).take(gap), &mut io::sink())
                .map_err(Error::from_io)?;
            self.offset += skipped;
            if skipped < gap {
                return Err(Error::Io(io::ErrorKind::UnexpectedEof.into()));
            }
        }
        self.cur = Some(next);
        Ok(Some(&self.entries[next]))
    }

    /// Open the current entry as a nested group sharing this reader's
    /// decompressed stream.
    ///
    /// Fails with [`Error::NoChildGroup`] if the entry does not carry the
    /// child-group flag, or [`Error::AlreadyRead`] if payload bytes of the
    /// entry were already consumed.
    pub fn read_group(&mut self) -> Result<GroupReader<&mut (dyn Read + '_)>> {
        let cur = match self.cur {
            Some(cur) => cur,
            None => return Err(Error::NoChildGroup),
        };
        if !self.entries[cur].is_group {
            return Err(Error::NoChildGroup);
        }
        if self.offset != u64::from(self.offsets[cur]) {
            return Err(Error::AlreadyRead);
        }
        trace!(entry = %self.entries[cur].name, "descending into child group");
        GroupReader::open(self as &mut dyn Read)
    }
}

/// Reads the current entry's payload, never crossing the entry boundary.
/// Returns `Ok(0)` once the entry's declared size has been delivered.
impl<R: Read> Read for GroupReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(cur) = self.cur else {
            return Ok(0);
        };
        let end = u64::from(self.offsets[cur]) + u64::from(self.entries[cur].size);
        let remaining = end.saturating_sub(self.offset);
        if remaining == 0 {
            return Ok(0);
        }
        let max = remaining.min(buf.len() as u64) as usize;
        let n = self.r.read(&mut buf[..max])?;
        self.offset += n as u64;
        Ok(n)
    }
}
