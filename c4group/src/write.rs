//! Streaming C4Group writer
//!
//! [`GroupWriter`] enforces the archive framing as a state machine: one
//! header, the declared number of entry records, then exactly the declared
//! payload bytes. Nested groups are written through [`create_sub_group`],
//! which frames a complete child archive inside the parent's current
//! payload slot.
//!
//! [`create_sub_group`]: GroupWriter::create_sub_group

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, trace};

use crate::format::{self, GroupEntry, GroupHeader};
use crate::magic::MagicWriter;
use crate::{Error, Result};

/// Sequential writer for C4Group archives.
///
/// Only the top-level writer owns the gzip encoder; call
/// [`finish`](GroupWriter::finish) on it to flush and recover the sink.
/// Nested writers borrow their parent and end with
/// [`close`](GroupWriter::close).
pub struct GroupWriter<W: Write> {
    w: W,
    /// Running payload offset, advanced by each entry record's size.
    offset: u64,
    /// Payload bytes written so far.
    written: u64,
    have_header: bool,
    /// Entry records still owed after the header.
    expected_entries: u32,
}

impl<W: Write> std::fmt::Debug for GroupWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupWriter")
            .field("offset", &self.offset)
            .field("written", &self.written)
            .field("have_header", &self.have_header)
            .field("expected_entries", &self.expected_entries)
            .finish()
    }
}

impl<W: Write> GroupWriter<GzEncoder<MagicWriter<W>>> {
    /// Create a top-level writer emitting a complete C4Group file to
    /// `sink`.
    pub fn new(sink: W) -> Self {
        Self::from_stream(GzEncoder::new(
            MagicWriter::new(sink),
            Compression::default(),
        ))
    }

    /// Validate the payload accounting, finalize the gzip stream and
    /// return the sink.
    ///
    /// Fails with [`Error::NotEnoughWritten`] if declared payload bytes
    /// are missing.
    pub fn finish(self) -> Result<W> {
        self.ensure_complete()?;
        let magic = self.w.finish().map_err(Error::from_io)?;
        Ok(magic.into_inner())
    }
}

impl<W: Write> GroupWriter<W> {
    /// Wrap an already-framed byte stream. Used for nested groups and by
    /// the packer.
    pub(crate) fn from_stream(w: W) -> Self {
        Self {
            w,
            offset: 0,
            written: 0,
            have_header: false,
            expected_entries: 0,
        }
    }

    /// Write the group header. Must be called exactly once, before
    /// anything else.
    pub fn write_header(&mut self, header: &GroupHeader) -> Result<()> {
        if self.have_header {
            return Err(Error::HeaderAlreadyWritten);
        }
        format::write_header(&mut self.w, header)?;
        self.have_header = true;
        self.expected_entries = header.entries;
        debug!(entries = header.entries, "wrote group header");
        Ok(())
    }

    /// Write one entry record. The payload offset is filled in from the
    /// running cursor.
    pub fn write_entry(&mut self, entry: &GroupEntry) -> Result<()> {
        if !self.have_header {
            return Err(Error::NoHeader);
        }
        if self.expected_entries == 0 {
            return Err(Error::TooManyEntries);
        }
        let offset = u32::try_from(self.offset).map_err(|_| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "payload region exceeds the 32-bit offset field",
            ))
        })?;
        format::write_entry(&mut self.w, entry, offset)?;
        self.offset += u64::from(entry.size);
        self.expected_entries -= 1;
        trace!(name = %entry.name, size = entry.size, offset, "wrote entry record");
        Ok(())
    }

    /// Start a nested group inside the current payload slot.
    ///
    /// The child's bytes count against this writer's payload accounting,
    /// so the enclosing entry's `size` must equal the child's exact
    /// on-disk size (`204 + entries * 316 + payloads`).
    pub fn create_sub_group(
        &mut self,
        header: &GroupHeader,
    ) -> Result<GroupWriter<&mut (dyn Write + '_)>> {
        let mut sub = GroupWriter::from_stream(self as &mut dyn Write);
        sub.write_header(header)?;
        Ok(sub)
    }

    /// Validate that every declared payload byte was written.
    ///
    /// For nested writers this is the whole close protocol; a top-level
    /// writer should use [`finish`](GroupWriter::finish) instead so the
    /// gzip stream is finalized explicitly.
    pub fn close(self) -> Result<()> {
        self.ensure_complete()
    }

    fn ensure_complete(&self) -> Result<()> {
        if self.written < self.offset {
            return Err(Error::NotEnoughWritten);
        }
        Ok(())
    }
}

/// Writes payload bytes for the previously declared entries.
///
/// Violations surface as `io::Error`s wrapping [`Error::NoHeader`],
/// [`Error::NotEnoughEntries`] or [`Error::TooMuchWritten`]; an oversized
/// write is rejected before any byte reaches the stream.
impl<W: Write> Write for GroupWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.have_header {
            return Err(Error::NoHeader.into_io());
        }
        if self.expected_entries != 0 {
            return Err(Error::NotEnoughEntries.into_io());
        }
        if self.written + buf.len() as u64 > self.offset {
            return Err(Error::TooMuchWritten.into_io());
        }
        let n = self.w.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}
