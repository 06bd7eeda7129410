//! Magic-byte shims around the gzip boundary
//!
//! A C4Group file is a standard gzip member whose first two bytes `1f 8b`
//! are replaced by `1e 8c` on disk. These adapters translate between the
//! two so any conformant gzip codec can sit behind them: [`MagicReader`]
//! rewrites the leading bytes before they reach the decoder, and
//! [`MagicWriter`] swaps them back out of the encoder's output.

use std::io::{self, Read, Write};

use crate::{C4GZ_MAGIC1, C4GZ_MAGIC2, Error};

const GZIP_ID1: u8 = 0x1f;
const GZIP_ID2: u8 = 0x8b;

/// Adapter translating the C4Group magic bytes to gzip magic bytes.
///
/// Fails with [`Error::InvalidMagic`] (wrapped in the returned `io::Error`)
/// when the stream does not start with `1e 8c`. Handles a first read that
/// delivers only a single byte.
#[derive(Debug)]
pub struct MagicReader<R> {
    inner: R,
    fixed: usize,
}

impl<R: Read> MagicReader<R> {
    /// Create a new shim reading from `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner, fixed: 0 }
    }

    /// Unwrap the shim, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for MagicReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if read == 0 || self.fixed >= 2 {
            return Ok(read);
        }
        // The first read might deliver a single byte, so handle both
        // magic bytes separately.
        let already = self.fixed;
        if already == 0 {
            if buf[0] != C4GZ_MAGIC1 {
                return Err(Error::InvalidMagic.into_io());
            }
            buf[0] = GZIP_ID1;
            self.fixed += 1;
        }
        if already + read >= 2 {
            let i = 1 - already;
            if buf[i] != C4GZ_MAGIC2 {
                return Err(Error::InvalidMagic.into_io());
            }
            buf[i] = GZIP_ID2;
            self.fixed += 1;
        }
        Ok(read)
    }
}

/// Adapter replacing the gzip magic bytes with the C4Group magic bytes.
///
/// Emits `1e 8c` ahead of the first write and swallows the first two
/// upstream bytes (the encoder's `1f 8b`). Everything after passes through
/// verbatim.
#[derive(Debug)]
pub struct MagicWriter<W> {
    inner: W,
    wrote_magic: bool,
    swallow: usize,
}

impl<W: Write> MagicWriter<W> {
    /// Create a new shim writing to `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            wrote_magic: false,
            swallow: 2,
        }
    }

    /// Unwrap the shim, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for MagicWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_magic {
            self.inner.write_all(&[C4GZ_MAGIC1, C4GZ_MAGIC2])?;
            self.wrote_magic = true;
        }
        if self.swallow > 0 {
            let n = self.swallow.min(buf.len());
            self.swallow -= n;
            if n == buf.len() {
                return Ok(n);
            }
            let written = self.inner.write(&buf[n..])?;
            return Ok(n + written);
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
