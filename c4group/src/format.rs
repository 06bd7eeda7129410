//! On-disk layout of C4Group headers and entry records
//!
//! Both records are fixed-size with little-endian integer fields and
//! NUL-terminated string fields. Group headers are additionally run through
//! [`scramble`] before compression; entry records are stored as plain
//! structs. That asymmetry is part of the format.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{C4GROUP_FILE_ID, C4GROUP_FILE_VER1, C4GROUP_FILE_VER2, Error, Result};

/// Size of the group header on disk, in bytes.
pub const HEADER_SIZE: usize = 204;

/// Size of each entry record on disk, in bytes.
pub const ENTRY_SIZE: usize = 316;

/// `Original` field value marking an original pack.
pub const ORIGINAL_MAGIC: u32 = 1_234_567;

const FILENAME_LEN: usize = 260;
const AUTHOR_LEN: usize = 32;

/// Obfuscate or deobfuscate a header block in place.
///
/// XORs every byte with 237, then swaps the outer bytes of each 3-byte
/// stride (0↔2, 3↔5, …). A trailing 1- or 2-byte tail is left alone. The
/// transform is its own inverse.
pub fn scramble(buffer: &mut [u8]) {
    for b in buffer.iter_mut() {
        *b ^= 237;
    }
    let mut i = 0;
    while i + 2 < buffer.len() {
        buffer.swap(i, i + 2);
        i += 3;
    }
}

/// Parsed group header.
///
/// `author`, `ctime` and `original` are reserved in OpenClonk but still
/// round-trip through the format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupHeader {
    /// Number of entry records that follow the header.
    pub entries: u32,
    /// Author name, at most 31 bytes on disk. May be empty.
    pub author: String,
    /// Creation time in seconds since the Unix epoch, 0 when absent.
    pub ctime: u32,
    /// Whether the archive is marked as an original pack.
    pub original: bool,
}

/// Parsed entry record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupEntry {
    /// Entry filename, at most 260 bytes on disk.
    pub name: String,
    /// Whether the payload is a complete nested group.
    pub is_group: bool,
    /// Payload length in bytes.
    pub size: u32,
    /// Modification time in seconds since the Unix epoch, 0 when absent.
    pub mtime: u32,
    /// Executable flag, preserved for POSIX sources.
    pub executable: bool,
}

/// Slice a NUL-terminated string field. Unterminated fields use the whole
/// buffer.
fn cstr(buf: &[u8]) -> &[u8] {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

/// Read and validate a scrambled 204-byte group header.
pub(crate) fn read_header<R: Read>(r: &mut R) -> Result<GroupHeader> {
    let mut buf = [0u8; HEADER_SIZE];
    r.read_exact(&mut buf).map_err(Error::from_io)?;
    scramble(&mut buf);

    let mut c = Cursor::new(&buf[..]);
    let mut id = [0u8; 28];
    c.read_exact(&mut id)?;
    let ver1 = c.read_u32::<LittleEndian>()?;
    let ver2 = c.read_u32::<LittleEndian>()?;
    if &id[..C4GROUP_FILE_ID.len()] != C4GROUP_FILE_ID.as_bytes()
        || ver1 != C4GROUP_FILE_VER1
        || ver2 != C4GROUP_FILE_VER2
    {
        return Err(Error::InvalidHeader);
    }

    let entries = c.read_u32::<LittleEndian>()?;
    let mut author = [0u8; AUTHOR_LEN];
    c.read_exact(&mut author)?;
    // 32 reserved bytes.
    c.set_position(c.position() + 32);
    let ctime = c.read_u32::<LittleEndian>()?;
    let original = c.read_u32::<LittleEndian>()? == ORIGINAL_MAGIC;

    Ok(GroupHeader {
        entries,
        author: String::from_utf8_lossy(cstr(&author)).into_owned(),
        ctime,
        original,
    })
}

/// Serialize and scramble a group header.
pub(crate) fn write_header<W: Write>(w: &mut W, header: &GroupHeader) -> Result<()> {
    let mut buf = [0u8; HEADER_SIZE];
    buf[..C4GROUP_FILE_ID.len()].copy_from_slice(C4GROUP_FILE_ID.as_bytes());
    buf[28..32].copy_from_slice(&C4GROUP_FILE_VER1.to_le_bytes());
    buf[32..36].copy_from_slice(&C4GROUP_FILE_VER2.to_le_bytes());
    buf[36..40].copy_from_slice(&header.entries.to_le_bytes());
    let author = header.author.as_bytes();
    let n = author.len().min(AUTHOR_LEN);
    buf[40..40 + n].copy_from_slice(&author[..n]);
    buf[104..108].copy_from_slice(&header.ctime.to_le_bytes());
    let original = if header.original { ORIGINAL_MAGIC } else { 0 };
    buf[108..112].copy_from_slice(&original.to_le_bytes());

    scramble(&mut buf);
    w.write_all(&buf).map_err(Error::from_io)
}

/// Read a 316-byte entry record, returning the public view plus the
/// payload offset from the entry table.
///
/// `Packed`, `HasCRC` and `CRC` are reserved; any value is accepted.
pub(crate) fn read_entry<R: Read>(r: &mut R) -> Result<(GroupEntry, u32)> {
    let mut buf = [0u8; ENTRY_SIZE];
    r.read_exact(&mut buf).map_err(Error::from_io)?;

    let mut c = Cursor::new(&buf[..]);
    let mut name = [0u8; FILENAME_LEN];
    c.read_exact(&mut name)?;
    let _packed = c.read_u32::<LittleEndian>()?;
    let child_group = c.read_u32::<LittleEndian>()?;
    let size = c.read_u32::<LittleEndian>()?;
    // 4 reserved bytes.
    c.set_position(c.position() + 4);
    let offset = c.read_u32::<LittleEndian>()?;
    let mtime = c.read_u32::<LittleEndian>()?;
    let _has_crc = c.read_u8()?;
    let _crc = c.read_u32::<LittleEndian>()?;
    let executable = c.read_u8()? != 0;

    let entry = GroupEntry {
        name: String::from_utf8_lossy(cstr(&name)).into_owned(),
        is_group: child_group != 0,
        size,
        mtime,
        executable,
    };
    Ok((entry, offset))
}

/// Serialize an entry record with the given payload offset.
pub(crate) fn write_entry<W: Write>(w: &mut W, entry: &GroupEntry, offset: u32) -> Result<()> {
    let mut buf = [0u8; ENTRY_SIZE];
    let name = entry.name.as_bytes();
    let n = name.len().min(FILENAME_LEN);
    buf[..n].copy_from_slice(&name[..n]);
    // Packed (at 260) and the CRC fields (at 284) stay zero.
    buf[264..268].copy_from_slice(&u32::from(entry.is_group).to_le_bytes());
    buf[268..272].copy_from_slice(&entry.size.to_le_bytes());
    buf[276..280].copy_from_slice(&offset.to_le_bytes());
    buf[280..284].copy_from_slice(&entry.mtime.to_le_bytes());
    buf[289] = u8::from(entry.executable);

    w.write_all(&buf).map_err(Error::from_io)
}
