//! C4Group archive format reader and writer
//!
//! C4Group is the container format of the OpenClonk game engine and its
//! predecessors: a flat list of named entries — raw files or recursively
//! nested child groups — stored as one gzip stream whose two leading magic
//! bytes are replaced, with a lightly obfuscated header block in front of a
//! plain entry table.
//!
//! The format is strictly sequential. [`GroupReader`] walks entries in
//! on-disk order and descends into child groups in place; [`GroupWriter`]
//! takes one header, the declared entry records, then the concatenated
//! payloads. [`Packer`] turns an arbitrary tree source into an archive in
//! the canonical child order used by the engine.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::Read;
//!
//! # fn main() -> c4group::Result<()> {
//! let mut reader = c4group::GroupReader::new(File::open("planet.ocs")?)?;
//! while let Some(entry) = reader.next_entry()?.cloned() {
//!     let mut content = Vec::new();
//!     reader.read_to_end(&mut content)?;
//!     println!("{} ({} B)", entry.name, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod components;
pub mod error;
pub mod format;
pub mod magic;
pub mod pack;
pub mod read;
pub mod sort;
pub mod write;

pub use error::{Error, Result};
pub use format::{ENTRY_SIZE, GroupEntry, GroupHeader, HEADER_SIZE, ORIGINAL_MAGIC, scramble};
pub use magic::{MagicReader, MagicWriter};
pub use pack::{Packer, TreeEntry, TreeNode, TreeSource};
pub use read::GroupReader;
pub use sort::SortOrder;
pub use write::GroupWriter;

/// First C4Group magic byte, replacing gzip's `0x1f`.
pub const C4GZ_MAGIC1: u8 = 0x1e;

/// Second C4Group magic byte, replacing gzip's `0x8b`.
pub const C4GZ_MAGIC2: u8 = 0x8c;

/// Identifier expected in the first 24 bytes of every group header.
pub const C4GROUP_FILE_ID: &str = "RedWolf Design GrpFolder";

/// Supported file format version.
pub const C4GROUP_FILE_VER1: u32 = 1;

/// Supported file format version, second component.
pub const C4GROUP_FILE_VER2: u32 = 2;
