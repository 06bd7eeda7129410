//! Packing arbitrary trees into C4Group archives
//!
//! The writer needs every entry's size before the first payload byte, so
//! packing walks the source twice: a sizing pass over each subtree and a
//! write pass emitting sorted entry records followed by payloads. Sizes of
//! nested groups are memoized by the source's node identity, which makes
//! repeated subtrees (common in content-addressed sources) free after the
//! first walk.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{self, Write};

use tracing::{debug, trace};

use crate::format::{ENTRY_SIZE, GroupEntry, GroupHeader, HEADER_SIZE};
use crate::sort::SortOrder;
use crate::write::GroupWriter;
use crate::{Error, Result};

/// A blob or nested tree inside a [`TreeSource`].
#[derive(Debug, Clone)]
pub enum TreeNode<I> {
    /// A nested tree, packed as a child group.
    Tree(I),
    /// A leaf blob, packed as a plain entry.
    Blob {
        /// Source identity of the blob's content.
        id: I,
        /// Whether the entry carries the executable flag.
        executable: bool,
    },
}

/// One named child of a tree.
#[derive(Debug, Clone)]
pub struct TreeEntry<I> {
    /// Child filename within the group.
    pub name: String,
    /// What the name points at.
    pub node: TreeNode<I>,
}

/// A tree-shaped content source the packer can walk.
///
/// `Id` is whatever identifies a node in the source — a content hash for
/// content-addressed storage, a path for a filesystem. Group sizes are
/// memoized per tree `Id`, so identical ids must describe identical
/// subtrees.
pub trait TreeSource {
    /// Node identity, used as the memoization key.
    type Id: Clone + Eq + Hash;

    /// List the children of a tree, in any order.
    fn children(&mut self, tree: &Self::Id) -> io::Result<Vec<TreeEntry<Self::Id>>>;

    /// Byte length of a blob, without reading its content.
    fn blob_size(&mut self, blob: &Self::Id) -> io::Result<u64>;

    /// Write a blob's content into `out`.
    fn read_blob(&mut self, blob: &Self::Id, out: &mut dyn Write) -> io::Result<()>;
}

/// Packs trees from a [`TreeSource`] into canonical C4Group archives.
pub struct Packer<S: TreeSource> {
    source: S,
    /// Memoized on-disk sizes of nested groups, keyed by tree identity.
    tree_sizes: HashMap<S::Id, u64>,
}

impl<S: TreeSource> Packer<S> {
    /// Create a packer over `source`. The size memo persists across
    /// `pack` calls, so one packer can serve many archives of the same
    /// source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            tree_sizes: HashMap::new(),
        }
    }

    /// Unwrap the packer, returning the source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// On-disk size of `tree` packed as a group body:
    /// `204 + entries * 316 + payload bytes`, recursively.
    pub fn group_size(&mut self, tree: &S::Id) -> Result<u64> {
        if let Some(&size) = self.tree_sizes.get(tree) {
            return Ok(size);
        }
        let mut size = HEADER_SIZE as u64;
        for child in self.source.children(tree).map_err(Error::from_io)? {
            size += ENTRY_SIZE as u64;
            size += match &child.node {
                TreeNode::Tree(id) => self.group_size(id)?,
                TreeNode::Blob { id, .. } => {
                    self.source.blob_size(id).map_err(Error::from_io)?
                }
            };
        }
        trace!(size, "computed group size");
        self.tree_sizes.insert(tree.clone(), size);
        Ok(size)
    }

    /// Pack the tree `root` into a complete archive written to `sink`,
    /// returning the sink.
    ///
    /// `name` is the archive's own filename (e.g. `planet.ocs`); it picks
    /// the sort list applied to the root's children.
    pub fn pack<W: Write>(&mut self, sink: W, name: &str, root: &S::Id) -> Result<W> {
        debug!(name, "packing tree");
        let children = self.sorted_children(name, root)?;
        let mut w = GroupWriter::new(sink);
        w.write_header(&GroupHeader {
            entries: children.len() as u32,
            ..Default::default()
        })?;
        self.write_children(&children, &mut w)?;
        w.finish()
    }

    /// A tree's children in the canonical order for a group named `name`.
    fn sorted_children(&mut self, name: &str, tree: &S::Id) -> Result<Vec<TreeEntry<S::Id>>> {
        let mut children = self.source.children(tree).map_err(Error::from_io)?;
        let order = SortOrder::for_group(name);
        children.sort_by(|a, b| order.compare(&a.name, &b.name));
        Ok(children)
    }

    /// Write sorted children into an open writer: all entry records first,
    /// then every payload, recursing through sub-groups.
    fn write_children<W: Write>(
        &mut self,
        children: &[TreeEntry<S::Id>],
        w: &mut GroupWriter<W>,
    ) -> Result<()> {
        for child in children {
            let (size, is_group, executable) = match &child.node {
                TreeNode::Tree(id) => (self.group_size(id)?, true, false),
                TreeNode::Blob { id, executable } => (
                    self.source.blob_size(id).map_err(Error::from_io)?,
                    false,
                    *executable,
                ),
            };
            let size = u32::try_from(size).map_err(|_| {
                Error::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("entry {} exceeds the 32-bit size field", child.name),
                ))
            })?;
            w.write_entry(&GroupEntry {
                name: child.name.clone(),
                is_group,
                size,
                mtime: 0,
                executable,
            })?;
        }

        for child in children {
            match &child.node {
                TreeNode::Tree(id) => {
                    let sub_children = self.sorted_children(&child.name, id)?;
                    let mut sub = w.create_sub_group(&GroupHeader {
                        entries: sub_children.len() as u32,
                        ..Default::default()
                    })?;
                    self.write_children(&sub_children, &mut sub)?;
                    sub.close()?;
                }
                TreeNode::Blob { id, .. } => {
                    self.source.read_blob(id, w).map_err(Error::from_io)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory tree source counting `children` calls per node.
    struct MemSource {
        trees: HashMap<u32, Vec<TreeEntry<u32>>>,
        blobs: HashMap<u32, Vec<u8>>,
        children_calls: HashMap<u32, usize>,
    }

    impl TreeSource for MemSource {
        type Id = u32;

        fn children(&mut self, tree: &u32) -> io::Result<Vec<TreeEntry<u32>>> {
            *self.children_calls.entry(*tree).or_insert(0) += 1;
            self.trees
                .get(tree)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such tree"))
        }

        fn blob_size(&mut self, blob: &u32) -> io::Result<u64> {
            Ok(self.blobs[blob].len() as u64)
        }

        fn read_blob(&mut self, blob: &u32, out: &mut dyn Write) -> io::Result<()> {
            out.write_all(&self.blobs[blob])
        }
    }

    fn blob(name: &str, id: u32) -> TreeEntry<u32> {
        TreeEntry {
            name: name.to_string(),
            node: TreeNode::Blob { id, executable: false },
        }
    }

    #[test]
    fn test_group_size() {
        // Sub-tree with one 5-byte blob, root with the sub-tree and one
        // 3-byte blob.
        let source = MemSource {
            trees: HashMap::from([
                (0, vec![
                    TreeEntry { name: "Sub".to_string(), node: TreeNode::Tree(1) },
                    blob("a.txt", 10),
                ]),
                (1, vec![blob("b.txt", 11)]),
            ]),
            blobs: HashMap::from([(10, b"abc".to_vec()), (11, b"hello".to_vec())]),
            children_calls: HashMap::new(),
        };
        let mut packer = Packer::new(source);
        assert_eq!(packer.group_size(&1).unwrap(), 204 + 316 + 5);
        assert_eq!(
            packer.group_size(&0).unwrap(),
            204 + 316 + (204 + 316 + 5) + 316 + 3
        );
    }

    #[test]
    fn test_size_memoization() {
        // The same subtree appears under two names; its children must be
        // enumerated for sizing only once.
        let source = MemSource {
            trees: HashMap::from([
                (0, vec![
                    TreeEntry { name: "Sect1.ocg".to_string(), node: TreeNode::Tree(1) },
                    TreeEntry { name: "Sect2.ocg".to_string(), node: TreeNode::Tree(1) },
                ]),
                (1, vec![blob("Scenario.txt", 10)]),
            ]),
            blobs: HashMap::from([(10, b"rules".to_vec())]),
            children_calls: HashMap::new(),
        };
        let mut packer = Packer::new(source);
        packer.pack(Vec::new(), "planet.ocs", &0).unwrap();
        // One sizing walk (memo hit for the second entry) plus one write
        // walk per occurrence.
        let source = packer.into_source();
        assert_eq!(source.children_calls[&1], 3);
    }
}
