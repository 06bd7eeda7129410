//! End-to-end archive round-trips over in-memory buffers

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};

use c4group::{
    Error, GroupEntry, GroupHeader, GroupReader, GroupWriter, Packer, TreeEntry, TreeNode,
    TreeSource,
};

fn entry(name: &str, size: u32) -> GroupEntry {
    GroupEntry {
        name: name.to_string(),
        size,
        ..Default::default()
    }
}

#[test]
fn test_empty_archive() {
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader::default()).unwrap();
    let bytes = w.finish().unwrap();
    assert_eq!(&bytes[..2], &[0x1e, 0x8c]);

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.header().entries, 0);
    assert!(reader.entries().is_empty());
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_single_empty_entry() {
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    w.write_entry(&entry("foobar.txt", 0)).unwrap();
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    let first = reader.next_entry().unwrap().unwrap();
    assert_eq!(first.name, "foobar.txt");
    assert_eq!(first.size, 0);
    assert!(!first.is_group);
    let mut payload = Vec::new();
    assert_eq!(reader.read_to_end(&mut payload).unwrap(), 0);
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_single_file() {
    let content = b"Hello World!";
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    w.write_entry(&entry("foobar.txt", content.len() as u32))
        .unwrap();
    w.write_all(content).unwrap();
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    let first = reader.next_entry().unwrap().unwrap();
    assert_eq!(first.name, "foobar.txt");
    assert_eq!(first.size, 12);

    let mut payload = Vec::new();
    reader.read_to_end(&mut payload).unwrap();
    assert_eq!(payload, content);
    // End of entry, then end of archive.
    assert_eq!(reader.read(&mut [0u8; 8]).unwrap(), 0);
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_nested_group() {
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    w.write_entry(&GroupEntry {
        name: "Sub".to_string(),
        is_group: true,
        size: (204 + 316 + 5) as u32,
        ..Default::default()
    })
    .unwrap();
    {
        let mut sub = w
            .create_sub_group(&GroupHeader { entries: 1, ..Default::default() })
            .unwrap();
        sub.write_entry(&entry("a.txt", 5)).unwrap();
        sub.write_all(b"hello").unwrap();
        sub.close().unwrap();
    }
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    let first = reader.next_entry().unwrap().cloned().unwrap();
    assert!(first.is_group);
    assert_eq!(first.size as usize, 204 + 316 + 5);
    {
        let mut sub = reader.read_group().unwrap();
        let inner = sub.next_entry().unwrap().unwrap();
        assert_eq!(inner.name, "a.txt");
        let mut payload = Vec::new();
        sub.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, b"hello");
        assert!(sub.next_entry().unwrap().is_none());
    }
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_deeply_nested_groups() {
    // outer > mid > inner > leaf.txt
    let leaf = b"leaf";
    let inner_size = 204 + 316 + leaf.len() as u32;
    let mid_size = 204 + 316 + inner_size;

    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    w.write_entry(&GroupEntry {
        name: "Mid".to_string(),
        is_group: true,
        size: mid_size,
        ..Default::default()
    })
    .unwrap();
    let mut mid = w
        .create_sub_group(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    mid.write_entry(&GroupEntry {
        name: "Inner".to_string(),
        is_group: true,
        size: inner_size,
        ..Default::default()
    })
    .unwrap();
    let mut inner = mid
        .create_sub_group(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    inner.write_entry(&entry("leaf.txt", leaf.len() as u32)).unwrap();
    inner.write_all(leaf).unwrap();
    inner.close().unwrap();
    mid.close().unwrap();
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    reader.next_entry().unwrap();
    let mut mid = reader.read_group().unwrap();
    mid.next_entry().unwrap();
    let mut inner = mid.read_group().unwrap();
    let leaf_entry = inner.next_entry().unwrap().unwrap();
    assert_eq!(leaf_entry.name, "leaf.txt");
    let mut payload = Vec::new();
    inner.read_to_end(&mut payload).unwrap();
    assert_eq!(payload, leaf);
}

#[test]
fn test_header_fields_round_trip() {
    let header = GroupHeader {
        entries: 1,
        author: "Matthes".to_string(),
        ctime: 946_684_800,
        original: true,
    };
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&header).unwrap();
    w.write_entry(&GroupEntry {
        name: "run.sh".to_string(),
        size: 2,
        mtime: 946_684_801,
        executable: true,
        ..Default::default()
    })
    .unwrap();
    w.write_all(b"ok").unwrap();
    let bytes = w.finish().unwrap();

    let reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(*reader.header(), header);
    let first = &reader.entries()[0];
    assert_eq!(first.mtime, 946_684_801);
    assert!(first.executable);
    assert!(!first.is_group);
}

#[test]
fn test_multi_entry_payload_order() {
    // Payloads are concatenated in entry order with no gaps; reading them
    // back in sequence is the offset invariant in action.
    let files: &[(&str, &[u8])] = &[
        ("one.txt", b"first"),
        ("two.txt", b""),
        ("three.txt", b"third payload"),
    ];
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 3, ..Default::default() })
        .unwrap();
    for &(name, content) in files {
        w.write_entry(&entry(name, content.len() as u32)).unwrap();
    }
    for &(_, content) in files {
        w.write_all(content).unwrap();
    }
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    for &(name, content) in files {
        let e = reader.next_entry().unwrap().cloned().unwrap();
        assert_eq!(e.name, name);
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, content);
    }
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_read_group_on_plain_entry() {
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    w.write_entry(&entry("a.txt", 1)).unwrap();
    w.write_all(b"x").unwrap();
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    reader.next_entry().unwrap();
    assert!(matches!(reader.read_group(), Err(Error::NoChildGroup)));
}

#[test]
fn test_read_group_after_partial_read() {
    let sub_size = 204_u32;
    let mut w = GroupWriter::new(Vec::new());
    w.write_header(&GroupHeader { entries: 1, ..Default::default() })
        .unwrap();
    w.write_entry(&GroupEntry {
        name: "Sub".to_string(),
        is_group: true,
        size: sub_size,
        ..Default::default()
    })
    .unwrap();
    let sub = w
        .create_sub_group(&GroupHeader::default())
        .unwrap();
    sub.close().unwrap();
    let bytes = w.finish().unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    reader.next_entry().unwrap();
    let mut buf = [0u8; 10];
    reader.read(&mut buf).unwrap();
    assert!(matches!(reader.read_group(), Err(Error::AlreadyRead)));
}

#[test]
fn test_raw_gzip_is_rejected() {
    // A plain gzip stream carries 0x1f 0x8b and must fail up front.
    let mut gz = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    gz.write_all(b"not a c4group").unwrap();
    let bytes = gz.finish().unwrap();

    let err = GroupReader::new(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, Error::InvalidMagic));
}

#[test]
fn test_garbage_is_rejected() {
    let err = GroupReader::new(Cursor::new(b"\x00\x01\x02\x03".to_vec())).unwrap_err();
    assert!(matches!(err, Error::InvalidMagic));
}

/// Minimal content-addressed source for packer round-trips.
struct MemSource {
    trees: HashMap<u32, Vec<TreeEntry<u32>>>,
    blobs: HashMap<u32, Vec<u8>>,
}

impl TreeSource for MemSource {
    type Id = u32;

    fn children(&mut self, tree: &u32) -> io::Result<Vec<TreeEntry<u32>>> {
        Ok(self.trees[tree].clone())
    }

    fn blob_size(&mut self, blob: &u32) -> io::Result<u64> {
        Ok(self.blobs[blob].len() as u64)
    }

    fn read_blob(&mut self, blob: &u32, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&self.blobs[blob])
    }
}

#[test]
fn test_pack_round_trip_with_canonical_order() {
    let source = MemSource {
        trees: HashMap::from([
            (
                0,
                vec![
                    TreeEntry {
                        name: "zzz.txt".to_string(),
                        node: TreeNode::Blob { id: 10, executable: false },
                    },
                    TreeEntry {
                        name: "Objects.c".to_string(),
                        node: TreeNode::Blob { id: 11, executable: false },
                    },
                    TreeEntry {
                        name: "Sect1.ocg".to_string(),
                        node: TreeNode::Tree(1),
                    },
                    TreeEntry {
                        name: "Script.c".to_string(),
                        node: TreeNode::Blob { id: 12, executable: false },
                    },
                    TreeEntry {
                        name: "Scenario.txt".to_string(),
                        node: TreeNode::Blob { id: 13, executable: false },
                    },
                ],
            ),
            (
                1,
                vec![
                    TreeEntry {
                        name: "Objects.c".to_string(),
                        node: TreeNode::Blob { id: 11, executable: false },
                    },
                    TreeEntry {
                        name: "Scenario.txt".to_string(),
                        node: TreeNode::Blob { id: 13, executable: false },
                    },
                ],
            ),
        ]),
        blobs: HashMap::from([
            (10, b"unsorted tail".to_vec()),
            (11, b"// objects".to_vec()),
            (12, b"// script".to_vec()),
            (13, b"[Head]".to_vec()),
        ]),
    };

    let mut packer = Packer::new(source);
    let bytes = packer.pack(Vec::new(), "planet.ocs", &0).unwrap();

    let mut reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    let names: Vec<String> = reader.entries().iter().map(|e| e.name.clone()).collect();
    // Scenario sort list: Scenario.txt, then sections, then scripts, with
    // the unclassified name last.
    assert_eq!(
        names,
        ["Scenario.txt", "Sect1.ocg", "Script.c", "Objects.c", "zzz.txt"]
    );

    // The section entry must be a readable nested group with the section
    // ordering (Scenario.txt before Objects.c) and correct declared size.
    reader.next_entry().unwrap();
    let mut payload = Vec::new();
    reader.read_to_end(&mut payload).unwrap();
    assert_eq!(payload, b"[Head]");

    let sect = reader.next_entry().unwrap().cloned().unwrap();
    assert!(sect.is_group);
    assert_eq!(sect.size as u64, 204 + 2 * 316 + 6 + 10);
    {
        let mut sub = reader.read_group().unwrap();
        let sub_names: Vec<String> = sub.entries().iter().map(|e| e.name.clone()).collect();
        assert_eq!(sub_names, ["Scenario.txt", "Objects.c"]);
        sub.next_entry().unwrap();
        let mut head = Vec::new();
        sub.read_to_end(&mut head).unwrap();
        assert_eq!(head, b"[Head]");
        sub.next_entry().unwrap();
        let mut objects = Vec::new();
        sub.read_to_end(&mut objects).unwrap();
        assert_eq!(objects, b"// objects");
        assert!(sub.next_entry().unwrap().is_none());
    }

    for expected in [b"// script".as_slice(), b"// objects", b"unsorted tail"] {
        reader.next_entry().unwrap();
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, expected);
    }
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_pack_executable_flag() {
    let source = MemSource {
        trees: HashMap::from([(
            0,
            vec![TreeEntry {
                name: "c4group".to_string(),
                node: TreeNode::Blob { id: 1, executable: true },
            }],
        )]),
        blobs: HashMap::from([(1, b"\x7fELF".to_vec())]),
    };
    let mut packer = Packer::new(source);
    let bytes = packer.pack(Vec::new(), "Tools.ocg", &0).unwrap();

    let reader = GroupReader::new(Cursor::new(bytes)).unwrap();
    assert!(reader.entries()[0].executable);
}
