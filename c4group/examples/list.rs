//! Lists the contents of a C4Group archive, descending into child groups.
//!
//! ```text
//! cargo run --example list -- planet.ocs
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use c4group::GroupReader;
use clap::Parser;

#[derive(Parser)]
#[command(name = "list")]
struct Cli {
    /// Archive to list (.ocs, .ocd, .ocf, ...).
    pub archive: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Cli::parse();

    let file = BufReader::new(File::open(&args.archive)?);
    let mut reader = GroupReader::new(file)?;
    let header = reader.header();
    if !header.author.is_empty() {
        println!("Author: {}", header.author);
    }
    list(&mut reader, 0)?;
    Ok(())
}

fn list<R: Read>(reader: &mut GroupReader<R>, depth: usize) -> c4group::Result<()> {
    while let Some(entry) = reader.next_entry()?.cloned() {
        let marker = if entry.is_group { "/" } else { "" };
        println!(
            "{:indent$}{}{marker} ({} B)",
            "",
            entry.name,
            entry.size,
            indent = depth * 2
        );
        if entry.is_group {
            let mut sub = reader.read_group()?;
            list(&mut sub, depth + 1)?;
        }
    }
    Ok(())
}
