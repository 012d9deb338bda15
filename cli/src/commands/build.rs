//! Build Command
//!
//! Reads a file's lines as the element sequence and folds them into a
//! canonical SplitHash tree.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use splithash::{concat, hash_code, height, leaf, size, NodeRef};

/// Reads `path` line by line and folds the lines left-to-right into a
/// canonical tree via repeated `leaf`/`concat`.
pub(crate) fn read_sequence(path: &Path) -> Result<Option<NodeRef<String>>> {
    let file = File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
    let mut tree: Option<NodeRef<String>> = None;
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("failed to read: {}", path.display()))?;
        let next = leaf(line);
        tree = concat(tree.as_ref(), Some(&next));
    }
    Ok(tree)
}

/// Builds `file`'s sequence and prints its hash, size, and height.
pub fn build_and_report(file: &Path) -> Result<()> {
    match read_sequence(file)? {
        Some(tree) => println!(
            "{}  size={} height={}",
            format_hash(hash_code(&tree)),
            size(&tree),
            height(&tree)
        ),
        None => println!("(empty)"),
    }
    Ok(())
}

/// Builds both files' sequences, concatenates them, and prints the result.
pub fn concat_files(a: &Path, b: &Path) -> Result<()> {
    let left = read_sequence(a)?;
    let right = read_sequence(b)?;
    match concat(left.as_ref(), right.as_ref()) {
        Some(tree) => println!(
            "{}  size={} height={}",
            format_hash(hash_code(&tree)),
            size(&tree),
            height(&tree)
        ),
        None => println!("(empty)"),
    }
    Ok(())
}

pub(crate) fn format_hash(hash: u32) -> String {
    format!("{hash:08x}")
}
