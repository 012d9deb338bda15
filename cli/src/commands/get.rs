//! Get Command
//!
//! Looks up a single line by index in a file's sequence without
//! materializing the whole thing into a `Vec`.

use std::path::Path;

use anyhow::{Context, Result};
use splithash::cursor;

use super::build::read_sequence;

/// Builds `file`'s sequence and prints the element at `index`.
pub fn get_line(file: &Path, index: usize) -> Result<()> {
    let tree = read_sequence(file)?.with_context(|| format!("{} has no lines to index into", file.display()))?;

    let mut at = cursor(&tree);
    match at.get(index) {
        Some(line) => println!("{line}"),
        None => println!("(out of range)"),
    }

    Ok(())
}
