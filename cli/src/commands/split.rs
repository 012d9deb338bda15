//! Split Command
//!
//! Splits a file's sequence at a line index and reports both halves.

use std::path::Path;

use anyhow::{Context, Result};
use splithash::{hash_code, height, size, split};

use super::build::{format_hash, read_sequence};

/// Splits `file`'s sequence at `index` and prints both halves' summaries.
pub fn split_file(file: &Path, index: i64) -> Result<()> {
    let tree = read_sequence(file)?.with_context(|| format!("{} has no lines to split", file.display()))?;

    let (prefix, suffix) = split(&tree, index);

    match prefix {
        Some(t) => println!(
            "prefix: {}  size={} height={}",
            format_hash(hash_code(&t)),
            size(&t),
            height(&t)
        ),
        None => println!("prefix: (empty)"),
    }
    match suffix {
        Some(t) => println!(
            "suffix: {}  size={} height={}",
            format_hash(hash_code(&t)),
            size(&t),
            height(&t)
        ),
        None => println!("suffix: (empty)"),
    }

    Ok(())
}
