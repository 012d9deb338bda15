//! Chunk Command
//!
//! Packs a file's sequence into its chunked form and confirms the hash is
//! unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use splithash::{chunk, hash_code, height};

use super::build::{format_hash, read_sequence};

/// Builds `file`'s sequence, chunks it, and prints both hashes side by
/// side so a caller can see they match.
pub fn chunk_file(file: &Path) -> Result<()> {
    let tree = read_sequence(file)?.with_context(|| format!("{} has no lines to chunk", file.display()))?;
    let chunked = chunk(&tree);

    println!("original: {}  height={}", format_hash(hash_code(&tree)), height(&tree));
    println!("chunked:  {}  height={}", format_hash(hash_code(&chunked)), height(&chunked));

    if hash_code(&tree) == hash_code(&chunked) {
        println!("hashes match");
    } else {
        anyhow::bail!("chunked hash diverged from original");
    }

    Ok(())
}
