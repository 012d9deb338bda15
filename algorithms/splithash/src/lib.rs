//! # SplitHash
//!
//! An immutable, history-independent, authenticated sequence. Two trees
//! built from the same elements via any sequence of `concat`/`split`
//! calls converge to the same canonical shape and the same `hashCode`,
//! regardless of the order of operations that produced them.
//!
//! # Usage
//! ```rust
//! use splithash::{chunk, concat, equal_to, hash_code, leaf, size, split};
//!
//! let a = leaf(1_i32);
//! let b = leaf(2_i32);
//! let c = leaf(3_i32);
//!
//! let ab = concat(Some(&a), Some(&b)).expect("non-empty");
//! let abc = concat(Some(&ab), Some(&c)).expect("non-empty");
//!
//! // Folding the other way round converges to the same canonical tree.
//! let bc = concat(Some(&b), Some(&c)).expect("non-empty");
//! let abc_again = concat(Some(&a), Some(&bc)).expect("non-empty");
//! assert!(equal_to(&abc, &abc_again));
//!
//! let (prefix, suffix) = split(&abc, 2);
//! assert_eq!(prefix.as_ref().map(size), Some(2));
//! assert_eq!(suffix.as_ref().map(size), Some(1));
//!
//! let chunked = chunk(&abc);
//! assert_eq!(hash_code(&chunked), hash_code(&abc));
//! ```

mod chunk_codec;
pub mod constants;
mod error;
mod fringe;
mod hash;
mod iter;
mod merge;
mod node;
mod ops;
pub mod stats;

pub use error::InternalInconsistency;
pub use node::NodeRef;
pub use ops::{
    build, chunk, concat, cursor, equal_to, first, hash_at, hash_code, height, last, leaf, size, split, Cursor,
};
