#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splithash::{chunk, concat, equal_to, hash_code, leaf, size, split};

#[derive(Debug, Arbitrary)]
struct Data {
    elements: Vec<i8>,
    split_at: i64,
    chunk_before_split: bool,
}

fuzz_target!(|data: Data| {
    if data.elements.is_empty() {
        return;
    }

    let mut tree = leaf(data.elements[0]);
    for &e in &data.elements[1..] {
        tree = concat(Some(&tree), Some(&leaf(e))).expect("non-empty");
    }

    let source = if data.chunk_before_split { chunk(&tree) } else { tree.clone() };

    let (left, right) = split(&source, data.split_at);
    let rebuilt = concat(left.as_ref(), right.as_ref()).expect("split of a non-empty tree is non-empty");

    assert_eq!(
        hash_code(&rebuilt),
        hash_code(&tree),
        "split({})/concat round-trip diverged for {:?}",
        data.split_at,
        data.elements
    );
    assert_eq!(size(&rebuilt), size(&tree));
    assert!(equal_to(&rebuilt, &tree));

    // chunk/unchunk must agree with the original regardless of which side
    // of the split it ran on.
    let chunked = chunk(&rebuilt);
    assert_eq!(hash_code(&chunked), hash_code(&tree));
});
