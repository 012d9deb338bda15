//! The node model (`spec.md` §3, §4.2): a sum type of five variants
//! sharing one capability surface. `Node<X>` is never matched on from
//! outside the crate — every public operation goes through `ops.rs`.

mod binary;
mod chunked;
mod leaf;
mod rle;

use std::sync::Arc;

pub(crate) use binary::BinaryNode;
pub(crate) use chunked::ChunkedNode;
pub(crate) use leaf::LeafNode;
pub(crate) use rle::RleNode;

use crate::error;

/// Shared-ownership handle to a node. `Arc`, not `Rc`: `spec.md` §5
/// requires that any read operation be callable from any thread in
/// parallel on the same tree, so a built tree must be `Send + Sync`.
pub type NodeRef<X> = Arc<Node<X>>;

/// A transient binary pairing used only inside the fringe machinery
/// (`spec.md` §4.4) to assemble a non-canonical intermediate tree. Never
/// returned from a public operation — `no hash, no size` per `spec.md` §3.
pub(crate) struct TempNode<X> {
    pub(crate) left: NodeRef<X>,
    pub(crate) right: NodeRef<X>,
}

pub(crate) enum Node<X> {
    Leaf(LeafNode<X>),
    Binary(BinaryNode<X>),
    Rle(RleNode<X>),
    Chunked(ChunkedNode<X>),
    Temp(TempNode<X>),
}

impl<X> Node<X> {
    pub(crate) fn leaf(value: X) -> NodeRef<X>
    where
        X: core::hash::Hash,
    {
        Arc::new(Node::Leaf(LeafNode::new(value)))
    }

    pub(crate) fn size(&self) -> i64 {
        match self {
            Node::Leaf(_) => 1,
            Node::Binary(b) => b.size(),
            Node::Rle(r) => r.size(),
            Node::Chunked(c) => c.size(),
            Node::Temp(_) => error::invariant("size() queried on a transient Temp node"),
        }
    }

    pub(crate) fn height(&self) -> u8 {
        match self {
            Node::Leaf(_) => 0,
            Node::Binary(b) => b.height(),
            Node::Rle(r) => r.height(),
            Node::Chunked(c) => c.height(),
            Node::Temp(t) => 1 + t.left.height().max(t.right.height()),
        }
    }

    pub(crate) fn chunk_height(&self) -> u8 {
        match self {
            Node::Leaf(_) | Node::Chunked(_) => 0,
            Node::Binary(b) => b.chunk_height(),
            Node::Rle(r) => r.inner.chunk_height(),
            Node::Temp(_) => error::invariant("chunk_height() queried on a transient Temp node"),
        }
    }

    pub(crate) fn is_chunked(&self) -> bool {
        match self {
            Node::Leaf(_) | Node::Rle(_) => false,
            Node::Binary(b) => b.is_chunked(),
            Node::Chunked(_) => true,
            Node::Temp(_) => error::invariant("is_chunked() queried on a transient Temp node"),
        }
    }

    pub(crate) fn first(&self) -> &X {
        match self {
            Node::Leaf(l) => &l.value,
            Node::Binary(b) => b.left.first(),
            Node::Rle(r) => r.inner.first(),
            Node::Chunked(c) => c.first(),
            Node::Temp(_) => error::invariant("first() queried on a transient Temp node"),
        }
    }

    pub(crate) fn last(&self) -> &X {
        match self {
            Node::Leaf(l) => &l.value,
            Node::Binary(b) => b.right.last(),
            Node::Rle(r) => r.inner.last(),
            Node::Chunked(c) => c.last(),
            Node::Temp(_) => error::invariant("last() queried on a transient Temp node"),
        }
    }

    pub(crate) fn hash_code(&self) -> u32
    where
        X: Clone,
    {
        self.hash_at(0)
    }

    /// The infinite hash-sequence extension (`spec.md` §3, §4.2): `i = 0`
    /// is the canonical node hash, `i = 1` a secondary derivation, `i >= 2`
    /// recurses so collision probability between unequal nodes keeps
    /// decaying.
    pub(crate) fn hash_at(&self, i: u32) -> u32
    where
        X: Clone,
    {
        match self {
            Node::Leaf(l) => l.hash_at(i),
            Node::Binary(b) => b.hash_at(i),
            Node::Rle(r) => r.hash_at(i),
            Node::Chunked(c) => {
                if i == 0 {
                    c.hash_code()
                } else {
                    c.unchunked().hash_at(i)
                }
            }
            Node::Temp(_) => error::invariant("hash_at() queried on a transient Temp node"),
        }
    }

    /// The "left child" of this node's logical decomposition. `Binary`
    /// and `Temp` return their stored child directly; `Rle` peels off one
    /// copy of its inner base; `Chunked` delegates to its reconstructed
    /// binary form. Calling this on a `Leaf` is a programming error.
    pub(crate) fn left(&self) -> NodeRef<X>
    where
        X: Clone,
    {
        match self {
            Node::Binary(b) => b.left.clone(),
            Node::Temp(t) => t.left.clone(),
            Node::Rle(r) => r.inner.clone(),
            Node::Chunked(c) => c.unchunked().left(),
            Node::Leaf(_) => error::invariant("left() queried on a Leaf node"),
        }
    }

    /// Symmetric to [`Node::left`]. For `Rle`, this is the remaining
    /// repeats: `inner` if `mult == 2`, else a fresh `Rle(inner, mult-1)`.
    pub(crate) fn right(&self) -> NodeRef<X>
    where
        X: Clone,
    {
        match self {
            Node::Binary(b) => b.right.clone(),
            Node::Temp(t) => t.right.clone(),
            Node::Rle(r) => {
                if r.mult == 2 {
                    r.inner.clone()
                } else {
                    Arc::new(Node::Rle(RleNode::new(r.inner.clone(), r.mult - 1)))
                }
            }
            Node::Chunked(c) => c.unchunked().right(),
            Node::Leaf(_) => error::invariant("right() queried on a Leaf node"),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// RLE multiplicity; `1` for every non-`Rle` variant.
    pub(crate) fn mult(&self) -> u64 {
        match self {
            Node::Rle(r) => r.mult,
            _ => 1,
        }
    }

    /// Unwraps one level of RLE, returning the inner base node; returns a
    /// clone of `self` for every other variant.
    pub(crate) fn base(self: &NodeRef<X>) -> NodeRef<X> {
        match &**self {
            Node::Rle(r) => r.inner.clone(),
            _ => self.clone(),
        }
    }

    /// Content equality: hash-first, full recursive fallback on a hash
    /// match (`spec.md` §3, §4.2). The recursive fallback compares element
    /// sequences lazily via [`crate::iter::Leaves`] so it short-circuits
    /// on the first difference instead of fully materializing either side.
    pub(crate) fn equal_to(&self, other: &Node<X>) -> bool
    where
        X: Eq + Clone,
    {
        if self.size() != other.size() {
            return false;
        }
        if self.hash_code() != other.hash_code() {
            return false;
        }
        // Hash match: almost certainly equal. Confirm with an element-wise
        // walk, short-circuiting on the first mismatch, to rule out the
        // astronomically unlikely hash collision `spec.md` §4.2 allows for.
        crate::iter::Leaves::from_node(self).eq(crate::iter::Leaves::from_node(other))
    }
}

impl<X> core::fmt::Debug for Node<X> {
    /// A bounded-depth sketch: variant, size, height only — never the
    /// recursive contents, which could be unbounded.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Node::Leaf(_) => write!(f, "Leaf"),
            Node::Binary(b) => write!(f, "Binary(size={}, height={})", b.size(), b.height()),
            Node::Rle(r) => write!(f, "Rle(mult={}, inner.height={})", r.mult, r.inner.height()),
            Node::Chunked(c) => write!(f, "Chunked(size={}, height={})", c.size(), c.height()),
            Node::Temp(_) => write!(f, "Temp"),
        }
    }
}

/// Manual, not derived: equality goes through [`Node::equal_to`] (hash
/// first, then recursive content comparison), never a structural `==`
/// over `Arc` pointers or recursive field-by-field contents.
impl<X: Eq + Clone> PartialEq for Node<X> {
    fn eq(&self, other: &Self) -> bool {
        self.equal_to(other)
    }
}

impl<X: Eq + Clone> Eq for Node<X> {}

/// Constructs a leaf node. Free-function form of [`Node::leaf`], kept
/// alongside `combine`/`combine2` for callers outside this module.
pub(crate) fn leaf<X: core::hash::Hash>(value: X) -> NodeRef<X> {
    Node::leaf(value)
}

/// `true` iff both nodes, once unwrapped from any RLE, are content-equal.
pub(crate) fn is_multiple_of<X: Eq + Clone>(a: &NodeRef<X>, b: &NodeRef<X>) -> bool {
    a.base().equal_to(&b.base())
}

/// Merges two same-height nodes into a canonical result: an RLE if they
/// are multiples of one another, else a canonical `Binary`.
pub(crate) fn combine<X: Eq + Clone>(a: &NodeRef<X>, b: &NodeRef<X>) -> NodeRef<X> {
    if is_multiple_of(a, b) {
        let base = a.base();
        let mult = a.mult() + b.mult();
        Arc::new(Node::Rle(RleNode::new(base, mult)))
    } else {
        crate::chunk_codec::maybe_rechunk(Arc::new(Node::Binary(BinaryNode::new(a.clone(), b.clone()))))
    }
}

/// Like [`combine`], but falls back to a non-canonical [`Node::Temp`]
/// instead of a `Binary` — used only by fringe reconstruction, which must
/// avoid imposing canonicalization constraints prematurely (`spec.md` §4.2).
pub(crate) fn combine2<X: Eq + Clone>(a: &NodeRef<X>, b: &NodeRef<X>) -> NodeRef<X> {
    if is_multiple_of(a, b) {
        combine(a, b)
    } else {
        Arc::new(Node::Temp(TempNode {
            left: a.clone(),
            right: b.clone(),
        }))
    }
}
