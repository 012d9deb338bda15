//! Traversal primitives shared by content-equality checks, the fringe
//! machinery, and the chunking codec (`spec.md` §2: "lazy indexable
//! iterator" and "height-band iterator").

mod height_band;
mod indexable;

pub(crate) use height_band::{Direction, HeightBand};
pub(crate) use indexable::IndexableIterator;

use crate::node::Node;

/// A one-shot, explicit-stack in-order walk over a tree's elements.
/// `Rle` is expanded by repeat count, `Chunked` is walked through its own
/// flat leaf array (no reconstruction needed), and `Temp` is walked like
/// `Binary` since it only ever appears as scaffolding during fringe
/// reconstruction, never as a stored tree.
pub(crate) struct Leaves<'a, X> {
    stack: Vec<Frame<'a, X>>,
}

enum Frame<'a, X> {
    Node(&'a Node<X>),
    Repeat(&'a Node<X>, u64),
}

impl<'a, X> Leaves<'a, X> {
    pub(crate) fn from_node(node: &'a Node<X>) -> Self {
        Self {
            stack: vec![Frame::Node(node)],
        }
    }
}

impl<'a, X> Iterator for Leaves<'a, X> {
    type Item = &'a X;

    fn next(&mut self) -> Option<&'a X> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Repeat(n, remaining) => {
                    if remaining > 1 {
                        self.stack.push(Frame::Repeat(n, remaining - 1));
                    }
                    self.stack.push(Frame::Node(n));
                }
                Frame::Node(n) => match n {
                    Node::Leaf(l) => return Some(&l.value),
                    Node::Binary(b) => {
                        self.stack.push(Frame::Node(b.right.as_ref()));
                        self.stack.push(Frame::Node(b.left.as_ref()));
                    }
                    Node::Rle(r) => {
                        self.stack.push(Frame::Repeat(r.inner.as_ref(), r.mult));
                    }
                    Node::Chunked(c) => {
                        for leaf in c.leaves.iter().rev() {
                            self.stack.push(Frame::Node(leaf.as_ref()));
                        }
                    }
                    Node::Temp(t) => {
                        self.stack.push(Frame::Node(t.right.as_ref()));
                        self.stack.push(Frame::Node(t.left.as_ref()));
                    }
                },
            }
        }
        None
    }
}
