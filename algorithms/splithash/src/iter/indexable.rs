//! Lazy indexable iterator (`spec.md` §2): a random-access cache built on
//! top of the one-shot [`super::Leaves`] walk, so repeated indexed access
//! into the same tree doesn't re-walk it from the start each time.

use crate::node::Node;

use super::Leaves;

pub(crate) struct IndexableIterator<'a, X> {
    source: Leaves<'a, X>,
    cache: Vec<&'a X>,
}

impl<'a, X> IndexableIterator<'a, X> {
    pub(crate) fn from_node(node: &'a Node<X>) -> Self {
        Self {
            source: Leaves::from_node(node),
            cache: Vec::new(),
        }
    }

    /// Returns the element at `index`, pulling and caching further
    /// elements from the underlying traversal only as far as needed.
    pub(crate) fn get(&mut self, index: usize) -> Option<&'a X> {
        while self.cache.len() <= index {
            self.cache.push(self.source.next()?);
        }
        Some(self.cache[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{combine2, Node as NodeTy};

    #[test]
    fn caches_across_calls() {
        let a = NodeTy::leaf(1_i32);
        let b = NodeTy::leaf(2_i32);
        let tree = combine2(&a, &b);
        let mut it = IndexableIterator::from_node(tree.as_ref());
        assert_eq!(it.get(1), Some(&2));
        assert_eq!(it.get(0), Some(&1));
        assert_eq!(it.get(2), None);
    }
}
