use std::sync::Arc;

use imbl_sized_chunks::SparseChunk;

use crate::addressing::{digit, BRANCHING};

// Most nodes are far from full (a node only gets a child in slot `i` once an
// index with that digit has been pushed), so the children are stored sparsely
// behind an occupancy bitmap instead of as `BRANCHING` nullable pointers.
type Children<T> = SparseChunk<Arc<Node<T>>, BRANCHING>;

// There's no separate leaf type. Because digits are consumed from the bottom
// and the depth depends on the index, the node that holds index 5 (root slot 5)
// is also the parent of the node that holds index 37 (root slot 5, then slot 1).
// So a node can legitimately carry a value and have children at the same time.
#[derive(Clone)]
pub(crate) struct Node<T> {
    children: Children<T>,
    value: Option<T>,
}

impl<T> Node<T> {
    pub(crate) fn empty() -> Self {
        Node {
            children: SparseChunk::new(),
            value: None,
        }
    }

    pub(crate) fn with_value(value: T) -> Self {
        Node {
            children: SparseChunk::new(),
            value: Some(value),
        }
    }

    fn from_parts(children: Children<T>, value: Option<T>) -> Self {
        Node { children, value }
    }

    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(crate) fn child(&self, slot: usize) -> Option<&Node<T>> {
        self.children.get(slot).map(Arc::as_ref)
    }

    #[cfg(test)]
    pub(crate) fn child_link(&self, slot: usize) -> Option<&Arc<Node<T>>> {
        self.children.get(slot)
    }

    /// A node with neither a value nor children is dead weight, and gets
    /// dropped from its parent when a path is rebuilt.
    fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Walks `depth` levels from this node along the digits of `idx` and
    /// returns the value stored where the walk ends.
    pub(crate) fn get(&self, idx: usize, depth: u8) -> Option<&T> {
        let mut node = self;
        for level in 0..depth {
            node = node.child(digit(idx, level))?;
        }
        node.value()
    }

    /// The number of values stored in this subtree. Only used for
    /// sanity-checks, so it just visits everything.
    pub(crate) fn count_values(&self) -> usize {
        let own = usize::from(self.value.is_some());
        own + self
            .children
            .iter()
            .map(|child| child.count_values())
            .sum::<usize>()
    }

    /// Whether some node strictly below this one is empty (and should have been
    /// pruned).
    pub(crate) fn has_empty_descendant(&self) -> bool {
        self.children
            .iter()
            .any(|child| child.is_empty() || child.has_empty_descendant())
    }
}

impl<T: Clone> Node<T> {
    /// A copy of this node (sharing all of its children) holding `value`.
    pub(crate) fn replace_value(&self, value: T) -> Node<T> {
        Node::from_parts(self.children.clone(), Some(value))
    }

    /// A copy of this node without its value, or `None` if that would leave
    /// nothing behind.
    pub(crate) fn clear_value(&self) -> Option<Node<T>> {
        if self.children.is_empty() {
            None
        } else {
            Some(Node::from_parts(self.children.clone(), None))
        }
    }

    /// Path copying. Returns a new version of this node, which sits at `level`,
    /// in which the node that `idx` addresses at `depth` has been replaced by
    /// `replace(old)` (`None` detaches it).
    ///
    /// Only the nodes on the path are cloned; every other subtree is shared
    /// with `self`. Nodes missing along the path are synthesized empty, and
    /// nodes left empty after the replacement are pruned on the way back up.
    /// `level` must be less than `depth`.
    pub(crate) fn rebuild<F>(&self, idx: usize, level: u8, depth: u8, replace: F) -> Node<T>
    where
        F: FnOnce(Option<&Node<T>>) -> Option<Node<T>>,
    {
        debug_assert!(level < depth);
        let slot = digit(idx, level);
        let old = self.child(slot);

        let new = if level + 1 == depth {
            replace(old)
        } else {
            let synthesized;
            let child = match old {
                Some(child) => child,
                None => {
                    synthesized = Node::empty();
                    &synthesized
                }
            };
            Some(child.rebuild(idx, level + 1, depth, replace))
        };

        let mut children = self.children.clone();
        match new.filter(|node| !node.is_empty()) {
            Some(node) => {
                children.insert(slot, Arc::new(node));
            }
            None => {
                children.remove(slot);
            }
        }
        Node::from_parts(children, self.value.clone())
    }
}
