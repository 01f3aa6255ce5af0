use std::{fmt, ops::Index, sync::Arc};

use crate::{
    addressing::depth_for,
    error::{Error, Result},
    node::Node,
};

/// A persistent vector.
///
/// A `Vector` is a handle to an immutable radix-32 tree plus a length. The
/// "modifying" operations ([`set`](Vector::set), [`push_back`](Vector::push_back),
/// [`pop_back`](Vector::pop_back)) leave `self` alone and return a new handle
/// that shares every subtree it didn't need to change. Cloning a handle is
/// constant-time.
///
/// Nodes are reference-counted with [`Arc`], so handles can be shared freely
/// between threads.
pub struct Vector<T> {
    root: Arc<Node<T>>,
    size: usize,
}

impl<T> Vector<T> {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Vector {
            root: Arc::new(Node::empty()),
            size: 0,
        }
    }

    /// The number of elements in this vector.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Gets the element at `idx`.
    ///
    /// Runs in time `O(log idx)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use immutable_vector::{Error, Vector};
    /// let vec = Vector::from([10, 20, 30]);
    /// assert_eq!(vec.get(1), Ok(&20));
    /// assert_eq!(vec.get(3), Err(Error::OutOfBounds { index: 3, size: 3 }));
    /// ```
    pub fn get(&self, idx: usize) -> Result<&T> {
        self.check_bounds(idx)?;
        self.root
            .get(idx, depth_for(idx))
            .ok_or(Error::NotFound { index: idx })
    }

    /// The last element, or `None` if we're empty.
    pub fn last(&self) -> Option<&T> {
        self.size
            .checked_sub(1)
            .and_then(|idx| self.root.get(idx, depth_for(idx)))
    }

    /// Returns `true` if both handles point to the same tree, in which case
    /// they are guaranteed to have the same contents.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.size == other.size && Arc::ptr_eq(&self.root, &other.root)
    }

    fn check_bounds(&self, idx: usize) -> Result<()> {
        if idx < self.size {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                index: idx,
                size: self.size,
            })
        }
    }

    /// Panics if the tree doesn't agree with the length, or if it holds nodes
    /// that should have been pruned.
    pub fn check_invariants(&self) {
        assert!(self.root.value().is_none(), "the root never holds a value");
        assert_eq!(self.root.count_values(), self.size);
        assert!(!self.root.has_empty_descendant());
        for idx in 0..self.size {
            assert!(
                self.root.get(idx, depth_for(idx)).is_some(),
                "missing element at index {idx}"
            );
        }
    }
}

impl<T: Clone> Vector<T> {
    /// Creates a vector holding `count` copies of `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use immutable_vector::Vector;
    /// let vec = Vector::filled(3, 7);
    /// assert_eq!(vec.size(), 3);
    /// assert_eq!(vec[2], 7);
    /// ```
    pub fn filled(count: usize, value: T) -> Self {
        std::iter::repeat(value).take(count).collect()
    }

    /// Returns a copy of this vector with the element at `idx` replaced by
    /// `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use immutable_vector::Vector;
    /// let old = Vector::from([1, 2, 3]);
    /// let new = old.set(1, 5).unwrap();
    /// assert_eq!(new[1], 5);
    /// assert_eq!(old[1], 2);
    /// assert!(old.set(3, 0).is_err());
    /// ```
    pub fn set(&self, idx: usize, value: T) -> Result<Self> {
        self.check_bounds(idx)?;
        Ok(Vector {
            root: Arc::new(self.assign(idx, value)),
            size: self.size,
        })
    }

    /// Returns a copy of this vector with `value` appended.
    ///
    /// Runs in time `O(log n)` where `n` is the vector length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use immutable_vector::Vector;
    /// let empty = Vector::new();
    /// let one = empty.push_back("a");
    /// assert_eq!(one.size(), 1);
    /// assert_eq!(one[0], "a");
    /// assert!(empty.is_empty());
    /// ```
    pub fn push_back(&self, value: T) -> Self {
        let idx = self.size;
        if idx > 0 && depth_for(idx) > depth_for(idx - 1) {
            log::trace!("vector grows to depth {} at index {idx}", depth_for(idx));
        }
        Vector {
            root: Arc::new(self.assign(idx, value)),
            size: idx + 1,
        }
    }

    /// Returns a copy of this vector with the last element removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use immutable_vector::{Error, Vector};
    /// let vec = Vector::from([1, 2]);
    /// let popped = vec.pop_back().unwrap();
    /// assert_eq!(popped.size(), 1);
    /// assert!(popped.get(1).is_err());
    /// assert_eq!(vec[1], 2);
    ///
    /// assert_eq!(Vector::<i32>::new().pop_back().unwrap_err(), Error::EmptyVector);
    /// ```
    pub fn pop_back(&self) -> Result<Self> {
        let idx = self.size.checked_sub(1).ok_or(Error::EmptyVector)?;
        let depth = depth_for(idx);
        if self.root.get(idx, depth).is_none() {
            return Err(Error::NotFound { index: idx });
        }

        if idx > 0 && depth > depth_for(idx - 1) {
            log::trace!("vector shrinks to depth {} at index {idx}", depth - 1);
        }
        let root = self
            .root
            .rebuild(idx, 0, depth, |old| old.and_then(Node::clear_value));
        Ok(Vector {
            root: Arc::new(root),
            size: idx,
        })
    }

    /// A new root in which `idx` holds `value`. Whatever hangs below the
    /// addressed node is kept.
    fn assign(&self, idx: usize, value: T) -> Node<T> {
        self.root.rebuild(idx, 0, depth_for(idx), |old| {
            Some(match old {
                Some(old) => old.replace_value(value),
                None => Node::with_value(value),
            })
        })
    }
}

impl<T> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Vector {
            root: Arc::clone(&self.root),
            size: self.size,
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            *self = self.push_back(elt);
        }
    }
}

impl<T: Clone> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Vector::new();
        ret.extend(iter);
        ret
    }
}

impl<T: Clone, const M: usize> From<[T; M]> for Vector<T> {
    fn from(elts: [T; M]) -> Self {
        elts.into_iter().collect()
    }
}

impl<T: Clone> From<Vec<T>> for Vector<T> {
    fn from(elts: Vec<T>) -> Self {
        elts.into_iter().collect()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(elt) => elt,
            Err(e) => panic!("{e}"),
        }
    }
}
