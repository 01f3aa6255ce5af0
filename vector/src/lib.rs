//! A persistent vector with structural sharing.
//!
//! [`Vector`] is an immutable sequence: [`Vector::set`], [`Vector::push_back`]
//! and [`Vector::pop_back`] return a new version and leave the old one intact.
//! Internally it is a radix-32 tree whose nodes are shared between versions, so
//! each of those operations only copies the nodes on a single root-to-element
//! path.
//!
//! ```rust
//! use immutable_vector::Vector;
//!
//! let v1: Vector<_> = (0..100).collect();
//! let v2 = v1.set(42, -1).unwrap().push_back(100);
//! assert_eq!((v1.size(), v1[42]), (100, 42));
//! assert_eq!((v2.size(), v2[42], v2[100]), (101, -1, 100));
//! ```

pub mod addressing;
mod error;
mod node;
pub mod vector;

pub use error::{Error, Result};
pub use vector::Vector;
