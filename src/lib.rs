//! In-memory index over two-dimensional integer keys, (distance, lane),
//! implemented as a height-balanced [AVL][avl] tree.
//!
//! - Insert, delete and lookup by key pair, a key pair is present at most once.
//! - Range query over an axis-aligned window of keys.
//! - Breadth-first and in-order traversals.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! ```
//! use avl_index::{Avl, Entry, Key};
//!
//! let mut index: Avl<&str> = Avl::new("myinstance");
//! assert!(index.insert(Entry::new(10, 0, "rock")));
//! assert!(index.insert(Entry::new(5, 1, "cone")));
//! assert!(!index.insert(Entry::new(10, 0, "oil")));
//!
//! assert_eq!(index.get(&Key::new(10, 0)), Some("rock"));
//! assert!(index.delete(&Key::new(5, 1)));
//! assert_eq!(index.len(), 1);
//! ```
//!
//! [avl]: https://en.wikipedia.org/wiki/AVL_tree

mod avl;
mod depth;
mod entry;
mod error;
mod obstacle;
mod track;

pub use crate::avl::{height, Avl, Node, Stats};
pub use crate::depth::Depth;
pub use crate::entry::{Entry, Key};
pub use crate::error::AvlError;
pub use crate::obstacle::{
    DamageTable, Hitbox, Obstacle, ObstacleKind, BARRIER_HEIGHT, DEFAULT_SIZE,
};
pub use crate::track::Viewport;

#[cfg(test)]
mod obstacle_test;
#[cfg(test)]
mod track_test;
