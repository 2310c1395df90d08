//! An ordered map based on an AVL-balanced binary search tree.
//!
//! ```
//! let mut map = balanced_map::StrMap::new();
//!
//! assert!(map.insert("b".to_owned(), 1));
//! assert!(map.insert("a".to_owned(), 2));
//! assert!(map.insert("c".to_owned(), 3));
//! assert!(!map.insert("a".to_owned(), 4));
//!
//! assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
//! assert_eq!(map.get(&"a".to_owned()), Some(&2));
//! assert_eq!(map.height(), 2);
//! ```

#![warn(missing_docs)]

mod balance;
mod error;
mod node;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub mod map;

pub use error::Error;
pub use map::Map;

/// A map from strings to counts.
pub type StrMap = Map<String, usize>;
