use thiserror::Error;

/// A structural invariant violation reported by [`Map::validate`](crate::Map::validate).
///
/// No sequence of calls through the public API produces one of these; an `Err` means the tree
/// is corrupt.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A key is not strictly between the keys of its ancestors.
    #[error("key at depth {depth} is out of order")]
    Unordered {
        /// Depth of the offending node, the root being at depth 0.
        depth: usize,
    },

    /// A node's cached height differs from the height of its subtree.
    #[error("node at depth {depth} stores height {stored} but its subtree has height {computed}")]
    Height {
        /// Depth of the offending node.
        depth: usize,
        /// The cached height.
        stored: usize,
        /// `1 + max(height(left), height(right))`.
        computed: usize,
    },

    /// A node's balance factor lies outside `-1..=1`.
    #[error("node at depth {depth} has balance factor {factor}")]
    Unbalanced {
        /// Depth of the offending node.
        depth: usize,
        /// Left subtree height minus right subtree height.
        factor: isize,
    },

    /// The stored entry count differs from the number of reachable nodes.
    #[error("map reports {len} entries but {count} nodes are reachable")]
    Len {
        /// The stored entry count.
        len: usize,
        /// The number of nodes reachable from the root.
        count: usize,
    },
}
