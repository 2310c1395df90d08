//! Height bookkeeping and the AVL rebalancing cases.

#![forbid(missing_docs)]

use log::trace;
use std::cmp;

/// A binary search tree node that caches the height of its subtree.
pub trait Node: Sized {
    /// Returns the cached height of the subtree rooted at this node. A leaf has height 1.
    fn height(&self) -> usize;

    /// Overwrites the cached height.
    fn set_height(&mut self, height: usize);

    /// Returns a reference to the node's left child, if any.
    fn left(&self) -> Option<&Self>;

    /// Returns a mutable reference to the node's left child, if any.
    fn left_mut(&mut self) -> Option<&mut Self>;

    /// Returns a reference to the node's right child, if any.
    fn right(&self) -> Option<&Self>;

    /// Returns a mutable reference to the node's right child, if any.
    fn right_mut(&mut self) -> Option<&mut Self>;

    /// Rotates the node to the left, if possible.
    ///
    /// Heights of the old and the new local root are recomputed, in that order.
    fn rotate_left(&mut self);

    /// Rotates the node to the right, if possible.
    ///
    /// Heights of the old and the new local root are recomputed, in that order.
    fn rotate_right(&mut self);
}

/// Returns the height of an optional subtree, counting an absent subtree as 0.
pub fn height<N>(node: Option<&N>) -> usize where N: Node {
    node.map_or(0, N::height)
}

/// Recomputes a node's height from its children.
pub fn update_height<N>(node: &mut N) where N: Node {
    let height = 1 + cmp::max(height(node.left()), height(node.right()));
    node.set_height(height);
}

/// Returns the height of the node's left subtree minus the height of its right subtree.
pub fn balance_factor<N>(node: &N) -> isize where N: Node {
    height(node.left()) as isize - height(node.right()) as isize
}

/// Recomputes the node's height and restores the AVL condition at the node.
///
/// The node's subtrees must already satisfy the AVL condition and their balance factors may
/// differ by at most two, which holds after a single insertion or removal below the node.
pub fn rebalance<N>(node: &mut N) where N: Node {
    update_height(node);

    let factor = balance_factor(node);

    if factor > 1 {
        if node.left().map_or(0, balance_factor) < 0 {
            trace!("rebalance: left-right case");
            if let Some(left) = node.left_mut() { left.rotate_left(); }
        } else {
            trace!("rebalance: left-left case");
        }
        node.rotate_right();
    } else if factor < -1 {
        if node.right().map_or(0, balance_factor) > 0 {
            trace!("rebalance: right-left case");
            if let Some(right) = node.right_mut() { right.rotate_right(); }
        } else {
            trace!("rebalance: right-right case");
        }
        node.rotate_left();
    }
}
