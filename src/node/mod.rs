mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::fmt::{self, Display};
use std::mem::{replace, swap};
use crate::balance;
use crate::error::Error;

pub use self::iter::{IntoIter, Iter, IterMut, Range};

pub type Link<K, V> = Option<Box<Node<K, V>>>;

pub trait LinkExt {
    fn height(&self) -> usize;
}

impl<K, V> LinkExt for Link<K, V> {
    fn height(&self) -> usize { balance::height(self.as_ref()) }
}

#[derive(Clone)]
pub struct Node<K, V> {
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node { left: None, right: None, height: 1, key, value }
    }

    pub fn key_value(&self) -> (&K, &V) { (&self.key, &self.value) }
}

impl<K, V> balance::Node for Box<Node<K, V>> {
    fn height(&self) -> usize { self.height }

    fn set_height(&mut self, height: usize) { self.height = height; }

    fn left(&self) -> Option<&Self> { self.left.as_ref() }

    fn left_mut(&mut self) -> Option<&mut Self> { self.left.as_mut() }

    fn right(&self) -> Option<&Self> { self.right.as_ref() }

    fn right_mut(&mut self) -> Option<&mut Self> { self.right.as_mut() }

    fn rotate_left(&mut self) {
        let mut save = match self.right.take() {
            None => return,
            Some(save) => save,
        };
        log::trace!("rotate left");
        swap(&mut self.right, &mut save.left); // save.left now None
        balance::update_height(self);
        swap(self, &mut save);
        self.left = Some(save);
        balance::update_height(self);
    }

    fn rotate_right(&mut self) {
        let mut save = match self.left.take() {
            None => return,
            Some(save) => save,
        };
        log::trace!("rotate right");
        swap(&mut self.left, &mut save.right); // save.right now None
        balance::update_height(self);
        swap(self, &mut save);
        self.right = Some(save);
        balance::update_height(self);
    }
}

/// Inserts the entry below `link` unless its key is already present, in which case the tree
/// is left untouched and `false` is returned.
pub fn insert<K, V, C>(link: &mut Link<K, V>, cmp: &C, key: K, value: V) -> bool
    where C: Compare<K> {

    match *link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            true
        }
        Some(ref mut node) => {
            let inserted = match cmp.compare(&key, &node.key) {
                Equal => return false,
                Less => insert(&mut node.left, cmp, key, value),
                Greater => insert(&mut node.right, cmp, key, value),
            };

            if inserted { balance::rebalance(node); }
            inserted
        }
    }
}

/// Removes and returns the entry with the given key from the tree below `link`.
pub fn remove<K, V, C, Q: ?Sized>(link: &mut Link<K, V>, cmp: &C, key: &Q) -> Option<(K, V)>
    where C: Compare<Q, K> {

    let node = match *link {
        None => return None,
        Some(ref mut node) => node,
    };

    let key_value = match cmp.compare(key, &node.key) {
        Equal => return unlink(link),
        Less => remove(&mut node.left, cmp, key),
        Greater => remove(&mut node.right, cmp, key),
    };

    if key_value.is_some() { balance::rebalance(node); }
    key_value
}

// Removes the node at `link`. A node with two children takes over its in-order successor's
// entry instead and the successor node is freed.
fn unlink<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let mut node = link.take()?;

    match (node.left.take(), node.right.take()) {
        (None, None) => {}
        (Some(child), None) | (None, Some(child)) => *link = Some(child),
        (Some(left), Some(right)) => {
            let (rest, successor) = remove_min(right);
            let successor = *successor;
            node.left = Some(left);
            node.right = rest;

            let key = replace(&mut node.key, successor.key);
            let value = replace(&mut node.value, successor.value);
            balance::rebalance(&mut node);
            *link = Some(node);
            return Some((key, value));
        }
    }

    let node = *node;
    Some((node.key, node.value))
}

// Detaches the leftmost node of the subtree, rebalancing along the path to it. Returns the
// remaining subtree and the detached node.
fn remove_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => (node.right.take(), node),
        Some(left) => {
            let (rest, min) = remove_min(left);
            node.left = rest;
            balance::rebalance(&mut node);
            (Some(node), min)
        }
    }
}

pub fn get<'a, K, V, C, Q: ?Sized>(link: &'a Link<K, V>, cmp: &C, key: &Q)
    -> Option<&'a Node<K, V>> where C: Compare<Q, K> {

    let node = link.as_deref()?;
    match cmp.compare(key, &node.key) {
        Equal => Some(node),
        Less => get(&node.left, cmp, key),
        Greater => get(&node.right, cmp, key),
    }
}

pub fn get_mut<'a, K, V, C, Q: ?Sized>(link: &'a mut Link<K, V>, cmp: &C, key: &Q)
    -> Option<&'a mut V> where C: Compare<Q, K> {

    let node = link.as_mut()?;
    match cmp.compare(key, &node.key) {
        Equal => Some(&mut node.value),
        Less => get_mut(&mut node.left, cmp, key),
        Greater => get_mut(&mut node.right, cmp, key),
    }
}

/// Returns the leftmost node of the subtree, or `None` if the subtree is empty.
pub fn find_min<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
    let node = link.as_deref()?;
    find_min(&node.left).or(Some(node))
}

/// Returns the rightmost node of the subtree, or `None` if the subtree is empty.
pub fn find_max<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
    let node = link.as_deref()?;
    find_max(&node.right).or(Some(node))
}

/// Calls `f` on every entry whose key lies in `[low, high]`, in ascending key order.
///
/// Subtrees that cannot hold such a key are not visited.
pub fn visit_range<'a, K, V, C, Q: ?Sized, F>(link: &'a Link<K, V>, cmp: &C, low: &Q, high: &Q,
                                              f: &mut F)
    where C: Compare<Q, K>, F: FnMut(&'a K, &'a V) {

    let node = match *link {
        None => return,
        Some(ref node) => node,
    };

    if cmp.compares_lt(low, &node.key) {
        visit_range(&node.left, cmp, low, high, f);
    }

    if cmp.compares_le(low, &node.key) && cmp.compares_ge(high, &node.key) {
        f(&node.key, &node.value);
    }

    if cmp.compares_gt(high, &node.key) {
        visit_range(&node.right, cmp, low, high, f);
    }
}

/// Writes the tree sideways: right subtree first, four spaces of indentation per level.
pub fn render<K, V>(link: &Link<K, V>, f: &mut fmt::Formatter, depth: usize, show_balance: bool)
    -> fmt::Result where K: Display, V: Display {

    let node = match *link {
        None => return Ok(()),
        Some(ref node) => node,
    };

    render(&node.right, f, depth + 1, show_balance)?;

    write!(f, "{:indent$}{}:{} (h:{})", "", node.key, node.value, node.height, indent = depth * 4)?;
    if show_balance { write!(f, " (b:{})", balance::balance_factor(node))?; }
    writeln!(f)?;

    render(&node.left, f, depth + 1, show_balance)
}

/// Checks ordering, cached heights and balance factors below `link`, returning the subtree's
/// height. `count` is incremented once per visited node.
pub fn validate<K, V, C>(link: &Link<K, V>, cmp: &C, lower: Option<&K>, upper: Option<&K>,
                         depth: usize, count: &mut usize) -> Result<usize, Error>
    where C: Compare<K> {

    let node = match *link {
        None => return Ok(0),
        Some(ref node) => node,
    };

    if lower.map_or(false, |lower| !cmp.compares_lt(lower, &node.key)) ||
       upper.map_or(false, |upper| !cmp.compares_gt(upper, &node.key)) {
        return Err(Error::Unordered { depth });
    }

    *count += 1;

    let left = validate(&node.left, cmp, lower, Some(&node.key), depth + 1, count)?;
    let right = validate(&node.right, cmp, Some(&node.key), upper, depth + 1, count)?;

    let computed = 1 + left.max(right);
    if node.height != computed {
        return Err(Error::Height { depth, stored: node.height, computed });
    }

    let factor = left as isize - right as isize;
    if !(-1..=1).contains(&factor) {
        return Err(Error::Unbalanced { depth, factor });
    }

    Ok(computed)
}
