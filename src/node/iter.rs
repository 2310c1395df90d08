use compare::Compare;
use super::{Link, Node};

/// In-order iterator over shared references. The stack holds the nodes whose left subtrees
/// have been entered but which have not been yielded yet.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    size: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(root: &'a Link<K, V>, size: usize) -> Self {
        let mut it = Iter { stack: vec![], size };
        it.push_left(root);
        it
    }

    fn push_left(&mut self, mut link: &'a Link<K, V>) {
        while let Some(ref node) = *link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter { stack: self.stack.clone(), size: self.size } }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        self.size -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

/// In-order iterator over mutable references to the values.
pub struct IterMut<'a, K, V> {
    stack: Vec<(&'a K, &'a mut V, &'a mut Link<K, V>)>,
    size: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub fn new(root: &'a mut Link<K, V>, size: usize) -> Self {
        let mut it = IterMut { stack: vec![], size };
        it.push_left(root);
        it
    }

    fn push_left(&mut self, mut link: &'a mut Link<K, V>) {
        while let Some(node) = link {
            let Node { ref key, ref mut value, ref mut left, ref mut right, .. } = **node;
            self.stack.push((key, value, right));
            link = left;
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, right) = self.stack.pop()?;
        self.push_left(right);
        self.size -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

/// In-order iterator that takes ownership of the nodes.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    size: usize,
}

impl<K, V> IntoIter<K, V> {
    pub fn new(root: Link<K, V>, size: usize) -> Self {
        let mut it = IntoIter { stack: vec![], size };
        it.push_left(root);
        it
    }

    fn push_left(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left(node.right.take());
        self.size -= 1;
        let node = *node;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

/// In-order iterator over the entries whose keys lie in `[low, high]`.
///
/// Seeding the stack skips every node below `low`; iteration stops at the first key above
/// `high`.
pub struct Range<'a, 'b, K, V, C, Q: ?Sized> {
    stack: Vec<&'a Node<K, V>>,
    cmp: &'a C,
    high: &'b Q,
}

impl<'a, 'b, K, V, C, Q: ?Sized> Range<'a, 'b, K, V, C, Q> where C: Compare<Q, K> {
    pub fn new(root: &'a Link<K, V>, cmp: &'a C, low: &Q, high: &'b Q) -> Self {
        let mut it = Range { stack: vec![], cmp, high };
        let mut link = root;

        while let Some(ref node) = *link {
            if cmp.compares_gt(low, &node.key) {
                link = &node.right;
            } else {
                it.stack.push(node);
                link = &node.left;
            }
        }

        it
    }

    fn push_left(&mut self, mut link: &'a Link<K, V>) {
        while let Some(ref node) = *link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, 'b, K, V, C, Q: ?Sized> Clone for Range<'a, 'b, K, V, C, Q> {
    fn clone(&self) -> Self {
        Range { stack: self.stack.clone(), cmp: self.cmp, high: self.high }
    }
}

impl<'a, 'b, K, V, C, Q: ?Sized> Iterator for Range<'a, 'b, K, V, C, Q>
    where C: Compare<Q, K> {

    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        if self.cmp.compares_lt(self.high, &node.key) {
            self.stack.clear();
            return None;
        }

        self.push_left(&node.right);
        Some((&node.key, &node.value))
    }
}
