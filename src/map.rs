//! An ordered map based on an AVL-balanced binary search tree.

use compare::{Compare, Natural};
use log::debug;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops;
use crate::error::Error;
use crate::node::{self, LinkExt};

/// An ordered map based on an AVL-balanced binary search tree.
///
/// Every node's left and right subtree heights differ by at most one, so lookups, insertions
/// and removals take `O(log n)` comparisons.
///
/// Unlike `std::collections::BTreeMap`, inserting a key that is already present does not
/// overwrite its value: [`insert`](Map::insert) reports the duplicate by returning `false`.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
pub struct Map<K, V, C = Natural<K>> where C: Compare<K> {
    root: node::Link<K, V>,
    len: usize,
    cmp: C,
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = balanced_map::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Map { root: None, len: 0, cmp }
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// assert_eq!(map.height(), 0);
    ///
    /// for key in 0..7 { map.insert(key, ()); }
    /// assert_eq!(map.height(), 3);
    /// ```
    pub fn height(&self) -> usize { self.root.height() }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.len);
        self.root = None;
        self.len = 0;
    }

    /// Inserts an entry into the map and returns `true`, unless the map already contains the
    /// key, in which case the map is left unchanged and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// assert!(map.insert(1, "a"));
    /// assert!(!map.insert(1, "b"));
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let inserted = node::insert(&mut self.root, &self.cmp, key, value);
        if inserted { self.len += 1; }
        inserted
    }

    /// Removes the entry with the given key, returning `true` if the map contained it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// map.insert(1, "a");
    ///
    /// assert!(map.remove(&1));
    /// assert!(!map.remove(&1));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> bool where C: Compare<Q, K> {
        self.remove_entry(key).is_some()
    }

    /// Removes and returns the entry with the given key, or `None` if the map does not
    /// contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
        where C: Compare<Q, K> {

        let key_value = node::remove(&mut self.root, &self.cmp, key);
        if key_value.is_some() { self.len -= 1; }
        key_value
    }

    /// Checks if the map contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        node::get(&self.root, &self.cmp, key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        node::get(&self.root, &self.cmp, key).map(|node| node.key_value().1)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        node::get_mut(&mut self.root, &self.cmp, key)
    }

    /// Returns a mutable reference to the value associated with the given key, first
    /// inserting `V::default()` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts = balanced_map::StrMap::new();
    ///
    /// for word in "to be or not to be".split(' ') {
    ///     *counts.get_or_default(word.to_owned()) += 1;
    /// }
    ///
    /// assert_eq!(counts.get(&"be".to_owned()), Some(&2));
    /// assert_eq!(counts.get(&"or".to_owned()), Some(&1));
    /// assert_eq!(counts.len(), 4);
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V where K: Clone, V: Default {
        self.insert(key.clone(), V::default());

        match node::get_mut(&mut self.root, &self.cmp, &key) {
            Some(value) => value,
            None => unreachable!("key missing after insertion"),
        }
    }

    /// Returns a reference to the map's minimum key and a reference to its associated
    /// value, or `None` if the map is empty.
    pub fn min(&self) -> Option<(&K, &V)> {
        node::find_min(&self.root).map(node::Node::key_value)
    }

    /// Returns a reference to the map's maximum key and a reference to its associated
    /// value, or `None` if the map is empty.
    pub fn max(&self) -> Option<(&K, &V)> {
        node::find_max(&self.root).map(node::Node::key_value)
    }

    /// Returns clones of the values whose keys lie in the inclusive interval `[low, high]`,
    /// in ascending key order. The result is empty if `low` is greater than `high`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    /// for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() { map.insert(*key, i); }
    ///
    /// assert_eq!(map.find_range(&"b", &"d"), [1, 2, 3]);
    /// assert_eq!(map.find_range(&"bb", &"cc"), [2]);
    /// assert!(map.find_range(&"x", &"z").is_empty());
    /// assert!(map.find_range(&"d", &"b").is_empty());
    /// ```
    pub fn find_range<Q: ?Sized>(&self, low: &Q, high: &Q) -> Vec<V>
        where C: Compare<Q, K>, V: Clone {

        let mut values = vec![];
        node::visit_range(&self.root, &self.cmp, low, high, &mut |_, value: &V| {
            values.push(value.clone())
        });
        values
    }

    /// Returns an iterator over the entries whose keys lie in the inclusive interval
    /// `[low, high]`, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: balanced_map::Map<_, _> = (1..10).map(|i| (i, i * 10)).collect();
    ///
    /// let mut it = map.range(&3, &5);
    /// assert_eq!(it.next(), Some((&3, &30)));
    /// assert_eq!(it.next(), Some((&4, &40)));
    /// assert_eq!(it.next(), Some((&5, &50)));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn range<'a, 'b, Q: ?Sized>(&'a self, low: &Q, high: &'b Q)
        -> Range<'a, 'b, K, V, C, Q> where C: Compare<Q, K> {

        Range(node::Range::new(&self.root, &self.cmp, low, high))
    }

    /// Returns an iterator over the map's keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    ///
    /// map.insert("b", 1);
    /// map.insert("a", 2);
    /// map.insert("c", 3);
    ///
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [&"a", &"b", &"c"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> { Values(self.iter()) }

    /// Returns an iterator over mutable references to the map's values in ascending key
    /// order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> { ValuesMut(self.iter_mut()) }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    pub fn iter(&self) -> Iter<'_, K, V> { Iter(node::Iter::new(&self.root, self.len)) }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    ///
    /// for (_, value) in map.iter_mut() { *value *= 10; }
    ///
    /// assert_eq!(map.get(&"a"), Some(&10));
    /// assert_eq!(map.get(&"b"), Some(&20));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut(node::IterMut::new(&mut self.root, self.len))
    }

    /// Returns a value that draws the tree sideways when displayed.
    ///
    /// The right subtree is printed above its parent and the left subtree below it, and each
    /// level is indented by four more spaces. Every line shows `key:value (h:height)`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = balanced_map::Map::new();
    ///
    /// map.insert("b", 1);
    /// map.insert("a", 2);
    /// map.insert("c", 3);
    ///
    /// assert_eq!(map.render().to_string(), "    c:3 (h:1)\nb:1 (h:2)\n    a:2 (h:1)\n");
    /// assert_eq!(map.render().with_balance().to_string(),
    ///            "    c:3 (h:1) (b:0)\nb:1 (h:2) (b:0)\n    a:2 (h:1) (b:0)\n");
    /// ```
    pub fn render(&self) -> Render<'_, K, V> { Render { root: &self.root, show_balance: false } }

    /// Checks the tree's structural invariants, returning the first violation found.
    ///
    /// The checked invariants are strictly ascending in-order keys, correct cached heights,
    /// balance factors within `-1..=1` and an entry count matching the reachable nodes.
    pub fn validate(&self) -> Result<(), Error> {
        let mut count = 0;
        node::validate(&self.root, &self.cmp, None, None, 0, &mut count)?;

        if count != self.len {
            return Err(Error::Len { len: self.len, count });
        }

        Ok(())
    }
}

impl<K, V, C> Clone for Map<K, V, C> where K: Clone, V: Clone, C: Compare<K> + Clone {
    fn clone(&self) -> Self {
        Map { root: self.root.clone(), len: self.len, cmp: self.cmp.clone() }
    }

    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.root = other.root.clone();
        self.len = other.len;
        self.cmp = other.cmp.clone();
    }
}

impl<K, V, C> Debug for Map<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Display for Map<K, V, C> where K: Display, V: Display, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { Display::fmt(&self.render(), f) }
}

impl<K, V, C> Default for Map<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> FromIterator<(K, V)> for Map<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map = Map::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for Map<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: Hasher>(&self, h: &mut H) {
        self.len.hash(h);
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &'a Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Map<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { IntoIter(node::IntoIter::new(self.root, self.len)) }
}

impl<K, V, C> PartialEq for Map<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.iter().zip(other.iter())
                .all(|(l, r)| self.cmp.compares_eq(l.0, r.0) && l.1 == r.1)
    }
}

impl<K, V, C> Eq for Map<K, V, C> where V: Eq, C: Compare<K> {}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`IntoIterator`]:
///
/// ```
/// let mut map = balanced_map::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// let mut it = map.into_iter();
/// assert_eq!(it.next(), Some((1, "a")));
/// assert_eq!(it.next(), Some((2, "b")));
/// assert_eq!(it.next(), Some((3, "c")));
/// assert_eq!(it.next(), None);
/// ```
pub struct IntoIter<K, V>(node::IntoIter<K, V>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
pub struct IterMut<'a, K: 'a, V: 'a>(node::IterMut<'a, K, V>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the map's keys in ascending order.
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values in ascending key order.
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An iterator over mutable references to the map's values in ascending key order.
pub struct ValuesMut<'a, K: 'a, V: 'a>(IterMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<&'a mut V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

/// An iterator over the entries whose keys lie in an inclusive interval.
///
/// Acquire through [`Map::range`].
pub struct Range<'a, 'b, K: 'a, V: 'a, C: 'a, Q: ?Sized + 'b>(node::Range<'a, 'b, K, V, C, Q>);

impl<'a, 'b, K, V, C, Q: ?Sized> Clone for Range<'a, 'b, K, V, C, Q> {
    fn clone(&self) -> Self { Range(self.0.clone()) }
}

impl<'a, 'b, K, V, C, Q: ?Sized> Iterator for Range<'a, 'b, K, V, C, Q>
    where C: Compare<Q, K> {

    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
}

/// Draws a map sideways. Acquire through [`Map::render`].
pub struct Render<'a, K: 'a, V: 'a> {
    root: &'a node::Link<K, V>,
    show_balance: bool,
}

impl<'a, K, V> Render<'a, K, V> {
    /// Appends each node's balance factor, `(b:factor)`, to its line.
    pub fn with_balance(mut self) -> Self {
        self.show_balance = true;
        self
    }
}

impl<'a, K, V> Display for Render<'a, K, V> where K: Display, V: Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        node::render(self.root, f, 0, self.show_balance)
    }
}
