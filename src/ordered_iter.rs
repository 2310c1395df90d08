use ::ordered_iter::{OrderedMapIterator, OrderedSetIterator};
use compare::Compare;
use crate::map;

impl<K, V> OrderedMapIterator for map::IntoIter<K, V> where K: Ord {
    type Key = K;
    type Val = V;
}

impl<'a, K, V> OrderedMapIterator for map::Iter<'a, K, V> where K: Ord {
    type Key = &'a K;
    type Val = &'a V;
}

impl<'a, K, V> OrderedMapIterator for map::IterMut<'a, K, V> where K: Ord {
    type Key = &'a K;
    type Val = &'a mut V;
}

impl<'a, 'b, K, V, C, Q: ?Sized> OrderedMapIterator for map::Range<'a, 'b, K, V, C, Q>
    where K: Ord, C: Compare<Q, K> {

    type Key = &'a K;
    type Val = &'a V;
}

impl<'a, K, V> OrderedSetIterator for map::Keys<'a, K, V> where K: Ord {}
