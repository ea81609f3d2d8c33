//! Size-class grouped storage with a global recency index

use lru::LruCache;
use std::collections::{BTreeMap, VecDeque};
use std::ops::RangeBounds;
use tilepool_core::{Bitmap, BitmapId};

/// Bitmaps grouped by size class.
///
/// Each group keeps its bitmaps in put order, newest at the back. The
/// recency index orders every pooled bitmap across all groups, so the least
/// recently put bitmap of the whole store is found in O(1).
pub(crate) struct GroupedStore<K> {
    groups: BTreeMap<K, VecDeque<Bitmap>>,
    recency: LruCache<BitmapId, K>,
}

impl<K: Ord + Clone> GroupedStore<K> {
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            recency: LruCache::unbounded(),
        }
    }

    pub fn insert(&mut self, key: K, bitmap: Bitmap) {
        self.recency.push(bitmap.id(), key.clone());
        self.groups.entry(key).or_default().push_back(bitmap);
    }

    /// Remove the most recently put bitmap of the `key` group
    pub fn take_newest(&mut self, key: &K) -> Option<Bitmap> {
        let group = self.groups.get_mut(key)?;
        let bitmap = group.pop_back()?;
        if group.is_empty() {
            self.groups.remove(key);
        }
        self.recency.pop(&bitmap.id());
        Some(bitmap)
    }

    /// Remove the least recently put bitmap of the whole store
    pub fn take_oldest(&mut self) -> Option<Bitmap> {
        let (id, key) = self.recency.pop_lru()?;
        let group = self.groups.get_mut(&key)?;
        // Groups only lose bitmaps from the back or via this path, so the
        // globally oldest bitmap sits at the front of its group.
        let position = group.iter().position(|bitmap| bitmap.id() == id)?;
        let bitmap = group.remove(position)?;
        if group.is_empty() {
            self.groups.remove(&key);
        }
        Some(bitmap)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.groups.contains_key(key)
    }

    /// Smallest non-empty group key within `range`
    pub fn first_key_in<R: RangeBounds<K>>(&self, range: R) -> Option<&K> {
        self.groups.range(range).next().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.recency.len()
    }

    #[cfg(test)]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
