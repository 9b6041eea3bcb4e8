//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for the LRU eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Clone)]
pub struct LruTracker<K> {
    /// Order of keys by access time
    order: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }
}

impl<K: Eq + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == From Ordered ==
    /// Rebuilds a tracker from keys ordered most recently used first,
    /// e.g. the access order recorded in a snapshot.
    pub fn from_most_recent(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            order: keys.into_iter().collect(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If the key exists it is removed first, then added to the front.
    pub fn touch(&mut self, key: &K) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.back()
    }

    // == Iter ==
    /// Iterates over tracked keys, most recently used first.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    // == Clear ==
    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> LruTracker<String> {
        LruTracker::new()
    }

    fn touch(lru: &mut LruTracker<String>, key: &str) {
        lru.touch(&key.to_string());
    }

    #[test]
    fn test_lru_new() {
        let lru = tracker();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_touch_new_key() {
        let mut lru = tracker();

        touch(&mut lru, "key1");
        touch(&mut lru, "key2");
        touch(&mut lru, "key3");

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(&"key1".to_string()));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = tracker();

        touch(&mut lru, "key1");
        touch(&mut lru, "key2");
        touch(&mut lru, "key3");

        // Touch key1 again - should move to front
        touch(&mut lru, "key1");

        assert_eq!(lru.len(), 3);
        // key2 is now oldest
        assert_eq!(lru.peek_oldest(), Some(&"key2".to_string()));
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = tracker();

        touch(&mut lru, "key1");
        touch(&mut lru, "key2");
        touch(&mut lru, "key3");

        let evicted = lru.evict_oldest();
        assert_eq!(evicted, Some("key1".to_string()));
        assert_eq!(lru.len(), 2);

        let evicted = lru.evict_oldest();
        assert_eq!(evicted, Some("key2".to_string()));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = tracker();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = tracker();

        touch(&mut lru, "key1");
        touch(&mut lru, "key2");
        touch(&mut lru, "key3");

        lru.remove(&"key2".to_string());

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&"key2".to_string()));
        assert!(lru.contains(&"key1".to_string()));
        assert!(lru.contains(&"key3".to_string()));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = tracker();

        touch(&mut lru, "a");
        touch(&mut lru, "b");
        touch(&mut lru, "c");

        // Access in a different order:
        // touch(a): [a, c, b]
        // touch(c): [c, a, b]
        // touch(b): [b, c, a]
        touch(&mut lru, "a");
        touch(&mut lru, "c");
        touch(&mut lru, "b");

        assert_eq!(lru.evict_oldest(), Some("a".to_string()));
        assert_eq!(lru.evict_oldest(), Some("c".to_string()));
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = tracker();

        touch(&mut lru, "key1");
        touch(&mut lru, "key2");

        lru.remove(&"nonexistent".to_string());

        assert_eq!(lru.len(), 2);
        assert!(lru.contains(&"key1".to_string()));
        assert!(lru.contains(&"key2".to_string()));
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = tracker();

        touch(&mut lru, "key1");
        touch(&mut lru, "key1");
        touch(&mut lru, "key1");

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some("key1".to_string()));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_from_most_recent() {
        let lru = LruTracker::from_most_recent(vec![
            "newest".to_string(),
            "middle".to_string(),
            "oldest".to_string(),
        ]);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&"oldest".to_string()));
        let order: Vec<&String> = lru.iter().collect();
        assert_eq!(order[0], "newest");
    }

    #[test]
    fn test_lru_iter_matches_eviction_order() {
        let mut lru = tracker();

        touch(&mut lru, "a");
        touch(&mut lru, "b");
        touch(&mut lru, "c");

        let snapshot: Vec<String> = lru.iter().cloned().collect();
        assert_eq!(snapshot, vec!["c".to_string(), "b".to_string(), "a".to_string()]);

        // Rebuilding from the snapshot preserves the eviction order
        let mut rebuilt = LruTracker::from_most_recent(snapshot);
        assert_eq!(rebuilt.evict_oldest(), Some("a".to_string()));
    }
}
