use super::group::Key;
use crate::Points;
use std::collections::HashMap;

/// Lookup accounting. Matches hand these up so the trainer can report
/// the hit rate of every solver it ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.lookups().max(1) as f64
    }
}

impl std::ops::Add for CacheStats {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            hits: self.hits + rhs.hits,
            misses: self.misses + rhs.misses,
            evictions: self.evictions + rhs.evictions,
        }
    }
}

/// Bounded memo table from card multisets to their minimum deadwood.
///
/// Entries are stamped with a logical clock on every read and write.
/// When full, the least recently touched half is dropped in one sweep,
/// which keeps inserts amortized O(1) while approximating LRU order.
#[derive(Debug)]
pub struct Cache {
    capacity: usize,
    clock: u64,
    map: HashMap<Key, (Points, u64)>,
    stats: CacheStats,
}

impl Default for Cache {
    fn default() -> Self {
        Self::with_capacity(crate::SOLVER_CACHE_CAPACITY)
    }
}

impl Cache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(2),
            clock: 0,
            map: HashMap::with_capacity(capacity.max(2)),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, key: &Key) -> Option<Points> {
        self.clock += 1;
        match self.map.get_mut(key) {
            Some((points, stamp)) => {
                *stamp = self.clock;
                self.stats.hits += 1;
                Some(*points)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, key: Key, points: Points) {
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            self.evict();
        }
        self.clock += 1;
        self.map.insert(key, (points, self.clock));
    }

    /// drops every entry stamped at or before the median stamp
    fn evict(&mut self) {
        let mut stamps = self.map.values().map(|(_, s)| *s).collect::<Vec<_>>();
        let mid = (stamps.len() - 1) / 2;
        let (_, median, _) = stamps.select_nth_unstable(mid);
        let median = *median;
        let before = self.map.len();
        self.map.retain(|_, (_, stamp)| *stamp > median);
        self.stats.evictions += (before - self.map.len()) as u64;
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.clock = 0;
        self.stats = CacheStats::default();
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gin::CardGroup;

    fn key(s: &str) -> Key {
        CardGroup::try_from(s).unwrap().key()
    }

    #[test]
    fn counts_hits_and_misses() {
        let mut cache = Cache::with_capacity(8);
        assert_eq!(cache.get(&key("9c 9h 9s")), None);
        cache.put(key("9c 9h 9s"), 0);
        assert_eq!(cache.get(&key("9s 9h 9c")), Some(0));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn stays_within_capacity() {
        let mut cache = Cache::with_capacity(4);
        for (i, s) in ["Ac", "2c", "3c", "4c", "5c", "6c", "7c"].iter().enumerate() {
            cache.put(key(s), i as Points);
            assert!(cache.len() <= 4);
        }
        assert!(cache.stats().evictions > 0);
    }

    #[test]
    fn evicts_least_recently_touched() {
        let mut cache = Cache::with_capacity(4);
        cache.put(key("Ac"), 1);
        cache.put(key("2c"), 2);
        cache.put(key("3c"), 3);
        cache.put(key("4c"), 4);
        cache.get(&key("Ac"));
        cache.get(&key("2c"));
        cache.put(key("5c"), 5);
        assert_eq!(cache.get(&key("Ac")), Some(1));
        assert_eq!(cache.get(&key("2c")), Some(2));
        assert_eq!(cache.get(&key("5c")), Some(5));
        assert_eq!(cache.get(&key("3c")), None);
    }

    #[test]
    fn clear_resets() {
        let mut cache = Cache::with_capacity(4);
        cache.put(key("Ac"), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
