use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Simple generic TTL map keyed by u64 (Telegram user id).
/// Holds in-flight registration conversations; entries expire after the idle
/// TTL so abandoned conversations cannot accumulate. Access refreshes the
/// idle clock.
pub struct TtlCache<V> {
    ttl: Duration,
    map: HashMap<u64, (Instant, V)>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: u64, value: V) {
        self.purge_expired();
        self.map.insert(key, (Instant::now(), value));
    }

    /// Returns the live entry for `key`, refreshing its idle timestamp.
    /// An expired entry is dropped and reads as absent.
    pub fn get_mut(&mut self, key: &u64) -> Option<&mut V> {
        let expired = matches!(self.map.get(key), Some((ts, _)) if ts.elapsed() >= self.ttl);
        if expired {
            self.map.remove(key);
            return None;
        }
        self.map.get_mut(key).map(|(ts, v)| {
            *ts = Instant::now();
            v
        })
    }

    pub fn remove(&mut self, key: &u64) -> Option<V> {
        self.map.remove(key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.map.retain(|_, (ts, _)| ts.elapsed() < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_entries_read_as_absent() {
        let mut cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(0));
        cache.insert(1, 7);
        assert!(cache.get_mut(&1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn live_entries_are_mutable_in_place() {
        let mut cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, 7);
        *cache.get_mut(&1).unwrap() = 8;
        assert_eq!(cache.remove(&1), Some(8));
        assert!(cache.get_mut(&1).is_none());
    }
}
