//! Insertion-ordered, time-stamped entry store
//!
//! The map owns each value together with its insertion time. The queue holds
//! only `(key, inserted_at)` records, oldest first, and exists purely to
//! answer "which entry is oldest" for expiry sweeps and capacity eviction.
//! Every key in the map has exactly one record in the queue and vice versa.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};

/// A stored value and when it was inserted
#[derive(Debug, Clone)]
pub struct Entry<V> {
    pub value: V,
    pub inserted_at: DateTime<Utc>,
}

impl<V> Entry<V> {
    /// Whether this entry is still within `ttl` at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        is_fresh(self.inserted_at, now, ttl)
    }
}

#[derive(Debug, Clone)]
struct EvictionRecord<K> {
    key: K,
    inserted_at: DateTime<Utc>,
}

/// Map of entries plus their eviction order
#[derive(Debug, Clone)]
pub struct ExpiringStore<K, V> {
    entries: HashMap<K, Entry<V>>,
    order: VecDeque<EvictionRecord<K>>,
}

impl<K, V> Default for ExpiringStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ExpiringStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&Entry<V>> {
        self.entries.get(key)
    }

    /// Keys from oldest to newest insertion
    pub fn keys_oldest_first(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|record| &record.key)
    }

    /// Insert `value` under `key` as the newest entry.
    ///
    /// A key that is already present loses its old entry and queue record
    /// first, so it never appears twice in the eviction order.
    pub fn insert(&mut self, key: K, value: V, inserted_at: DateTime<Utc>) {
        if self.entries.contains_key(&key) {
            self.remove(&key);
        }
        self.order.push_back(EvictionRecord {
            key: key.clone(),
            inserted_at,
        });
        self.entries.insert(key, Entry { value, inserted_at });
    }

    /// Remove `key` from both the map and the queue
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        if let Some(position) = self.order.iter().position(|record| &record.key == key) {
            self.order.remove(position);
        }
        Some(entry.value)
    }

    /// Evict the oldest entry regardless of freshness
    pub fn evict_oldest(&mut self) -> Option<(K, V)> {
        let record = self.order.pop_front()?;
        let entry = self.entries.remove(&record.key)?;
        Some((record.key, entry.value))
    }

    /// Drop stale entries from the front of the queue.
    ///
    /// Stops at the first fresh record: insertion times ascend along the
    /// queue, so everything behind it is fresh too. Returns the number of
    /// entries removed.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut swept = 0;
        while let Some(front) = self.order.front() {
            if is_fresh(front.inserted_at, now, ttl) {
                break;
            }
            if let Some(record) = self.order.pop_front() {
                self.entries.remove(&record.key);
                swept += 1;
            }
        }
        swept
    }
}

fn is_fresh(inserted_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - inserted_at < ttl
}
