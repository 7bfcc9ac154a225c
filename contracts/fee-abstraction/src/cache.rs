use std::collections::BTreeMap;
use std::ops::Bound;

use cosmwasm_std::{Order, Record, Storage};

/// A write buffer over another store. Reads see buffered writes first; nothing reaches the
/// underlying store until `commit`. Dropping the cache discards every write made through it.
pub struct CacheStorage<'a> {
    base: &'a mut dyn Storage,
    /// `None` marks a deletion
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CacheStorage<'a> {
    pub fn new(base: &'a mut dyn Storage) -> Self {
        CacheStorage {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Number of keys written or deleted through the cache
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    pub fn commit(self) {
        for (key, value) in self.pending {
            match value {
                Some(value) => self.base.set(&key, &value),
                None => self.base.remove(&key),
            }
        }
    }
}

impl Storage for CacheStorage<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(value) => value.clone(),
            None => self.base.get(key),
        }
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Box::new(std::iter::empty());
            }
        }

        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.base.range(start, end, Order::Ascending).collect();

        let lower = start.map_or(Bound::Unbounded, |start| Bound::Included(start.to_vec()));
        let upper = end.map_or(Bound::Unbounded, |end| Bound::Excluded(end.to_vec()));
        for (key, value) in self.pending.range((lower, upper)) {
            match value {
                Some(value) => merged.insert(key.clone(), value.clone()),
                None => merged.remove(key),
            };
        }

        let records: Vec<Record> = merged.into_iter().collect();
        match order {
            Order::Ascending => Box::new(records.into_iter()),
            Order::Descending => Box::new(records.into_iter().rev()),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), None);
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::MockStorage;

    use super::*;

    #[test]
    fn writes_are_invisible_until_commit() {
        let mut base = MockStorage::new();
        base.set(b"a", b"1");
        base.set(b"b", b"2");

        let mut cache = CacheStorage::new(&mut base);
        cache.set(b"c", b"3");
        cache.remove(b"a");
        assert_eq!(cache.get(b"a"), None);
        assert_eq!(cache.get(b"b"), Some(b"2".to_vec()));
        assert_eq!(cache.get(b"c"), Some(b"3".to_vec()));
        assert_eq!(cache.pending_writes(), 2);

        // dropped without committing
        drop(cache);
        assert_eq!(base.get(b"a"), Some(b"1".to_vec()));
        assert_eq!(base.get(b"c"), None);

        let mut cache = CacheStorage::new(&mut base);
        cache.set(b"c", b"3");
        cache.remove(b"a");
        cache.commit();
        assert_eq!(base.get(b"a"), None);
        assert_eq!(base.get(b"c"), Some(b"3".to_vec()));
    }

    #[test]
    fn ranging_merges_pending_writes() {
        let mut base = MockStorage::new();
        base.set(b"a", b"1");
        base.set(b"b", b"2");
        base.set(b"d", b"4");

        let mut cache = CacheStorage::new(&mut base);
        cache.set(b"c", b"3");
        cache.set(b"b", b"22");
        cache.remove(b"d");

        let records: Vec<_> = cache.range(None, None, Order::Ascending).collect();
        assert_eq!(
            records,
            vec![
                (b"a".to_vec(), b"1".to_vec()),
                (b"b".to_vec(), b"22".to_vec()),
                (b"c".to_vec(), b"3".to_vec()),
            ],
        );

        let keys: Vec<_> = cache
            .range(Some(&b"b"[..]), Some(&b"d"[..]), Order::Descending)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"c".to_vec(), b"b".to_vec()]);

        assert_eq!(cache.range(Some(&b"d"[..]), Some(&b"b"[..]), Order::Ascending).count(), 0);
    }
}
