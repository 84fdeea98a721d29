use std::fmt::{Debug, Formatter};

use crate::compare::{ByKey, Compare, Natural};
use crate::error::Result;
use crate::treap_rk::TreapRk;

/// Key to value map with rank queries, stored as `(key, value)` pairs in a [`TreapRk`] ordered
/// by key alone. Keys are unique.
pub struct RankMap<K, V, C = Natural> {
    tree: TreapRk<(K, V), ByKey<C>>,
}

impl<K: Debug, V: Debug, C> Debug for RankMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.tree.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<K, V, C: Compare<K> + Default> Default for RankMap<K, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Compare<K>> RankMap<K, V, C> {
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_compare(C::default())
    }

    pub fn with_seed(seed: u64) -> Self
    where
        C: Default,
    {
        Self {
            tree: TreapRk::with_seed_and_compare(seed, ByKey(C::default())),
        }
    }

    pub fn with_compare(cmp: C) -> Self {
        Self {
            tree: TreapRk::with_compare(ByKey(cmp)),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts or replaces; returns the value previously stored under `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.tree.get_mut_by(|cmp, e| cmp.0.compare(&key, &e.0)) {
            return Some(std::mem::replace(&mut entry.1, value));
        }
        // Known absent, so this never lands next to an equal key.
        self.tree.insert_dup((key, value));
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let cmp = &self.tree.key_comp().0;
        self.tree.search_by(|e| cmp.compare(key, &e.0)).map(|e| &e.1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree
            .get_mut_by(|cmp, e| cmp.0.compare(key, &e.0))
            .map(|e| &mut e.1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree
            .remove_with(|cmp, e| cmp.0.compare(key, &e.0))
            .map(|(_, v)| v)
    }

    /// Entry with `pos` smaller keys before it.
    pub fn select(&self, pos: usize) -> Result<(&K, &V)> {
        self.tree.select(pos).map(|(k, v)| (k, v))
    }

    /// Rank of `key` and its value if present.
    pub fn position(&self, key: &K) -> (usize, Option<&V>) {
        let cmp = &self.tree.key_comp().0;
        let (rank, found) = self.tree.position_by(|e| cmp.compare(key, &e.0));
        (rank, found.map(|e| &e.1))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.tree.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.iter().map(|(_, v)| v)
    }

    pub fn verify(&self) -> bool {
        self.tree.verify()
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for RankMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
