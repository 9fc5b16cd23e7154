#![deny(clippy::disallowed_methods)]

//! A fixed-capacity hash table using open addressing with linear probing.
//!
//! The table never grows: `len` reports the number of slots it was created
//! with, and an insert that finds neither a vacant slot nor its own key after
//! a full cycle fails with [`TableError::Full`].

#[cfg(feature = "debug")]
use std::collections::BTreeMap;
use std::{
    borrow::Borrow,
    fmt::{self, Debug},
    hash::{BuildHasher, Hash},
    mem,
};

use thiserror::Error;
use tracing::{debug, trace};

pub mod hash;
pub mod scalar;

pub use hash::{BuildPositionWeighted, PositionWeightedHasher};
pub use scalar::Scalar;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("capacity must be positive")]
    InvalidCapacity,
    #[error("no vacant slot left in a table of capacity {capacity}")]
    Full { capacity: usize },
    #[error("key not found")]
    NotFound,
}

pub struct HashTable<K, V, S = BuildPositionWeighted> {
    hash_builder: S,
    slots: Vec<Option<(K, V)>>,
    #[cfg(feature = "debug")]
    pub probe_lengths: BTreeMap<usize, usize>,
}

// outcome of walking the probe sequence of one key
enum Probe {
    Match(usize),
    Vacant(usize),
    Exhausted,
}

impl<K, V> HashTable<K, V> {
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        HashTable::with_hasher(capacity, BuildPositionWeighted::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity);
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            hash_builder,
            slots,
            #[cfg(feature = "debug")]
            probe_lengths: BTreeMap::new(),
        })
    }

    /// The number of slots, occupied or not. Use [`HashTable::occupied`] for
    /// the number of stored entries.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Every slot's value in slot order, `None` where the slot is empty.
    pub fn values(&self) -> impl ExactSizeIterator<Item = Option<&V>> + '_ {
        self.slots.iter().map(|slot| slot.as_ref().map(|(_, v)| v))
    }

    pub fn slots(&self) -> impl ExactSizeIterator<Item = Option<(&K, &V)>> + '_ {
        self.slots.iter().map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> HashTable<K, V, S> {
    // the slot a key hashes to before any probing
    fn home<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hash_builder.hash_one(key) % self.slots.len() as u64) as usize
    }

    // returns the outcome and the number of occupied slots stepped over
    fn probe<Q>(&self, key: &Q) -> (Probe, usize)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let capacity = self.slots.len();
        let home = self.home(key);
        for probes in 0..capacity {
            let index = (home + probes) % capacity;
            match &self.slots[index] {
                Some((k, _)) if k.borrow() == key => return (Probe::Match(index), probes),
                None => return (Probe::Vacant(index), probes),
                Some(_) => {}
            }
        }
        (Probe::Exhausted, capacity)
    }

    pub fn entry(&mut self, key: K) -> Result<Entry<'_, K, V>, TableError> {
        let (probe, probes) = self.probe(&key);
        #[cfg(feature = "debug")]
        {
            *self.probe_lengths.entry(probes).or_insert(0) += 1;
        }
        match probe {
            Probe::Match(index) => {
                trace!(index, probes, "found key");
                match &mut self.slots[index] {
                    Some((_, v)) => Ok(Entry::Occupied(v)),
                    None => unreachable!("matched slot {} is empty", index),
                }
            }
            Probe::Vacant(index) => {
                trace!(index, probes, "found vacant slot");
                Ok(Entry::Vacant(key, &mut self.slots[index]))
            }
            Probe::Exhausted => {
                let capacity = self.slots.len();
                debug!(capacity, "probed every slot without a vacancy");
                Err(TableError::Full { capacity })
            }
        }
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        Ok(match self.entry(key)? {
            Entry::Occupied(v) => Some(mem::replace(v, value)),
            Entry::Vacant(key, slot) => {
                *slot = Some((key, value));
                None
            }
        })
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key).0 {
            Probe::Match(index) => self.slots[index]
                .as_ref()
                .map(|(_, v)| v)
                .ok_or(TableError::NotFound),
            Probe::Vacant(_) | Probe::Exhausted => Err(TableError::NotFound),
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key).0 {
            Probe::Match(index) => self.slots[index]
                .as_mut()
                .map(|(_, v)| v)
                .ok_or(TableError::NotFound),
            Probe::Vacant(_) | Probe::Exhausted => Err(TableError::NotFound),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        matches!(self.probe(key).0, Probe::Match(_))
    }

    // every occupied slot is reachable from its home slot without crossing a
    // vacancy, and no key is stored twice
    pub fn invariants(&self) -> bool {
        let capacity = self.slots.len();
        self.slots.iter().enumerate().all(|(index, slot)| match slot {
            None => true,
            Some((key, _)) => {
                let home = self.home(key);
                let distance = (index + capacity - home) % capacity;
                (0..distance).all(|step| self.slots[(home + step) % capacity].is_some())
                    && self.slots[index + 1..]
                        .iter()
                        .flatten()
                        .all(|(other, _)| other != key)
            }
        })
    }
}

impl<K: Debug, V: Debug, S> Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

pub enum Entry<'a, K, V> {
    Occupied(&'a mut V),
    Vacant(K, &'a mut Option<(K, V)>),
}

impl<'a, K, V> Entry<'a, K, V> {
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        if let Entry::Occupied(ref mut v) = self {
            f(v);
        }
        self
    }
    pub fn or_insert(self, v: V) -> &'a mut V {
        match self {
            Entry::Occupied(v) => v,
            Entry::Vacant(k, slot) => &mut slot.insert((k, v)).1,
        }
    }
    pub fn or_insert_with<F: FnOnce() -> V>(self, f: F) -> &'a mut V {
        match self {
            Entry::Occupied(v) => v,
            Entry::Vacant(k, slot) => &mut slot.insert((k, f())).1,
        }
    }
}
