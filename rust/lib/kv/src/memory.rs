use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::{KVStore, KVTxn};

/// MemoryStore keeps every entry in a `BTreeMap` behind a `RwLock`.
///
/// It is a drop-in substitute for `RedbStore` in tests and throwaway
/// deployments. A transaction holds the write lock for its whole body and
/// stages writes in a side map, so an aborted body leaves no trace.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> KVError {
    KVError::Storage("memory store lock poisoned".into())
}

fn scan_map(map: &BTreeMap<String, Vec<u8>>, prefix: &str) -> Vec<(String, Vec<u8>)> {
    map.range(prefix.to_string()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(scan_map(&entries, prefix))
    }

    fn transact(
        &self,
        body: &mut dyn FnMut(&mut dyn KVTxn) -> Result<(), KVError>,
    ) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let mut txn = MemoryTxn {
            base: &entries,
            staged: BTreeMap::new(),
        };
        body(&mut txn)?;

        let staged = txn.staged;
        for (key, value) in staged {
            match value {
                Some(v) => {
                    entries.insert(key, v);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}

/// Uncommitted view: `staged` holds writes (`None` marks a delete) layered
/// over the locked base map.
struct MemoryTxn<'a> {
    base: &'a BTreeMap<String, Vec<u8>>,
    staged: BTreeMap<String, Option<Vec<u8>>>,
}

impl KVTxn for MemoryTxn<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        match self.staged.get(key) {
            Some(staged) => Ok(staged.clone()),
            None => Ok(self.base.get(key).cloned()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.staged.insert(key.to_string(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, KVError> {
        let existed = self.get(key)?.is_some();
        self.staged.insert(key.to_string(), None);
        Ok(existed)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let mut merged: BTreeMap<String, Vec<u8>> = scan_map(self.base, prefix).into_iter().collect();
        for (key, value) in self.staged.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            match value {
                Some(v) => {
                    merged.insert(key.clone(), v.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }
}
