//! KvStore trait + KvOps CRUD operations.
//!
//! The model impls `KvStore` to declare prefix, key and hooks.
//! `KvOps<T>` provides the actual get/save/list/delete using a KVStore backend.

use std::marker::PhantomData;
use std::sync::Arc;

use marquee_core::ServiceError;
use marquee_kv::{KVError, KVStore, KVTxn};
use serde::{Serialize, de::DeserializeOwned};

/// Trait implemented by models to declare KV storage behavior.
pub trait KvStore: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Resource name used in error messages.
    const RESOURCE: &'static str;

    /// KV key prefix: "{module}:{resource}:".
    fn kv_prefix() -> &'static str;

    /// Extract the key value from this instance as a string.
    fn key_value(&self) -> String;

    /// Called before inserting a new record. Use for auto-fill (uuid, timestamps).
    fn before_create(&mut self) {}

    /// Called before updating an existing record.
    fn before_update(&mut self) {}
}

/// Map a KV failure onto the service taxonomy.
pub fn kv_err(e: KVError) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

/// Run `body` as one atomic, serialized store transaction.
///
/// Any `ServiceError` from the body aborts the transaction and is returned
/// unchanged; nothing the body wrote becomes visible.
pub fn transact<T>(
    kv: &dyn KVStore,
    mut body: impl FnMut(&mut dyn KVTxn) -> Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    struct Abort(ServiceError);

    impl From<KVError> for Abort {
        fn from(e: KVError) -> Self {
            Abort(kv_err(e))
        }
    }

    marquee_kv::transact(kv, |txn| body(txn).map_err(Abort)).map_err(|Abort(e)| e)
}

fn decode<T: KvStore>(bytes: &[u8]) -> Result<T, ServiceError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ServiceError::Internal(format!("deserialize {}: {}", T::RESOURCE, e)))
}

fn encode<T: KvStore>(record: &T) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec(record)
        .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", T::RESOURCE, e)))
}

/// CRUD operations for a KvStore model. Holds a reference to the KV backend.
pub struct KvOps<T: KvStore> {
    kv: Arc<dyn KVStore>,
    _phantom: PhantomData<T>,
}

impl<T: KvStore> Clone for KvOps<T> {
    fn clone(&self) -> Self {
        Self::new(self.kv.clone())
    }
}

impl<T: KvStore> KvOps<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _phantom: PhantomData,
        }
    }

    /// Full KV key for a key value.
    pub fn make_key(id: &str) -> String {
        format!("{}{}", T::kv_prefix(), id)
    }

    /// Get a record by key value. Returns None if not found.
    pub fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        match self.kv.get(&Self::make_key(id)).map_err(kv_err)? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Get a record or return NotFound error.
    pub fn get_or_err(&self, id: &str) -> Result<T, ServiceError> {
        self.get(id)?.ok_or_else(|| ServiceError::not_found(T::RESOURCE, id))
    }

    /// List all records with this prefix.
    pub fn list(&self) -> Result<Vec<T>, ServiceError> {
        self.list_prefix("")
    }

    /// List records whose key value starts with `sub_prefix`.
    pub fn list_prefix(&self, sub_prefix: &str) -> Result<Vec<T>, ServiceError> {
        let entries = self
            .kv
            .scan(&Self::make_key(sub_prefix))
            .map_err(kv_err)?;
        entries.iter().map(|(_, bytes)| decode(bytes)).collect()
    }

    /// Update an existing record. Calls before_update hook.
    pub fn save(&self, mut record: T) -> Result<T, ServiceError> {
        record.before_update();
        let key = Self::make_key(&record.key_value());
        self.kv.set(&key, &encode(&record)?).map_err(kv_err)?;
        Ok(record)
    }

    /// Delete a record by key value.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        transact(self.kv.as_ref(), |txn| {
            if Self::delete_in(txn, id)? {
                Ok(())
            } else {
                Err(ServiceError::not_found(T::RESOURCE, id))
            }
        })
    }

    // ── Inside a transaction ──

    /// Get a record within a transaction.
    pub fn get_in(txn: &dyn KVTxn, id: &str) -> Result<Option<T>, ServiceError> {
        match txn.get(&Self::make_key(id)).map_err(kv_err)? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Whether a record exists, without decoding it.
    pub fn exists_in(txn: &dyn KVTxn, id: &str) -> Result<bool, ServiceError> {
        Ok(txn.get(&Self::make_key(id)).map_err(kv_err)?.is_some())
    }

    /// Count records whose key value starts with `sub_prefix`.
    pub fn count_in(txn: &dyn KVTxn, sub_prefix: &str) -> Result<usize, ServiceError> {
        Ok(txn.scan(&Self::make_key(sub_prefix)).map_err(kv_err)?.len())
    }

    /// Insert a new record within a transaction. Rejects duplicates with Conflict.
    pub fn insert_in(txn: &mut dyn KVTxn, mut record: T) -> Result<T, ServiceError> {
        record.before_create();

        let id = record.key_value();
        let key = Self::make_key(&id);
        if txn.get(&key).map_err(kv_err)?.is_some() {
            return Err(ServiceError::already_exists(T::RESOURCE, &id));
        }

        txn.set(&key, &encode(&record)?).map_err(kv_err)?;
        Ok(record)
    }

    /// Overwrite a record within a transaction. Calls before_update hook.
    pub fn save_in(txn: &mut dyn KVTxn, mut record: T) -> Result<T, ServiceError> {
        record.before_update();
        let key = Self::make_key(&record.key_value());
        txn.set(&key, &encode(&record)?).map_err(kv_err)?;
        Ok(record)
    }

    /// Delete a record within a transaction. Returns whether it existed.
    pub fn delete_in(txn: &mut dyn KVTxn, id: &str) -> Result<bool, ServiceError> {
        txn.delete(&Self::make_key(id)).map_err(kv_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    // A minimal test model.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Thing {
        id: String,
        name: String,
        count: u32,
    }

    impl KvStore for Thing {
        const RESOURCE: &'static str = "thing";

        fn kv_prefix() -> &'static str {
            "test:thing:"
        }

        fn key_value(&self) -> String {
            self.id.clone()
        }

        fn before_create(&mut self) {
            if self.id.is_empty() {
                self.id = "auto-id".to_string();
            }
        }
    }

    fn make_ops() -> (KvOps<Thing>, Arc<dyn KVStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KVStore> =
            Arc::new(marquee_kv::RedbStore::open(&dir.path().join("test.redb")).unwrap());
        (KvOps::new(kv.clone()), kv, dir)
    }

    fn insert(kv: &Arc<dyn KVStore>, record: Thing) -> Result<Thing, ServiceError> {
        transact(kv.as_ref(), |txn| KvOps::<Thing>::insert_in(txn, record.clone()))
    }

    fn thing(id: &str, count: u32) -> Thing {
        Thing {
            id: id.into(),
            name: format!("Thing {}", id),
            count,
        }
    }

    #[test]
    fn crud_lifecycle() {
        let (ops, kv, _dir) = make_ops();

        // Create with auto-fill.
        let created = insert(&kv, thing("", 42)).unwrap();
        assert_eq!(created.id, "auto-id");

        let mut fetched = ops.get_or_err("auto-id").unwrap();
        assert_eq!(fetched.count, 42);
        assert_eq!(ops.list().unwrap().len(), 1);

        fetched.name = "Gadget".into();
        ops.save(fetched).unwrap();
        assert_eq!(ops.get_or_err("auto-id").unwrap().name, "Gadget");

        ops.delete("auto-id").unwrap();
        assert!(ops.get("auto-id").unwrap().is_none());
    }

    #[test]
    fn duplicate_key_rejected() {
        let (ops, kv, _dir) = make_ops();
        insert(&kv, thing("x", 1)).unwrap();
        let err = insert(&kv, thing("x", 2)).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(ops.get_or_err("x").unwrap().count, 1);
    }

    #[test]
    fn missing_records_report_not_found() {
        let (ops, _kv, _dir) = make_ops();
        assert!(ops.get("nope").unwrap().is_none());
        assert!(matches!(ops.get_or_err("nope"), Err(ServiceError::NotFound(_))));
        assert!(matches!(ops.delete("ghost"), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn list_prefix_filters_by_key_value() {
        let (ops, kv, _dir) = make_ops();
        insert(&kv, thing("m1:u1", 1)).unwrap();
        insert(&kv, thing("m1:u2", 2)).unwrap();
        insert(&kv, thing("m2:u1", 3)).unwrap();
        assert_eq!(ops.list_prefix("m1:").unwrap().len(), 2);
        assert_eq!(ops.list_prefix("m2:").unwrap().len(), 1);
        assert_eq!(ops.list_prefix("m3:").unwrap().len(), 0);
    }

    #[test]
    fn transaction_helpers_commit_together() {
        let (ops, kv, _dir) = make_ops();
        insert(&kv, thing("old", 1)).unwrap();

        let count = transact(kv.as_ref(), |txn| {
            KvOps::<Thing>::insert_in(txn, thing("a", 1))?;
            KvOps::<Thing>::insert_in(txn, thing("b", 2))?;
            assert!(KvOps::<Thing>::delete_in(txn, "old")?);
            assert!(KvOps::<Thing>::exists_in(txn, "a")?);
            KvOps::<Thing>::count_in(txn, "")
        })
        .unwrap();
        assert_eq!(count, 2);
        assert!(ops.get("old").unwrap().is_none());
        assert_eq!(ops.list().unwrap().len(), 2);
    }

    #[test]
    fn service_error_aborts_transaction() {
        let (ops, kv, _dir) = make_ops();
        insert(&kv, thing("dup", 1)).unwrap();

        let err = transact(kv.as_ref(), |txn| {
            KvOps::<Thing>::insert_in(txn, thing("fresh", 1))?;
            // Second insert conflicts; the first must not survive.
            KvOps::<Thing>::insert_in(txn, thing("dup", 2))
        })
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert!(ops.get("fresh").unwrap().is_none());
    }
}
