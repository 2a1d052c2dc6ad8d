use crate::error::KVError;

/// KVStore is the document store every service persists through.
///
/// Keys follow a namespaced convention: `movies:movie:{id}`,
/// `movies:like:{movie_id}:{user_id}`, etc. Values are opaque bytes
/// (JSON documents in practice).
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Scan all keys matching a prefix. Returns sorted (key, value) pairs.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;

    /// Run `body` inside a single write transaction.
    ///
    /// Write transactions are serialized: no other writer observes or
    /// interleaves with the body. If the body returns `Ok`, every write it
    /// made commits together; if it returns `Err`, none of them do.
    fn transact(
        &self,
        body: &mut dyn FnMut(&mut dyn KVTxn) -> Result<(), KVError>,
    ) -> Result<(), KVError>;
}

/// The view a transaction body gets of the store. Reads observe the
/// transaction's own uncommitted writes.
pub trait KVTxn {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Returns whether the key existed.
    fn delete(&mut self, key: &str) -> Result<bool, KVError>;

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}

/// Run a transaction body that produces a value or a caller-defined error.
///
/// A body error aborts the transaction and is returned as-is; a commit
/// failure is converted through `From<KVError>`.
pub fn transact<T, E>(
    kv: &dyn KVStore,
    mut body: impl FnMut(&mut dyn KVTxn) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<KVError>,
{
    let mut outcome: Option<Result<T, E>> = None;
    let committed = kv.transact(&mut |txn: &mut dyn KVTxn| match body(txn) {
        Ok(value) => {
            outcome = Some(Ok(value));
            Ok(())
        }
        Err(e) => {
            outcome = Some(Err(e));
            Err(KVError::Aborted)
        }
    });

    match (committed, outcome) {
        (Ok(()), Some(Ok(value))) => Ok(value),
        (_, Some(Err(e))) => Err(e),
        (Err(e), _) => Err(e.into()),
        (Ok(()), None) => Err(KVError::Storage("transaction body never ran".into()).into()),
    }
}
