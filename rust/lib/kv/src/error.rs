use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The transaction body returned an error; nothing was committed.
    #[error("transaction aborted")]
    Aborted,
}
