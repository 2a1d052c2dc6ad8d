//! Typed persistence over the KV document store.
//!
//! A model implements [`KvStore`] to declare its key prefix, key value and
//! hooks. [`KvOps`] provides CRUD on top, either as standalone calls or
//! inside a [`transact`] body so several records change atomically.
//!
//! ```ignore
//! impl KvStore for Bookmark {
//!     const RESOURCE: &'static str = "bookmark";
//!     fn kv_prefix() -> &'static str { "movies:bookmark:" }
//!     fn key_value(&self) -> String { format!("{}:{}", self.user_id, self.movie_id) }
//! }
//! ```

pub mod kv;

pub use kv::{KvOps, KvStore, kv_err, transact};
