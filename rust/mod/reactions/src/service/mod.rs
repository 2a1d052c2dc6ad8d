pub mod audit;
pub mod bookmark;
pub mod movie;
pub mod reconciler;
pub mod relationship;

use std::sync::Arc;

use marquee_kv::KVStore;
use marquee_store::KvOps;

use crate::model::{Bookmark, Movie, MovieExternalIndex, ReactionEdge, UserReactionIndex};

pub use audit::AuditReport;

/// Configuration for the reactions service.
#[derive(Debug, Clone)]
pub struct ReactionsConfig {
    /// Default size of the top-N movie rankings.
    pub top_limit: usize,
}

impl Default for ReactionsConfig {
    fn default() -> Self {
        Self { top_limit: 3 }
    }
}

/// The reactions service. Holds the store and configuration.
///
/// Constructed once at startup and shared behind an `Arc`.
pub struct ReactionService {
    pub(crate) kv: Arc<dyn KVStore>,
    pub(crate) movies: KvOps<Movie>,
    pub(crate) external: KvOps<MovieExternalIndex>,
    pub(crate) edges: KvOps<ReactionEdge>,
    pub(crate) user_edges: KvOps<UserReactionIndex>,
    pub(crate) bookmarks: KvOps<Bookmark>,
    pub(crate) config: ReactionsConfig,
}

impl ReactionService {
    pub fn new(kv: Arc<dyn KVStore>, config: ReactionsConfig) -> Arc<Self> {
        Arc::new(Self {
            movies: KvOps::new(kv.clone()),
            external: KvOps::new(kv.clone()),
            edges: KvOps::new(kv.clone()),
            user_edges: KvOps::new(kv.clone()),
            bookmarks: KvOps::new(kv.clone()),
            kv,
            config,
        })
    }
}
