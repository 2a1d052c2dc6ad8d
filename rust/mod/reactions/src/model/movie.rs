use serde::{Deserialize, Serialize};

use super::Reaction;

/// A catalog movie as known to this service.
///
/// Movies are never created over HTTP. The first like, dislike or bookmark
/// that references an unseen external id creates one with zeroed stats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Internal id (UUIDv4, no dashes).
    pub id: String,

    /// Id in the third-party catalog, e.g. "tt0111161".
    pub external_id: String,

    /// Denormalized reaction counters.
    #[serde(default)]
    pub stats: MovieStats,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

impl Movie {
    /// A not-yet-stored movie for an external id. Ids and timestamps are
    /// filled by the store hooks.
    pub fn for_external(external_id: &str) -> Self {
        Self {
            id: String::new(),
            external_id: external_id.to_string(),
            stats: MovieStats::default(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

/// Per-movie counters. Each must equal the number of matching edges.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieStats {
    pub likes: u64,
    pub dislikes: u64,
}

impl MovieStats {
    pub fn get(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Like => self.likes,
            Reaction::Dislike => self.dislikes,
        }
    }

    pub fn set(&mut self, reaction: Reaction, value: u64) {
        match reaction {
            Reaction::Like => self.likes = value,
            Reaction::Dislike => self.dislikes = value,
        }
    }
}

/// Secondary index: external id -> internal movie id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieExternalIndex {
    pub external_id: String,
    pub movie_id: String,
}
