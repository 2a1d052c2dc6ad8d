//! KvStore implementations for reaction models.
//!
//! Key layout:
//!
//! | Model | Key |
//! |-------|-----|
//! | `Movie` | `movies:movie:{id}` |
//! | `MovieExternalIndex` | `movies:external:{external_id}` |
//! | `ReactionEdge` | `movies:reaction:{like\|dislike}:{movie_id}:{user_id}` |
//! | `UserReactionIndex` | `movies:user_reaction:{like\|dislike}:{user_id}:{movie_id}` |
//! | `Bookmark` | `movies:bookmark:{user_id}:{movie_id}` |
//!
//! Ids inside composite keys are escaped with `model::key_part`.

use marquee_core::{new_id, now_rfc3339};
use marquee_store::KvStore;

use crate::model::*;

impl KvStore for Movie {
    const RESOURCE: &'static str = "movie";

    fn kv_prefix() -> &'static str {
        "movies:movie:"
    }

    fn key_value(&self) -> String {
        self.id.clone()
    }

    fn before_create(&mut self) {
        if self.id.is_empty() {
            self.id = new_id();
        }
        let now = now_rfc3339();
        if self.created_at.is_empty() {
            self.created_at = now.clone();
        }
        self.updated_at = now;
    }

    fn before_update(&mut self) {
        self.updated_at = now_rfc3339();
    }
}

impl KvStore for MovieExternalIndex {
    const RESOURCE: &'static str = "movie";

    fn kv_prefix() -> &'static str {
        "movies:external:"
    }

    fn key_value(&self) -> String {
        self.external_id.clone()
    }
}

impl KvStore for ReactionEdge {
    const RESOURCE: &'static str = "reaction";

    fn kv_prefix() -> &'static str {
        "movies:reaction:"
    }

    fn key_value(&self) -> String {
        ReactionEdge::key_for(self.reaction, &self.movie_id, &self.user_id)
    }

    fn before_create(&mut self) {
        if self.id.is_empty() {
            self.id = new_id();
        }
        if self.created_at.is_empty() {
            self.created_at = now_rfc3339();
        }
    }
}

impl KvStore for UserReactionIndex {
    const RESOURCE: &'static str = "reaction";

    fn kv_prefix() -> &'static str {
        "movies:user_reaction:"
    }

    fn key_value(&self) -> String {
        UserReactionIndex::key_for(self.reaction, &self.user_id, &self.movie_id)
    }
}

impl KvStore for Bookmark {
    const RESOURCE: &'static str = "bookmark";

    fn kv_prefix() -> &'static str {
        "movies:bookmark:"
    }

    fn key_value(&self) -> String {
        Bookmark::key_for(&self.user_id, &self.movie_id)
    }

    fn before_create(&mut self) {
        if self.id.is_empty() {
            self.id = new_id();
        }
        if self.created_at.is_empty() {
            self.created_at = now_rfc3339();
        }
    }
}
