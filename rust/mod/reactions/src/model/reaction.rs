use std::fmt;

use serde::{Deserialize, Serialize};

use super::key_part;

/// The two mutually exclusive opinions a user can hold about a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }

    pub fn opposite(&self) -> Reaction {
        match self {
            Reaction::Like => Reaction::Dislike,
            Reaction::Dislike => Reaction::Like,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A like or dislike edge between a user and a movie (internal id).
///
/// At most one edge of each kind exists per (user, movie) pair, and never
/// one of each at the same time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionEdge {
    pub id: String,
    pub reaction: Reaction,
    pub movie_id: String,
    pub user_id: String,
    pub created_at: String,
}

impl ReactionEdge {
    pub fn new(reaction: Reaction, movie_id: &str, user_id: &str) -> Self {
        Self {
            id: String::new(),
            reaction,
            movie_id: movie_id.to_string(),
            user_id: user_id.to_string(),
            created_at: String::new(),
        }
    }

    /// Store key value: `{reaction}:{movie_id}:{user_id}`, ids escaped.
    pub fn key_for(reaction: Reaction, movie_id: &str, user_id: &str) -> String {
        format!("{}:{}:{}", reaction, key_part(movie_id), key_part(user_id))
    }

    /// Key prefix covering every edge of one kind on a movie.
    pub fn movie_prefix(reaction: Reaction, movie_id: &str) -> String {
        format!("{}:{}:", reaction, key_part(movie_id))
    }
}

/// Per-user index entry for a reaction edge, written and removed in the
/// same transaction as the edge itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserReactionIndex {
    pub reaction: Reaction,
    pub user_id: String,
    pub movie_id: String,
}

impl UserReactionIndex {
    /// Store key value: `{reaction}:{user_id}:{movie_id}`, ids escaped.
    pub fn key_for(reaction: Reaction, user_id: &str, movie_id: &str) -> String {
        format!("{}:{}:{}", reaction, key_part(user_id), key_part(movie_id))
    }

    /// Key prefix covering every edge of one kind held by a user.
    pub fn user_prefix(reaction: Reaction, user_id: &str) -> String {
        format!("{}:{}:", reaction, key_part(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips() {
        assert_eq!(Reaction::Like.opposite(), Reaction::Dislike);
        assert_eq!(Reaction::Dislike.opposite(), Reaction::Like);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Reaction::Dislike).unwrap(), "\"dislike\"");
    }

    #[test]
    fn movie_prefix_is_a_prefix_of_the_key() {
        let key = ReactionEdge::key_for(Reaction::Like, "m1", "u1");
        assert!(key.starts_with(&ReactionEdge::movie_prefix(Reaction::Like, "m1")));
        assert!(!key.starts_with(&ReactionEdge::movie_prefix(Reaction::Dislike, "m1")));
    }

    #[test]
    fn user_index_prefix_does_not_match_longer_user_ids() {
        let key = UserReactionIndex::key_for(Reaction::Like, "a:b", "m1");
        assert!(!key.starts_with(&UserReactionIndex::user_prefix(Reaction::Like, "a")));
        assert!(key.starts_with(&UserReactionIndex::user_prefix(Reaction::Like, "a:b")));
    }
}
