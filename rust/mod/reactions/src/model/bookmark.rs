use serde::{Deserialize, Serialize};

use super::key_part;

/// A user's bookmark on a movie, referenced by its external id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub created_at: String,
}

impl Bookmark {
    pub fn new(user_id: &str, movie_id: &str) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
            created_at: String::new(),
        }
    }

    /// Store key value: `{user_id}:{movie_id}`, each part escaped.
    pub fn key_for(user_id: &str, movie_id: &str) -> String {
        format!("{}:{}", key_part(user_id), key_part(movie_id))
    }

    /// Key prefix covering every bookmark of one user.
    pub fn user_prefix(user_id: &str) -> String {
        format!("{}:", key_part(user_id))
    }
}

/// Body of `POST /bookmarks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmark {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub movie_id: String,
}
