//! Relationship store: like and dislike edges between users and movies.
//!
//! Mutations are only exposed inside a transaction so that callers adjust
//! the movie counters in the same atomic step. Reads are available both
//! ways.

use marquee_core::ServiceError;
use marquee_kv::KVTxn;
use marquee_store::KvOps;

use crate::model::{Movie, Reaction, ReactionEdge, UserReactionIndex};
use crate::service::ReactionService;

type Edges = KvOps<ReactionEdge>;
type UserEdges = KvOps<UserReactionIndex>;

/// Whether `user_id` holds `reaction` on the movie.
pub(crate) fn exists_in(
    txn: &dyn KVTxn,
    reaction: Reaction,
    user_id: &str,
    movie_id: &str,
) -> Result<bool, ServiceError> {
    Edges::exists_in(txn, &ReactionEdge::key_for(reaction, movie_id, user_id))
}

/// Number of `reaction` edges on the movie.
pub(crate) fn count_in(
    txn: &dyn KVTxn,
    reaction: Reaction,
    movie_id: &str,
) -> Result<u64, ServiceError> {
    let n = Edges::count_in(txn, &ReactionEdge::movie_prefix(reaction, movie_id))?;
    Ok(n as u64)
}

pub(crate) fn create_in(
    txn: &mut dyn KVTxn,
    reaction: Reaction,
    user_id: &str,
    movie_id: &str,
) -> Result<ReactionEdge, ServiceError> {
    let edge = Edges::insert_in(txn, ReactionEdge::new(reaction, movie_id, user_id))?;
    UserEdges::save_in(
        txn,
        UserReactionIndex {
            reaction,
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
        },
    )?;
    Ok(edge)
}

/// Remove an edge. Returns whether it existed.
pub(crate) fn delete_in(
    txn: &mut dyn KVTxn,
    reaction: Reaction,
    user_id: &str,
    movie_id: &str,
) -> Result<bool, ServiceError> {
    UserEdges::delete_in(txn, &UserReactionIndex::key_for(reaction, user_id, movie_id))?;
    Edges::delete_in(txn, &ReactionEdge::key_for(reaction, movie_id, user_id))
}

impl ReactionService {
    pub fn reaction_exists(
        &self,
        reaction: Reaction,
        user_id: &str,
        movie_id: &str,
    ) -> Result<bool, ServiceError> {
        let key = ReactionEdge::key_for(reaction, movie_id, user_id);
        Ok(self.edges.get(&key)?.is_some())
    }

    pub fn reaction_count(&self, reaction: Reaction, movie_id: &str) -> Result<u64, ServiceError> {
        let edges = self.edges.list_prefix(&ReactionEdge::movie_prefix(reaction, movie_id))?;
        Ok(edges.len() as u64)
    }

    /// Every `reaction` edge on a movie (internal id). An unknown movie has none.
    pub fn reactions_for_movie(
        &self,
        reaction: Reaction,
        movie_id: &str,
    ) -> Result<Vec<ReactionEdge>, ServiceError> {
        self.edges.list_prefix(&ReactionEdge::movie_prefix(reaction, movie_id))
    }

    /// Every `reaction` edge held by a user, paired with its movie.
    ///
    /// Reads the per-user index, so the cost follows the user's own edges.
    pub fn reactions_for_user(
        &self,
        reaction: Reaction,
        user_id: &str,
    ) -> Result<Vec<(ReactionEdge, Movie)>, ServiceError> {
        let index = self
            .user_edges
            .list_prefix(&UserReactionIndex::user_prefix(reaction, user_id))?;
        let mut out = Vec::new();
        for entry in index {
            let key = ReactionEdge::key_for(reaction, &entry.movie_id, user_id);
            let Some(edge) = self.edges.get(&key)? else {
                continue;
            };
            if let Some(movie) = self.movies.get(&edge.movie_id)? {
                out.push((edge, movie));
            }
        }
        Ok(out)
    }
}
