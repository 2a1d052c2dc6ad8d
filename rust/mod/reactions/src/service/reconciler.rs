//! Toggle reconciler: flips a user's like or dislike and keeps the movie
//! counters equal to the edge counts.
//!
//! Everything happens inside one store transaction. Writers are serialized
//! by the store, so concurrent toggles cannot both observe the same
//! pre-mutation state, and a failure anywhere leaves neither the edge nor
//! the counter written.

use marquee_core::ServiceError;
use marquee_store::{KvOps, transact};
use tracing::{debug, info};

use crate::model::{Movie, Reaction};
use crate::service::ReactionService;
use crate::service::movie::{find_or_create_in, validate_external_id};
use crate::service::relationship;

impl ReactionService {
    /// Toggle `reaction` for `user_id` on the movie with `external_id`.
    ///
    /// Turning a reaction on clears the opposite one for the same pair.
    /// Returns the movie with its updated stats.
    pub fn toggle_reaction(
        &self,
        user_id: &str,
        external_id: &str,
        reaction: Reaction,
    ) -> Result<Movie, ServiceError> {
        if user_id.trim().is_empty() {
            return Err(ServiceError::not_logged_in());
        }
        validate_external_id(external_id)?;

        let (movie, created, active) = transact(self.kv.as_ref(), |txn| {
            let (mut movie, created) = find_or_create_in(txn, external_id)?;

            let exists = relationship::exists_in(txn, reaction, user_id, &movie.id)?;
            let before = relationship::count_in(txn, reaction, &movie.id)?;

            let after = if exists {
                relationship::delete_in(txn, reaction, user_id, &movie.id)?;
                before.saturating_sub(1)
            } else {
                relationship::create_in(txn, reaction, user_id, &movie.id)?;
                before + 1
            };
            movie.stats.set(reaction, after);

            if !exists {
                let opposite = reaction.opposite();
                if relationship::delete_in(txn, opposite, user_id, &movie.id)? {
                    let remaining = relationship::count_in(txn, opposite, &movie.id)?;
                    movie.stats.set(opposite, remaining);
                }
            }

            let movie = KvOps::<Movie>::save_in(txn, movie)?;
            Ok((movie, created, !exists))
        })?;

        if created {
            info!("movie {} created for external id {}", movie.id, external_id);
        }
        debug!(
            "toggle {} by {} on {}: {} -> likes={} dislikes={}",
            reaction,
            user_id,
            external_id,
            if active { "on" } else { "off" },
            movie.stats.likes,
            movie.stats.dislikes,
        );
        Ok(movie)
    }
}
