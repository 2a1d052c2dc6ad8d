//! Movie lookup, lazy creation and rankings.

use marquee_core::ServiceError;
use marquee_kv::KVTxn;
use marquee_store::{KvOps, transact};
use tracing::info;

use crate::model::{Movie, MovieExternalIndex, Reaction};
use crate::service::ReactionService;

/// Resolve a movie by external id inside a transaction, creating it with
/// zeroed stats when unseen. The flag reports whether it was created.
pub(crate) fn find_or_create_in(
    txn: &mut dyn KVTxn,
    external_id: &str,
) -> Result<(Movie, bool), ServiceError> {
    if let Some(index) = KvOps::<MovieExternalIndex>::get_in(txn, external_id)? {
        if let Some(movie) = KvOps::<Movie>::get_in(txn, &index.movie_id)? {
            return Ok((movie, false));
        }
    }

    let movie = KvOps::<Movie>::insert_in(txn, Movie::for_external(external_id))?;
    KvOps::<MovieExternalIndex>::save_in(
        txn,
        MovieExternalIndex {
            external_id: external_id.to_string(),
            movie_id: movie.id.clone(),
        },
    )?;
    Ok((movie, true))
}

pub(crate) fn validate_external_id(external_id: &str) -> Result<(), ServiceError> {
    if external_id.trim().is_empty() {
        return Err(ServiceError::Validation("movie id must not be blank".into()));
    }
    Ok(())
}

impl ReactionService {
    /// Return the movie for an external id, creating it if unseen.
    pub fn find_or_create(&self, external_id: &str) -> Result<Movie, ServiceError> {
        validate_external_id(external_id)?;
        let (movie, created) =
            transact(self.kv.as_ref(), |txn| find_or_create_in(txn, external_id))?;
        if created {
            info!("movie {} created for external id {}", movie.id, external_id);
        }
        Ok(movie)
    }

    /// Movie by internal id.
    pub fn get_movie(&self, id: &str) -> Result<Movie, ServiceError> {
        self.movies.get_or_err(id)
    }

    /// Movie by external id, without creating it.
    pub fn movie_by_external(&self, external_id: &str) -> Result<Option<Movie>, ServiceError> {
        match self.external.get(external_id)? {
            Some(index) => self.movies.get(&index.movie_id),
            None => Ok(None),
        }
    }

    /// Movies ranked by a counter, highest first. Ties break by external id.
    ///
    /// `limit` falls back to the configured top limit.
    pub fn top_movies(
        &self,
        reaction: Reaction,
        limit: Option<usize>,
    ) -> Result<Vec<Movie>, ServiceError> {
        let limit = limit.unwrap_or(self.config.top_limit);
        let mut movies = self.movies.list()?;
        movies.sort_by(|a, b| {
            b.stats
                .get(reaction)
                .cmp(&a.stats.get(reaction))
                .then_with(|| a.external_id.cmp(&b.external_id))
        });
        movies.truncate(limit);
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::memory_service;

    #[test]
    fn lazy_create_happens_once() {
        let svc = memory_service();
        let first = svc.find_or_create("tt0111161").unwrap();
        let second = svc.find_or_create("tt0111161").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.stats.likes, 0);
        assert_eq!(first.stats.dislikes, 0);
        assert_eq!(svc.movies.list().unwrap().len(), 1);
    }

    #[test]
    fn blank_external_id_rejected() {
        let svc = memory_service();
        let err = svc.find_or_create("  ").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.movies.list().unwrap().is_empty());
    }

    #[test]
    fn lookup_by_either_id() {
        let svc = memory_service();
        let movie = svc.find_or_create("tt0068646").unwrap();
        assert_eq!(svc.get_movie(&movie.id).unwrap().external_id, "tt0068646");
        assert_eq!(svc.movie_by_external("tt0068646").unwrap().unwrap().id, movie.id);
        assert!(svc.movie_by_external("tt9999999").unwrap().is_none());
        assert!(matches!(svc.get_movie("nope"), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn top_movies_rank_by_counter_then_external_id() {
        let svc = memory_service();
        for (ext, likes, dislikes) in [("c", 2, 0), ("a", 2, 1), ("b", 5, 0), ("d", 0, 3)] {
            let mut movie = svc.find_or_create(ext).unwrap();
            movie.stats.likes = likes;
            movie.stats.dislikes = dislikes;
            svc.movies.save(movie).unwrap();
        }

        let liked: Vec<String> = svc
            .top_movies(Reaction::Like, None)
            .unwrap()
            .into_iter()
            .map(|m| m.external_id)
            .collect();
        assert_eq!(liked, vec!["b", "a", "c"]);

        let disliked = svc.top_movies(Reaction::Dislike, Some(1)).unwrap();
        assert_eq!(disliked[0].external_id, "d");
        assert_eq!(disliked.len(), 1);
    }
}
