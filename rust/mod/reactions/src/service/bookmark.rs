use marquee_core::ServiceError;
use marquee_store::{KvOps, transact};
use tracing::info;

use crate::model::Bookmark;
use crate::service::ReactionService;
use crate::service::movie::find_or_create_in;

impl ReactionService {
    /// Bookmark a movie (external id) for a user. The movie is created if
    /// unseen; an existing bookmark is a `Conflict` and nothing is written.
    pub fn add_bookmark(&self, user_id: &str, movie_id: &str) -> Result<Bookmark, ServiceError> {
        if user_id.trim().is_empty() {
            return Err(ServiceError::Validation("userId is required".into()));
        }
        if movie_id.trim().is_empty() {
            return Err(ServiceError::Validation("movieId is required".into()));
        }

        let (bookmark, created) = transact(self.kv.as_ref(), |txn| {
            let (_, created) = find_or_create_in(txn, movie_id)?;
            let bookmark = KvOps::<Bookmark>::insert_in(txn, Bookmark::new(user_id, movie_id))?;
            Ok((bookmark, created))
        })?;

        if created {
            info!("movie created for bookmarked external id {}", movie_id);
        }
        Ok(bookmark)
    }

    /// Remove a bookmark. A missing bookmark is `NotFound`.
    pub fn remove_bookmark(&self, user_id: &str, movie_id: &str) -> Result<(), ServiceError> {
        self.bookmarks.delete(&Bookmark::key_for(user_id, movie_id))
    }

    /// External ids bookmarked by a user, in key order.
    pub fn bookmarks_for_user(&self, user_id: &str) -> Result<Vec<String>, ServiceError> {
        let bookmarks = self.bookmarks.list_prefix(&Bookmark::user_prefix(user_id))?;
        Ok(bookmarks.into_iter().map(|b| b.movie_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{memory_service, redb_service};

    #[test]
    fn add_list_remove() {
        let svc = memory_service();
        svc.add_bookmark("u1", "tt2").unwrap();
        svc.add_bookmark("u1", "tt1").unwrap();
        svc.add_bookmark("u2", "tt3").unwrap();

        assert_eq!(svc.bookmarks_for_user("u1").unwrap(), vec!["tt1", "tt2"]);
        svc.remove_bookmark("u1", "tt1").unwrap();
        assert_eq!(svc.bookmarks_for_user("u1").unwrap(), vec!["tt2"]);
        assert!(matches!(
            svc.remove_bookmark("u1", "tt1"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn second_bookmark_is_a_conflict() {
        let (svc, _dir) = redb_service();
        let first = svc.add_bookmark("u1", "tt0111161").unwrap();
        let err = svc.add_bookmark("u1", "tt0111161").unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let all = svc.bookmarks.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, first.id);
    }

    #[test]
    fn bookmark_creates_movie_lazily() {
        let svc = memory_service();
        svc.add_bookmark("u1", "tt7").unwrap();
        let movie = svc.movie_by_external("tt7").unwrap().unwrap();
        assert_eq!(movie.stats.likes, 0);
        assert_eq!(movie.stats.dislikes, 0);
    }

    #[test]
    fn blank_fields_rejected_without_writes() {
        let svc = memory_service();
        assert!(matches!(svc.add_bookmark("", "tt1"), Err(ServiceError::Validation(_))));
        assert!(matches!(svc.add_bookmark("u1", " "), Err(ServiceError::Validation(_))));
        assert!(svc.movies.list().unwrap().is_empty());
        assert!(svc.bookmarks.list().unwrap().is_empty());
    }

    #[test]
    fn ids_containing_separators_do_not_collide() {
        let svc = memory_service();
        svc.add_bookmark("a:b", "c").unwrap();
        svc.add_bookmark("a", "b:c").unwrap();
        assert_eq!(svc.bookmarks.list().unwrap().len(), 2);

        svc.remove_bookmark("a", "b:c").unwrap();
        assert_eq!(svc.bookmarks_for_user("a:b").unwrap(), vec!["c"]);
        assert!(svc.bookmarks_for_user("a").unwrap().is_empty());
        assert!(matches!(
            svc.remove_bookmark("a", "b:c"),
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(svc.bookmarks_for_user("a:b").unwrap(), vec!["c"]);
    }

    #[test]
    fn user_prefix_does_not_leak_across_users() {
        let svc = memory_service();
        svc.add_bookmark("u1:x", "tt1").unwrap();
        svc.add_bookmark("u1", "tt2").unwrap();
        assert_eq!(svc.bookmarks_for_user("u1").unwrap(), vec!["tt2"]);
    }
}
