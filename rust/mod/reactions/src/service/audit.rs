//! Counter audit: recount edges and repair drifted movie stats.

use marquee_core::ServiceError;
use marquee_store::{KvOps, transact};
use serde::Serialize;
use tracing::{info, warn};

use crate::model::{Movie, MovieStats, Reaction};
use crate::service::ReactionService;
use crate::service::relationship;

/// Outcome of one audit pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub movies_checked: usize,
    pub movies_repaired: usize,
}

impl ReactionService {
    /// Recount like and dislike edges for every movie and rewrite any stats
    /// that disagree. Each movie is checked in its own transaction.
    pub fn audit_stats(&self) -> Result<AuditReport, ServiceError> {
        let ids: Vec<String> = self.movies.list()?.into_iter().map(|m| m.id).collect();
        let mut report = AuditReport::default();

        for id in ids {
            let repaired = transact(self.kv.as_ref(), |txn| {
                let Some(mut movie) = KvOps::<Movie>::get_in(txn, &id)? else {
                    return Ok(None);
                };
                let actual = MovieStats {
                    likes: relationship::count_in(txn, Reaction::Like, &id)?,
                    dislikes: relationship::count_in(txn, Reaction::Dislike, &id)?,
                };
                if movie.stats == actual {
                    return Ok(None);
                }
                let stored = movie.stats;
                movie.stats = actual;
                KvOps::<Movie>::save_in(txn, movie)?;
                Ok(Some((stored, actual)))
            })?;

            report.movies_checked += 1;
            if let Some((stored, actual)) = repaired {
                warn!(
                    "audit: movie {} stats repaired: likes {} -> {}, dislikes {} -> {}",
                    id, stored.likes, actual.likes, stored.dislikes, actual.dislikes
                );
                report.movies_repaired += 1;
            }
        }

        info!(
            "audit: checked {} movies, repaired {}",
            report.movies_checked, report.movies_repaired
        );
        Ok(report)
    }
}
