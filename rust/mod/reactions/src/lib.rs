//! Reactions module: likes, dislikes and bookmarks on catalog movies.
//!
//! # Resources
//!
//! - **Movie**: created lazily from a third-party external id, carries
//!   like/dislike counters
//! - **ReactionEdge**: a user's like or dislike on a movie; the two are
//!   mutually exclusive per (user, movie)
//! - **Bookmark**: a user's saved movie, unique per (user, movie)
//!
//! Toggling a reaction updates the edge and the movie counters in one
//! store transaction, so counters always equal edge counts.
//!
//! # Usage
//!
//! ```ignore
//! use reactions::{ReactionsModule, service::{ReactionService, ReactionsConfig}};
//!
//! let service = ReactionService::new(kv, ReactionsConfig::default());
//! let module = ReactionsModule::new(service, Arc::new(jwt));
//! let router = module.routes(); // Mount under /api
//! ```

pub mod api;
pub mod model;
pub mod service;
pub mod worker;

mod store_impls;

use std::sync::Arc;

use axum::Router;

use marquee_core::{IdentityProvider, Module};

use crate::service::ReactionService;

/// Reactions module implementing the Module trait.
pub struct ReactionsModule {
    service: Arc<ReactionService>,
    identity: Arc<dyn IdentityProvider>,
}

impl ReactionsModule {
    pub fn new(service: Arc<ReactionService>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { service, identity }
    }

    /// Get a reference to the underlying ReactionService.
    pub fn service(&self) -> &Arc<ReactionService> {
        &self.service
    }
}

impl Module for ReactionsModule {
    fn name(&self) -> &str {
        "reactions"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.identity.clone())
    }
}
