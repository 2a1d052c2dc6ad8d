pub mod auth;
pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use auth::{Claims, Identity, IdentityProvider, JwtService, bearer_token};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
pub use types::{LimitParams, ListResult, new_id, now_rfc3339};
