use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The binary entry point collects every module and nests its routes
/// under the API prefix.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes. Paths are relative to the API prefix.
    fn routes(&self) -> Router;
}
