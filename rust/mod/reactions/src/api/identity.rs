use axum::http::HeaderMap;

use marquee_core::ServiceError;

use crate::api::ApiState;

/// Path alias for the session user.
pub const ME: &str = "me";

/// Resolve a user id from a path or body against the session.
///
/// `me` and the session's own id resolve to the session user. Any other id
/// is refused: nobody acts on behalf of someone else. Runs before the store
/// is touched, so a rejected call has no side effects.
pub(crate) fn resolve_user(
    state: &ApiState,
    headers: &HeaderMap,
    uid: &str,
) -> Result<String, ServiceError> {
    let caller = state.identity.identify(headers)?;
    if uid.trim().is_empty() {
        return Err(ServiceError::Validation("user id is required".into()));
    }
    if uid == ME || uid == caller.user_id {
        Ok(caller.user_id)
    } else {
        Err(ServiceError::foreign_user(uid))
    }
}
