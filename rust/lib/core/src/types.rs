use serde::{Deserialize, Serialize};

/// Query parameters for ranked listings (`?limit=N`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    /// Maximum number of results. `None` means the endpoint default.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Result wrapper for list operations.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> ListResult<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
