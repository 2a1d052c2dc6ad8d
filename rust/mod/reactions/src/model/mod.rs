mod bookmark;
mod movie;
mod reaction;

pub use bookmark::*;
pub use movie::*;
pub use reaction::*;

/// Escape one component of a composite store key.
///
/// `%` and `:` are percent-encoded, so a key built from escaped parts
/// joined by `:` splits back into exactly those parts.
pub fn key_part(raw: &str) -> String {
    raw.replace('%', "%25").replace(':', "%3A")
}
