/// Collaborator seams used by the HTTP handlers
///
/// - `stories`: the story store (authors and stories)
/// - `auth`: credential checks and password hashing
/// - `sessions`: cookie session issue, lookup and revocation
pub mod auth;
pub mod sessions;
pub mod stories;

pub use auth::{hash_password, verify_password, AuthProvider};
pub use sessions::{Session, SessionStore};
pub use stories::StoryStore;
