/// HTTP request plumbing shared by the handlers
///
/// `session` resolves the session cookie into an explicit
/// [`SessionContext`] that handlers receive as an argument.
pub mod session;

pub use session::{removal_cookie, session_cookie, SessionContext};
