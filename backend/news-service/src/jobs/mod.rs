pub mod session_reaper;

pub use session_reaper::{reap_once, start_session_reaper};
