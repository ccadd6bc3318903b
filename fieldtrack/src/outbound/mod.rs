//! Driven adapters implementing the domain ports.

pub mod notify;
pub mod session_file;

pub use self::notify::TracingNotifier;
pub use self::session_file::{JsonFileSessionStore, SESSION_KEY};
