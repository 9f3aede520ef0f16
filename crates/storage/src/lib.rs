#![forbid(unsafe_code)]

pub mod session;
pub mod store;

pub use session::{keys, ExamSession, SessionError};
pub use store::{InMemoryStore, SessionStore};
