//! Domain entities - Objects with identity and lifecycle

mod session;

pub use session::{Session, SessionStatus};
