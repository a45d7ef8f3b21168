//! Built-in job implementations.

pub mod retention;
pub mod session;

pub use retention::RetentionJob;
pub use session::SessionCleanupJob;
