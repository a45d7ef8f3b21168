//! Per-user media security settings (PIN gate state).

pub mod model;

pub use model::{PinAttempt, SecuritySettings};
