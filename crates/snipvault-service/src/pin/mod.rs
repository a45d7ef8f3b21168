//! Media PIN gate business logic.

pub mod service;

pub use service::{GateStatus, PinService, VerifyOutcome};
