//! Recycle bin aggregation, restore/purge, and retention sweep.

pub mod service;

pub use service::{BulkOutcome, FailedItem, RecycleService, RetentionReport};
