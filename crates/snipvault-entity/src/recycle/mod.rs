//! Recycle-bin aggregate types.

pub mod model;

pub use model::{RecycleBinContents, RecycleBinItem, RecycleCounts, RecycleKind, RecycleSelector};
