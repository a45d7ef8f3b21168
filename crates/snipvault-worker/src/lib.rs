//! Scheduled background tasks for SnipVault.
//!
//! This crate provides:
//! - A cron scheduler for periodic maintenance work
//! - A retention sweep that permanently purges recycle-bin rows past
//!   their retention window
//! - An expired-session sweep for the auth session table

pub mod jobs;
pub mod scheduler;

pub use scheduler::CronScheduler;
