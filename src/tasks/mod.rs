//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired records from the in-memory store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
