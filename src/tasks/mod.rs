//! Background Tasks Module
//!
//! Periodic maintenance that runs alongside request handling. Currently one
//! task: the TTL sweep that reclaims expired response cache entries.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
