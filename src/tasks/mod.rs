//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Expiry sweep: removes aged cache entries at configured intervals, so a
//!   long-running process does not accumulate dead entries between reads

mod cleanup;

pub use cleanup::spawn_sweep_task;
