//! Command orchestration layer.
//!
//! High-level command functions coordinating domain logic and persistence.
//! This layer owns operation boundary logging: `log_op_start!` on entry,
//! `log_op_end!`/`log_op_error!` on exit. Lower layers log debug detail only.

pub mod artifacts;
pub mod case;
pub mod timeline;

pub use artifacts::Actor;
