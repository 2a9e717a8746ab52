//! LexTrack Engine - Command orchestration layer
//!
//! Sits between the HTTP/CLI surfaces and the store. Owns:
//! - Command handlers with boundary logging (start/end/error per operation)
//! - The typed feature loggers that feed the case timeline
//! - Offline draft document templates
//! - Fixed AI prompts and per-feature completion parameters
//! - The explicit active-case session store

pub mod commands;
pub mod loggers;
pub mod prompts;
pub mod session;
pub mod templates;

pub use lextrack_store::errors::Result;
