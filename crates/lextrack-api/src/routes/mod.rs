//! Route handlers, grouped by surface area

pub mod cases;
pub mod features;
pub mod notifications;
