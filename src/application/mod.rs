//! # Application Layer
//!
//! Orchestrates the planner: command parsing and routing, event resolution,
//! per-event locking, notification fan-out and logging setup.

pub mod locks;
pub mod logging;
pub mod notifier;
pub mod parsing;
pub mod resolver;
pub mod router;
