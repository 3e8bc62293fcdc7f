//! # Interface Layer
//!
//! One handler per planner verb.

pub mod commands;
