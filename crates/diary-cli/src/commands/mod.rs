//! Command handlers, one module per command group.

pub mod entries;
pub mod maintenance;
pub mod misc;
